use assert_cmd::cargo::cargo_bin_cmd;

#[test]
fn command_split() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut cmd = cargo_bin_cmd!("pepr");
    let output = cmd
        .arg("split")
        .arg("tests/pruning/queries.fasta")
        .arg("-o")
        .arg(dir.path())
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.contains("seq-1_r0.fasta"));
    assert!(stdout.contains("read-x_r0.fasta"));
    assert!(stdout.contains("plain_r0.fasta"));

    // Filenames are sanitized, record ids are not
    let content = std::fs::read_to_string(dir.path().join("seq-1_r0.fasta"))?;
    assert_eq!(content, ">seq_1\nACGTACGT\n");
    let content = std::fs::read_to_string(dir.path().join("read-x_r0.fasta"))?;
    assert_eq!(content, ">read;x\nTTTTAAAA\n");

    Ok(())
}

#[test]
fn command_split_suffix() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut cmd = cargo_bin_cmd!("pepr");
    cmd.arg("split")
        .arg("tests/pruning/queries.fasta")
        .arg("-o")
        .arg(dir.path())
        .arg("--suffix")
        .arg("_q");
    cmd.assert().success();

    assert!(dir.path().join("seq-1_q.fasta").is_file());
    assert!(dir.path().join("plain_q.fasta").is_file());

    Ok(())
}

#[test]
fn command_split_stdin() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;

    let mut cmd = cargo_bin_cmd!("pepr");
    cmd.arg("split")
        .arg("stdin")
        .arg("-o")
        .arg(dir.path())
        .write_stdin(">q_0\nAAAA\n");
    cmd.assert().success();

    assert!(dir.path().join("q-0_r0.fasta").is_file());

    Ok(())
}
