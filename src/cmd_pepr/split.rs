use clap::*;
use pepr::libs::fasta;
use std::path::Path;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("split")
        .about("Splits a FASTA file into one file per sequence")
        .after_help(
            r###"
Writes each record of the input FASTA to its own single-line FASTA file in
the output directory and prints the path of every file written, one per
line.

Notes:
* Filenames are built from the record id with `_` and `;` replaced by `-`
  (downstream tools treat both as separators); ids inside the files are
  left untouched.
* The --suffix is appended to the sanitized id, so a record `seq_1`
  becomes `seq-1_r0.fasta` by default.

Examples:
1. Split query reads for per-read placement:
   pepr split G/0.fasta -o reads

2. Use a custom suffix:
   pepr split G/0.fasta -o reads --suffix _q
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input FASTA file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .short('o')
                .required(true)
                .num_args(1)
                .help("Output directory, created if needed"),
        )
        .arg(
            Arg::new("suffix")
                .long("suffix")
                .num_args(1)
                .default_value("_r0")
                .help("Suffix appended to each output filename"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("infile").unwrap();
    let outdir = args.get_one::<String>("outdir").unwrap();
    let suffix = args.get_one::<String>("suffix").unwrap();

    std::fs::create_dir_all(outdir)?;

    let reader = pepr::reader(infile);
    let mut fa_in = noodles_fasta::io::Reader::new(reader);

    //----------------------------
    // Process
    //----------------------------
    for result in fa_in.records() {
        let record = result?;
        let name = String::from_utf8(record.name().into())?;

        let filename = format!("{}{}.fasta", fasta::seq_id_filter(&name), suffix);
        let path = Path::new(outdir).join(&filename);

        let file = std::fs::File::create(&path)?;
        let mut fa_out = noodles_fasta::io::writer::Builder::default()
            .set_line_base_count(usize::MAX)
            .build_from_writer(std::io::BufWriter::new(file));
        fa_out.write_record(&record)?;

        println!("{}", path.display());
    }

    Ok(())
}
