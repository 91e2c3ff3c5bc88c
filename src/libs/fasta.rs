use anyhow::bail;
use indexmap::IndexMap;

/// An in-memory multiple sequence alignment.
///
/// Rows are kept in input order. `seqs` maps the sequence id to its aligned
/// residues, gaps (`-`) included.
#[derive(Debug, Default, Clone)]
pub struct Alignment {
    pub seqs: IndexMap<String, Vec<u8>>,
}

impl Alignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.seqs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seqs.is_empty()
    }

    /// Number of alignment columns (0 for an empty alignment)
    pub fn ncols(&self) -> usize {
        self.seqs.first().map(|(_, s)| s.len()).unwrap_or(0)
    }

    /// Load an aligned FASTA file.
    ///
    /// Rows must all have the same number of columns and ids must be unique.
    pub fn from_file(infile: &str) -> anyhow::Result<Self> {
        let reader = crate::libs::io::reader(infile);
        let mut fa_in = noodles_fasta::io::Reader::new(reader);

        let mut seqs: IndexMap<String, Vec<u8>> = IndexMap::new();
        for result in fa_in.records() {
            let record = result?;
            let name = String::from_utf8(record.name().into())?;
            let seq = record.sequence().as_ref().to_vec();

            if seqs.contains_key(&name) {
                bail!("Duplicated sequence id `{}` in {}", name, infile);
            }
            if let Some((first_name, first_seq)) = seqs.first() {
                if seq.len() != first_seq.len() {
                    bail!(
                        "Unequal rows in {}: `{}` has {} columns while `{}` has {}",
                        infile,
                        name,
                        seq.len(),
                        first_name,
                        first_seq.len()
                    );
                }
            }
            seqs.insert(name, seq);
        }

        if seqs.is_empty() {
            bail!("No sequences found in {}", infile);
        }

        Ok(Self { seqs })
    }
}

/// Write sequences as single-line FASTA records.
pub fn write_fasta(outfile: &str, seqs: &IndexMap<String, Vec<u8>>) -> anyhow::Result<()> {
    write_fasta_to(crate::libs::io::writer(outfile), seqs)
}

pub fn write_fasta_to<W: std::io::Write>(
    writer: W,
    seqs: &IndexMap<String, Vec<u8>>,
) -> anyhow::Result<()> {
    let mut fa_out = noodles_fasta::io::writer::Builder::default()
        .set_line_base_count(usize::MAX)
        .build_from_writer(writer);

    for (name, seq) in seqs {
        let definition = noodles_fasta::record::Definition::new(name.to_string(), None);
        let record = noodles_fasta::Record::new(
            definition,
            noodles_fasta::record::Sequence::from(seq.clone()),
        );
        fa_out.write_record(&record)?;
    }

    Ok(())
}

/// Sanitize a sequence id for use in a file name.
///
/// `_` and `;` collide with the naming scheme of generated files, so both
/// are replaced with `-`. The id inside the record is left untouched.
pub fn seq_id_filter(id: &str) -> String {
    id.replace(['_', ';'], "-")
}
