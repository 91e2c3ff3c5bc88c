use std::collections::HashSet;

use indexmap::IndexMap;

use super::error::PruneError;
use super::selector::PruningCandidate;
use crate::libs::fasta::Alignment;

const GAP: u8 = b'-';

/// The alignment split for one pruning.
#[derive(Debug, Clone)]
pub struct AlignmentPartition {
    /// Kept rows, with columns that are >= 90% gap in this group removed
    pub reference: IndexMap<String, Vec<u8>>,
    /// Removed rows with every gap stripped, i.e. unaligned reads
    pub queries: IndexMap<String, Vec<u8>>,
}

/// Split the alignment by the candidate's leaf set.
///
/// Rows whose id is under the candidate become queries, the rest stay as
/// the reference. Row order within each group follows the input. Column
/// filtering applies to the reference group only; the gap boundary is
/// inclusive at exactly 90% and evaluated with integer cross-multiplication
/// rather than a floating-point fraction.
pub fn partition(
    alignment: &Alignment,
    candidate: &PruningCandidate,
) -> Result<AlignmentPartition, PruneError> {
    let removed_names: HashSet<&str> = candidate
        .descendant_leaf_names
        .iter()
        .map(|s| s.as_str())
        .collect();

    let mut kept: Vec<(&String, &Vec<u8>)> = Vec::new();
    let mut removed: Vec<(&String, &Vec<u8>)> = Vec::new();
    for (name, seq) in &alignment.seqs {
        if removed_names.contains(name.as_str()) {
            removed.push((name, seq));
        } else {
            kept.push((name, seq));
        }
    }

    if kept.is_empty() || removed.is_empty() {
        return Err(PruneError::EmptyPartition {
            kept: kept.len(),
            removed: removed.len(),
        });
    }

    // gaps/kept >= 0.9 drops the column
    let ncols = kept[0].1.len();
    let mut keep_col = vec![true; ncols];
    for (col, keep) in keep_col.iter_mut().enumerate() {
        let gaps = kept.iter().filter(|(_, seq)| seq[col] == GAP).count();
        *keep = gaps * 10 < kept.len() * 9;
    }

    let mut reference: IndexMap<String, Vec<u8>> = IndexMap::new();
    for (name, seq) in kept {
        let filtered: Vec<u8> = seq
            .iter()
            .zip(keep_col.iter())
            .filter(|&(_, &keep)| keep)
            .map(|(&b, _)| b)
            .collect();
        reference.insert(name.clone(), filtered);
    }

    let mut queries: IndexMap<String, Vec<u8>> = IndexMap::new();
    for (name, seq) in removed {
        let stripped: Vec<u8> = seq.iter().cloned().filter(|&b| b != GAP).collect();
        queries.insert(name.clone(), stripped);
    }

    Ok(AlignmentPartition { reference, queries })
}
