use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use itertools::Itertools;
use rayon::prelude::*;

use super::distance::{self, DifficultyRecord};
use super::error::PruneError;
use super::labeling::{label, Labeling};
use super::partition::partition;
use super::selector::{select, PruningCandidate};
use crate::libs::fasta::{write_fasta_to, Alignment};
use crate::libs::phylo::Tree;

/// Configuration for one orchestrated run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub outdir: String,
    pub min_remaining: usize,
    pub count: usize,
    pub seed: u64,
    pub parallel: usize,
}

/// One pruning that could not be completed.
#[derive(Debug, Clone)]
pub struct PruningFailure {
    pub index: usize,
    pub stage: &'static str,
    pub cause: String,
}

/// Outcome of a run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub requested: usize,
    pub effective: usize,
    pub failures: Vec<PruningFailure>,
    /// Every file written, per-pruning outputs first, tables last
    pub written: Vec<PathBuf>,
}

struct PruningOutput {
    node_row: Vec<i64>,
    branch_row: Vec<f64>,
    difficulty: DifficultyRecord,
    files: Vec<PathBuf>,
}

/// Run the whole engine: select candidates once, process each one on the
/// worker pool, write per-pruning files and the three summary tables.
///
/// Per-pruning failures are collected and reported on stderr without
/// aborting the other prunings; tree- and alignment-level problems abort
/// immediately.
pub fn run(tree: &Tree, alignment: &Alignment, config: &RunConfig) -> anyhow::Result<RunReport> {
    let labeling = label(tree)?;

    // Every sequence must be a leaf of the tree
    let leaf_names: HashSet<String> = tree.get_leaf_names().into_iter().flatten().collect();
    for name in alignment.seqs.keys() {
        if !leaf_names.contains(name) {
            return Err(PruneError::UnknownSequence(name.clone()).into());
        }
    }

    let outdir = Path::new(&config.outdir);
    for sub in ["T", "A", "G"] {
        fs::create_dir_all(outdir.join(sub))?;
    }

    let candidates = select(
        tree,
        &labeling,
        config.min_remaining,
        config.count,
        config.seed,
    );
    if candidates.len() < config.count {
        eprintln!(
            "Only {} of {} requested prunings are possible with at least {} leaves remaining",
            candidates.len(),
            config.count,
            config.min_remaining
        );
    }

    let depth = distance::depths(tree);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.parallel)
        .build()?;
    let results: Vec<Result<PruningOutput, PruningFailure>> = pool.install(|| {
        candidates
            .par_iter()
            .enumerate()
            .map(|(i, cand)| process_candidate(tree, &labeling, &depth, alignment, outdir, i, cand))
            .collect()
    });

    let mut rows = Vec::new();
    let mut failures = Vec::new();
    for result in results {
        match result {
            Ok(output) => rows.push(output),
            Err(failure) => failures.push(failure),
        }
    }

    let mut written: Vec<PathBuf> = rows.iter().flat_map(|o| o.files.clone()).collect();
    written.extend(write_tables(outdir, &labeling, &rows)?);

    for failure in &failures {
        eprintln!(
            "Pruning {} failed during {}: {}",
            failure.index, failure.stage, failure.cause
        );
    }

    Ok(RunReport {
        requested: config.count,
        effective: candidates.len(),
        failures,
        written,
    })
}

fn process_candidate(
    tree: &Tree,
    labeling: &Labeling,
    depth: &[usize],
    alignment: &Alignment,
    outdir: &Path,
    index: usize,
    candidate: &PruningCandidate,
) -> Result<PruningOutput, PruningFailure> {
    let fail = |stage: &'static str, cause: String| PruningFailure {
        index,
        stage,
        cause,
    };

    let (node_row, branch_row, difficulty) = distance::compute(tree, labeling, depth, candidate)
        .map_err(|e| fail("distance", e.to_string()))?;

    let split = partition(alignment, candidate).map_err(|e| fail("partition", e.to_string()))?;

    // Structural copy-and-detach: the clone keeps arena ids, so the
    // candidate is found by plain indexing
    let mut pruned = tree.clone();
    pruned.remove_node(candidate.node_id, true);
    let tree_path = outdir.join("T").join(format!("{}.tree", index));
    fs::write(&tree_path, pruned.to_newick() + "\n")
        .map_err(|e| fail("tree", format!("{}: {}", tree_path.display(), e)))?;

    let align_path = outdir.join("A").join(format!("{}.align", index));
    write_partition_file(&align_path, &split.reference)
        .map_err(|e| fail("alignment", format!("{}: {}", align_path.display(), e)))?;

    let reads_path = outdir.join("G").join(format!("{}.fasta", index));
    write_partition_file(&reads_path, &split.queries)
        .map_err(|e| fail("reads", format!("{}: {}", reads_path.display(), e)))?;

    Ok(PruningOutput {
        node_row,
        branch_row,
        difficulty,
        files: vec![tree_path, align_path, reads_path],
    })
}

fn write_partition_file(path: &Path, seqs: &IndexMap<String, Vec<u8>>) -> anyhow::Result<()> {
    let file = fs::File::create(path)?;
    write_fasta_to(std::io::BufWriter::new(file), seqs)
}

/// Assemble the two distance tables and the difficulty table.
///
/// Layout per distance table: a header row `ID; ;0;1;...`, a label row
/// ` ;LABEL;...` mapping every column to its display label, then one row
/// per successful pruning. Returns the three table paths.
fn write_tables(
    outdir: &Path,
    labeling: &Labeling,
    rows: &[PruningOutput],
) -> anyhow::Result<Vec<PathBuf>> {
    let preamble = format!(
        "ID; ;{}\n ;LABEL;{}\n",
        (0..labeling.labels.len()).join(";"),
        labeling.labels.iter().join(";")
    );
    let mut node_csv = preamble.clone();
    let mut branch_csv = preamble;

    for output in rows {
        node_csv.push_str(&format!(
            "{};{};{}\n",
            output.difficulty.pruned_id,
            output.difficulty.label,
            output.node_row.iter().join(";")
        ));
        branch_csv.push_str(&format!(
            "{};{};{}\n",
            output.difficulty.pruned_id,
            output.difficulty.label,
            output.branch_row.iter().join(";")
        ));
    }

    let node_path = outdir.join("NodeDistance.csv");
    let branch_path = outdir.join("BrancheDistance.csv");
    let diff_path = outdir.join("Difficulty.csv");

    fs::write(&node_path, node_csv)?;
    fs::write(&branch_path, branch_csv)?;

    let mut diff_csv = String::from("ID;Nodeprune;Difficulty\n");
    for output in rows {
        diff_csv.push_str(&format!(
            "{};{};{}\n",
            output.difficulty.pruned_id, output.difficulty.label, output.difficulty.difficulty
        ));
    }
    fs::write(&diff_path, diff_csv)?;

    Ok(vec![node_path, branch_path, diff_path])
}
