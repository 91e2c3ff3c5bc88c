use clap::*;
use pepr::libs::fasta::Alignment;
use pepr::libs::phylo::Tree;
use pepr::libs::pruning::{run, RunConfig};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("prune")
        .about("Prunes subtrees and records ground-truth placement distances")
        .after_help(
            r###"
Simulates "leave-some-out" experiments for placement evaluation: selected
subtrees are removed from the reference tree, and for every pruning the
true topological and branch-length distances from the pruned node to every
remaining node are recorded.

Output layout under --outdir:
* T/{i}.tree  - pruned tree for pruning i
* A/{i}.align - reference alignment, gap-heavy columns removed
* G/{i}.fasta - pruned sequences with gaps stripped, used as queries
* NodeDistance.csv / BrancheDistance.csv - per-pruning distance rows
* Difficulty.csv - removed branch length per pruning

Notes:
* Tables are ;-delimited and keyed by post-order node ids
* Every alignment id must be a leaf name of the tree
* Candidate selection is reproducible for a fixed --seed
* When fewer prunings are possible than requested, the run continues with
  the smaller count and warns on stderr
* Only the first tree of the input file is used

Examples:
1. One pruning, keeping at least 10 leaves:
   pepr prune tree.nwk ref.align -o results

2. Ten prunings on four threads:
   pepr prune tree.nwk ref.align -o results --count 10 --min 5 -p 4
"###,
        )
        .arg(
            Arg::new("tree")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input tree file in Newick format"),
        )
        .arg(
            Arg::new("alignment")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Reference alignment in FASTA format"),
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
            Arg::new("min")
                .long("min")
                .num_args(1)
                .default_value("10")
                .value_parser(value_parser!(usize))
                .help("Minimum number of leaves every pruning must leave behind"),
        )
        .arg(
            Arg::new("count")
                .long("count")
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of prunings to perform"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .num_args(1)
                .default_value("42")
                .value_parser(value_parser!(u64))
                .help("Random seed for candidate selection"),
        )
        .arg(
            Arg::new("parallel")
                .long("parallel")
                .short('p')
                .num_args(1)
                .default_value("1")
                .value_parser(value_parser!(usize))
                .help("Number of threads for parallel processing"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let infile = args.get_one::<String>("tree").unwrap();
    let alnfile = args.get_one::<String>("alignment").unwrap();

    let config = RunConfig {
        outdir: args.get_one::<String>("outdir").unwrap().to_string(),
        min_remaining: *args.get_one::<usize>("min").unwrap(),
        count: *args.get_one::<usize>("count").unwrap(),
        seed: *args.get_one::<u64>("seed").unwrap(),
        parallel: *args.get_one::<usize>("parallel").unwrap(),
    };

    //----------------------------
    // Process
    //----------------------------
    let trees = Tree::from_file(infile)?;
    let tree = match trees.first() {
        Some(tree) => tree,
        None => return Err(anyhow::anyhow!("No tree found in {}", infile)),
    };
    let alignment = Alignment::from_file(alnfile)?;

    let report = run(tree, &alignment, &config)?;

    if !report.failures.is_empty() {
        return Err(anyhow::anyhow!(
            "{} of {} prunings failed",
            report.failures.len(),
            report.effective
        ));
    }

    Ok(())
}
