use clap::*;
use pepr::libs::phylo::Tree;
use pepr::libs::pruning::label;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("label")
        .about("Prints post-order ids and display labels")
        .after_help(
            r###"
Numbers every node in post-order (children before parents) and prints one
line per node: the 0-based id and its display label, tab separated. These
are the ids and labels used by the distance tables of `pepr prune`.

Labels encode the node's role:
* Leaf_{k}__{name} for leaves, k counting leaves from 1
* Node_{k}__{name} for internal nodes
* Root___{name} (rooted) or FakeRoot___{name} (unrooted) for the top node

A tree whose node count fits neither a rooted (2L-1) nor an unrooted
(2L-2) topology is rejected.

Examples:
1. Label a tree:
   pepr label tree.nwk

2. Read from stdin:
   cat tree.nwk | pepr label stdin
"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input tree file. [stdin] for standard input"),
        )
        .arg(
            Arg::new("outfile")
                .long("outfile")
                .short('o')
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    //----------------------------
    // Args
    //----------------------------
    let mut writer = pepr::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();

    //----------------------------
    // Process
    //----------------------------
    let trees = Tree::from_file(infile)?;
    for tree in &trees {
        let labeling = label(tree)?;
        for (aid, lab) in labeling.labels.iter().enumerate() {
            writer.write_fmt(format_args!("{}\t{}\n", aid, lab))?;
        }
    }

    Ok(())
}
