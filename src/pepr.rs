extern crate clap;
use clap::*;

mod cmd_pepr;

fn main() -> anyhow::Result<()> {
    let app = Command::new("pepr")
        .version(crate_version!())
        .about("`pepr` - Pruning-based Evaluation of Placement")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_pepr::prune::make_subcommand())
        .subcommand(cmd_pepr::label::make_subcommand())
        .subcommand(cmd_pepr::split::make_subcommand())
        .after_help(
            r###"Subcommands:

* prune - remove subtrees, write pruned trees, query reads and the
          ground-truth distance tables
* label - inspect the post-order ids and labels the tables are keyed by
* split - turn a query FASTA into one file per read

"###,
        );

    // Check which subcommand the user ran...
    match app.get_matches().subcommand() {
        Some(("prune", sub_matches)) => cmd_pepr::prune::execute(sub_matches),
        Some(("label", sub_matches)) => cmd_pepr::label::execute(sub_matches),
        Some(("split", sub_matches)) => cmd_pepr::split::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
