//! Subcommand modules for the `pepr` binary.

pub mod label;
pub mod prune;
pub mod split;
