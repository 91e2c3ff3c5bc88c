pub mod fasta;
pub mod io;
pub mod phylo;
pub mod pruning;
