pub mod distance;
pub mod error;
pub mod labeling;
pub mod partition;
pub mod run;
pub mod selector;

pub use error::PruneError;
pub use labeling::{label, Labeling};
pub use run::{run, RunConfig, RunReport};
pub use selector::{select, PruningCandidate};
