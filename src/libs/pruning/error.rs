use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PruneError {
    /// Leaf/node counts match neither the rooted nor the unrooted formula
    MalformedTree { leaves: usize, nodes: usize },
    /// The node has no parent, so there is no attachment point left after
    /// removing it
    NonPrunable(String),
    /// A pruning left the kept or the removed sequence group empty
    EmptyPartition { kept: usize, removed: usize },
    /// An alignment id that is not a leaf name of the tree
    UnknownSequence(String),
}

impl fmt::Display for PruneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PruneError::MalformedTree { leaves, nodes } => {
                write!(
                    f,
                    "Malformed tree: {} nodes for {} leaves matches neither a rooted (2L-1) nor an unrooted (2L-2) topology",
                    nodes, leaves
                )
            }
            PruneError::NonPrunable(label) => {
                write!(f, "Node {} has no parent to reattach to", label)
            }
            PruneError::EmptyPartition { kept, removed } => {
                write!(
                    f,
                    "Pruning splits the alignment into {} kept and {} removed sequences; both groups must be non-empty",
                    kept, removed
                )
            }
            PruneError::UnknownSequence(id) => {
                write!(f, "Sequence id \"{}\" is not a leaf of the tree", id)
            }
        }
    }
}

impl std::error::Error for PruneError {}
