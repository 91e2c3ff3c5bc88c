use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::SeedableRng;

use super::labeling::Labeling;
use crate::libs::phylo::tree::{stat, traversal};
use crate::libs::phylo::{NodeId, Tree};

/// One selected node to remove, with everything downstream consumers need
/// precomputed against the original tree.
#[derive(Debug, Clone)]
pub struct PruningCandidate {
    /// Arena id of the chosen node
    pub node_id: NodeId,
    /// Its post-order id
    pub assigned_id: usize,
    /// Post-order ids of the node and all of its descendants
    pub descendant_ids: HashSet<usize>,
    /// Leaf names under the node, in tree order; the node's own name when
    /// it is itself a leaf
    pub descendant_leaf_names: Vec<String>,
}

/// Pick up to `count` prunable nodes under a seeded shuffle.
///
/// The post-order node list is shuffled with `seed` and scanned in that
/// order; acceptance order is the shuffled order. A node qualifies when
/// pruning it leaves at least `min_remaining` leaves behind; the top node
/// never qualifies. Fewer than `count` results means the list was
/// exhausted; the caller decides how to surface that.
///
/// Every candidate is evaluated against the original tree. Candidates are
/// independent experiments, not a cumulative pruning sequence.
pub fn select(
    tree: &Tree,
    labeling: &Labeling,
    min_remaining: usize,
    count: usize,
    seed: u64,
) -> Vec<PruningCandidate> {
    let mut shuffled = labeling.order.clone();
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    shuffled.shuffle(&mut rng);

    let mut candidates = Vec::new();
    for &id in &shuffled {
        if candidates.len() >= count {
            break;
        }

        let node = match tree.get_node(id) {
            Some(node) => node,
            None => continue,
        };
        // The top node leaves nothing to reattach to
        if node.parent.is_none() {
            continue;
        }
        // Written addition-side so an oversized min_remaining cannot underflow
        if labeling.leaves_under[id] + min_remaining > labeling.leaf_count {
            continue;
        }

        let sub = traversal::preorder(tree, id);
        let descendant_ids: HashSet<usize> =
            sub.iter().map(|&sid| labeling.assigned[sid]).collect();
        let descendant_leaf_names: Vec<String> = stat::get_leaf_names(tree, id)
            .into_iter()
            .flatten()
            .collect();

        candidates.push(PruningCandidate {
            node_id: id,
            assigned_id: labeling.assigned[id],
            descendant_ids,
            descendant_leaf_names,
        });
    }

    candidates
}
