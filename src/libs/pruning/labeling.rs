use super::error::PruneError;
use crate::libs::phylo::{NodeId, Tree};

/// Post-order annotation layer over a parsed tree.
///
/// Arena ids are assigned at parse time with parents before children; the
/// distance tables and output files are instead keyed by a 0-based id that
/// increases in post-order (children strictly before their parent). This
/// struct holds the two-way mapping plus the derived display labels.
#[derive(Debug, Clone)]
pub struct Labeling {
    /// Arena ids in post-order
    pub order: Vec<NodeId>,
    /// Post-order id, indexed by arena id
    pub assigned: Vec<usize>,
    /// Arena id, indexed by post-order id
    pub arena_of: Vec<NodeId>,
    /// Display label, indexed by post-order id
    pub labels: Vec<String>,
    /// Number of leaves in the subtree of each node, indexed by arena id
    pub leaves_under: Vec<usize>,
    pub rooted: bool,
    pub leaf_count: usize,
}

/// Number the tree in post-order and derive display labels.
///
/// Leaves get `Leaf_{k}__{name}` with `k` counting leaves from 1 in
/// post-order, internal nodes get `Node_{k}__{name}`, and the top node
/// gets `Root___{name}` or `FakeRoot___{name}` depending on the
/// rooted/unrooted classification. `name` may be empty.
///
/// Expects a freshly parsed tree whose arena ids are contiguous.
pub fn label(tree: &Tree) -> Result<Labeling, PruneError> {
    let root = match tree.get_root() {
        Some(id) => id,
        None => {
            return Err(PruneError::MalformedTree {
                leaves: 0,
                nodes: 0,
            })
        }
    };
    let order = tree.postorder(&root).unwrap_or_default();

    let n = order.len();
    let leaf_count = order
        .iter()
        .filter(|&&id| tree.get_node(id).map(|node| node.is_leaf()).unwrap_or(false))
        .count();

    // Rooted trees have N == 2L-1 nodes, unrooted N == 2L-2. Compared
    // addition-side to stay in usize.
    let rooted = if n + 1 == 2 * leaf_count {
        true
    } else if n + 2 == 2 * leaf_count {
        false
    } else {
        return Err(PruneError::MalformedTree {
            leaves: leaf_count,
            nodes: n,
        });
    };

    let mut assigned = vec![0usize; n];
    let mut arena_of = vec![0usize; n];
    let mut labels = Vec::with_capacity(n);
    let mut leaves_under = vec![0usize; n];

    let mut leaf_counter = 0usize;
    let mut node_counter = 0usize;

    for (aid, &id) in order.iter().enumerate() {
        let node = tree.get_node(id).unwrap();
        assigned[id] = aid;
        arena_of[aid] = id;

        let name = node.name.clone().unwrap_or_default();
        // Leaf wins over top node: the only node of a single-leaf tree
        // is numbered as a leaf
        let label = if node.is_leaf() {
            leaf_counter += 1;
            format!("Leaf_{}__{}", leaf_counter, name)
        } else if id == root {
            if rooted {
                format!("Root___{}", name)
            } else {
                format!("FakeRoot___{}", name)
            }
        } else {
            node_counter += 1;
            format!("Node_{}__{}", node_counter, name)
        };
        labels.push(label);

        // Post-order finishes every child before its parent, so subtree
        // leaf counts accumulate in the same pass
        leaves_under[id] = if node.is_leaf() {
            1
        } else {
            node.children.iter().map(|&c| leaves_under[c]).sum()
        };
    }

    Ok(Labeling {
        order,
        assigned,
        arena_of,
        labels,
        leaves_under,
        rooted,
        leaf_count,
    })
}
