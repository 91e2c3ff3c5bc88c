use super::error::PruneError;
use super::labeling::Labeling;
use super::selector::PruningCandidate;
use crate::libs::phylo::tree::traversal;
use crate::libs::phylo::{NodeId, Tree};

/// Per-pruning difficulty entry: how much evolutionary signal the pruning
/// removes.
#[derive(Debug, Clone)]
pub struct DifficultyRecord {
    /// Post-order id of the pruned node
    pub pruned_id: usize,
    pub label: String,
    /// Branch length of the pruned node plus all of its descendants
    pub difficulty: f64,
}

/// Edge counts from the root, indexed by arena id. Computed once per run
/// and shared read-only across candidates.
pub fn depths(tree: &Tree) -> Vec<usize> {
    let mut depth = vec![0usize; tree.len()];
    if let Some(root) = tree.get_root() {
        // Preorder guarantees the parent's depth is set before the child's
        for id in traversal::preorder(tree, root) {
            if let Some(parent) = tree.get_node(id).and_then(|n| n.parent) {
                depth[id] = depth[parent] + 1;
            }
        }
    }
    depth
}

/// Distance rows and difficulty for one pruning candidate.
///
/// Cells are ordered by post-order id. The candidate and its descendants
/// are masked with `-1`/`-1.0`; the candidate's former parent reads as the
/// attachment point (0 hops, its own branch length); every other cell is
/// the topological / patristic distance from the candidate to that node.
pub fn compute(
    tree: &Tree,
    labeling: &Labeling,
    depth: &[usize],
    candidate: &PruningCandidate,
) -> Result<(Vec<i64>, Vec<f64>, DifficultyRecord), PruneError> {
    let parent = match tree.get_node(candidate.node_id).and_then(|n| n.parent) {
        Some(p) => p,
        None => {
            return Err(PruneError::NonPrunable(
                labeling.labels[candidate.assigned_id].clone(),
            ))
        }
    };
    let parent_length = tree.get_node(parent).and_then(|n| n.length).unwrap_or(0.0);

    let n = labeling.order.len();
    let mut node_row = Vec::with_capacity(n);
    let mut branch_row = Vec::with_capacity(n);

    // Difficulty accumulates in ascending id order so that repeated runs
    // sum in the same order and stay bit-identical
    let mut difficulty = 0.0f64;

    for aid in 0..n {
        if candidate.descendant_ids.contains(&aid) {
            node_row.push(-1);
            branch_row.push(-1.0);
            difficulty += edge(tree, labeling.arena_of[aid]);
            continue;
        }

        let arena = labeling.arena_of[aid];
        if arena == parent {
            node_row.push(0);
            branch_row.push(parent_length);
            continue;
        }

        let (hops, length) = path_distance(tree, depth, candidate.node_id, arena);
        node_row.push(hops as i64);
        branch_row.push(length);
    }

    Ok((
        node_row,
        branch_row,
        DifficultyRecord {
            pruned_id: candidate.assigned_id,
            label: labeling.labels[candidate.assigned_id].clone(),
            difficulty,
        },
    ))
}

/// Hop count and patristic distance between two nodes: lift the deeper
/// side to the shallower one, then both in lockstep until they meet at the
/// lowest common ancestor, summing edge lengths on the way up.
fn path_distance(tree: &Tree, depth: &[usize], a: NodeId, b: NodeId) -> (usize, f64) {
    let mut u = a;
    let mut v = b;
    let mut hops = 0usize;
    let mut length = 0.0f64;

    while depth[u] > depth[v] {
        length += edge(tree, u);
        hops += 1;
        match tree.get_node(u).and_then(|n| n.parent) {
            Some(p) => u = p,
            None => break,
        }
    }
    while depth[v] > depth[u] {
        length += edge(tree, v);
        hops += 1;
        match tree.get_node(v).and_then(|n| n.parent) {
            Some(p) => v = p,
            None => break,
        }
    }
    while u != v {
        length += edge(tree, u) + edge(tree, v);
        hops += 2;
        let up = tree.get_node(u).and_then(|n| n.parent);
        let vp = tree.get_node(v).and_then(|n| n.parent);
        match (up, vp) {
            (Some(x), Some(y)) => {
                u = x;
                v = y;
            }
            _ => break,
        }
    }

    (hops, length)
}

fn edge(tree: &Tree, id: NodeId) -> f64 {
    tree.get_node(id).and_then(|n| n.length).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::pruning::labeling::label;
    use crate::libs::pruning::selector::select;
    use approx::assert_relative_eq;

    const SIX_LEAVES: &str =
        "((A:0.1,B:0.2):0.3,((C:0.4,D:0.5):0.6,(E:0.7,F:0.8):0.9):1.0);";

    fn candidate_by_id(
        tree: &Tree,
        labeling: &Labeling,
        assigned_id: usize,
    ) -> PruningCandidate {
        select(tree, labeling, 0, 100, 42)
            .into_iter()
            .find(|c| c.assigned_id == assigned_id)
            .unwrap()
    }

    #[test]
    fn test_depths() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let depth = depths(&tree);

        let root = tree.get_root().unwrap();
        assert_eq!(depth[root], 0);

        let labeling = label(&tree).unwrap();
        // Leaves A..F sit two or three edges below the root
        assert_eq!(depth[labeling.arena_of[0]], 2); // A
        assert_eq!(depth[labeling.arena_of[3]], 3); // C
        assert_eq!(depth[labeling.arena_of[9]], 1); // CDEF clade
    }

    #[test]
    fn test_compute_leaf_candidate() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        // Prune leaf A (post-order id 0); its parent is the AB clade (id 2)
        let cand = candidate_by_id(&tree, &labeling, 0);
        let (node_row, branch_row, diff) =
            compute(&tree, &labeling, &depth, &cand).unwrap();

        assert_eq!(node_row.len(), 11);

        // Masked: only A itself
        assert_eq!(node_row[0], -1);
        assert_eq!(branch_row[0], -1.0);

        // Former parent: 0 hops, its own branch length
        assert_eq!(node_row[2], 0);
        assert_relative_eq!(branch_row[2], 0.3, epsilon = 1e-9);

        // Sibling B: two hops through the parent
        assert_eq!(node_row[1], 2);
        assert_relative_eq!(branch_row[1], 0.3, epsilon = 1e-9);

        // Root: A -> AB -> root
        assert_eq!(node_row[10], 2);
        assert_relative_eq!(branch_row[10], 0.4, epsilon = 1e-9);

        // C: A -> AB -> root -> CDEF -> CD -> C
        assert_eq!(node_row[3], 5);
        assert_relative_eq!(branch_row[3], 2.4, epsilon = 1e-9);

        assert_eq!(diff.pruned_id, 0);
        assert_eq!(diff.label, "Leaf_1__A");
        assert_relative_eq!(diff.difficulty, 0.1, epsilon = 1e-9);
    }

    #[test]
    fn test_compute_internal_candidate() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        // Prune the CD clade (post-order id 5)
        let cand = candidate_by_id(&tree, &labeling, 5);
        let (node_row, branch_row, diff) =
            compute(&tree, &labeling, &depth, &cand).unwrap();

        // Masked block is exactly C, D and the clade itself
        for aid in [3, 4, 5] {
            assert_eq!(node_row[aid], -1);
            assert_eq!(branch_row[aid], -1.0);
        }
        assert_eq!(node_row.iter().filter(|&&v| v == -1).count(), 3);

        // Former parent is the CDEF clade (id 9)
        assert_eq!(node_row[9], 0);
        assert_relative_eq!(branch_row[9], 1.0, epsilon = 1e-9);

        // E: CD -> CDEF -> EF -> E
        assert_eq!(node_row[6], 3);
        assert_relative_eq!(branch_row[6], 2.2, epsilon = 1e-9);

        // A: CD -> CDEF -> root -> AB -> A
        assert_eq!(node_row[0], 4);
        assert_relative_eq!(branch_row[0], 2.0, epsilon = 1e-9);

        // Removed signal: 0.6 + 0.4 + 0.5
        assert_relative_eq!(diff.difficulty, 1.5, epsilon = 1e-9);
    }

    #[test]
    fn test_compute_parent_without_length() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        // The AB clade's parent is the unannotated root
        let cand = candidate_by_id(&tree, &labeling, 2);
        let (node_row, branch_row, _) =
            compute(&tree, &labeling, &depth, &cand).unwrap();

        assert_eq!(node_row[10], 0);
        assert_eq!(branch_row[10], 0.0);
    }

    #[test]
    fn test_mask_equals_descendants() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        for cand in select(&tree, &labeling, 0, 100, 42) {
            let (node_row, branch_row, _) =
                compute(&tree, &labeling, &depth, &cand).unwrap();

            let masked: std::collections::HashSet<usize> = node_row
                .iter()
                .enumerate()
                .filter(|(_, &v)| v == -1)
                .map(|(aid, _)| aid)
                .collect();
            assert_eq!(masked, cand.descendant_ids);

            // Branch row masks the same cells
            for (aid, &v) in branch_row.iter().enumerate() {
                assert_eq!(v == -1.0, masked.contains(&aid));
            }
        }
    }

    #[test]
    fn test_compute_agrees_with_tree_distance() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        let cand = candidate_by_id(&tree, &labeling, 0);
        let (node_row, branch_row, _) =
            compute(&tree, &labeling, &depth, &cand).unwrap();

        let parent = tree.get_node(cand.node_id).unwrap().parent.unwrap();
        for aid in 0..labeling.order.len() {
            let arena = labeling.arena_of[aid];
            if cand.descendant_ids.contains(&aid) || arena == parent {
                continue;
            }
            let (w, t) = tree.get_distance(&cand.node_id, &arena).unwrap();
            assert_eq!(node_row[aid], t as i64);
            assert_relative_eq!(branch_row[aid], w, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_compute_idempotent() {
        let tree = Tree::from_newick(SIX_LEAVES).unwrap();
        let labeling = label(&tree).unwrap();
        let depth = depths(&tree);

        let cand = candidate_by_id(&tree, &labeling, 5);
        let first = compute(&tree, &labeling, &depth, &cand).unwrap();
        let second = compute(&tree, &labeling, &depth, &cand).unwrap();

        assert_eq!(first.0, second.0);
        assert_eq!(first.1, second.1);
        assert_eq!(first.2.difficulty.to_bits(), second.2.difficulty.to_bits());
    }
}
