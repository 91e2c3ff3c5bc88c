use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Leaf ids under `id`, left to right. Preorder visits leaves in the
/// same order they appear in the source Newick.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    super::traversal::preorder(tree, id)
        .into_iter()
        .filter(|&n| tree.get_node(n).is_some_and(|node| node.is_leaf()))
        .collect()
}

/// Names of the leaves under `id`, in the same order as [`get_leaves`].
pub fn get_leaf_names(tree: &Tree, id: NodeId) -> Vec<Option<String>> {
    get_leaves(tree, id)
        .into_iter()
        .map(|leaf| tree.get_node(leaf).and_then(|n| n.name.clone()))
        .collect()
}
