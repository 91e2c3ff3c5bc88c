use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Node ids in preorder, each node before its children. Detached ids
/// are skipped. Iterative, so depth is bounded by heap not stack.
pub fn preorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut out = Vec::new();
    let mut todo = vec![start_node];

    while let Some(id) = todo.pop() {
        if let Some(node) = tree.get_node(id) {
            out.push(id);
            // Reversed push keeps siblings in stored order
            todo.extend(node.children.iter().rev().copied());
        }
    }

    out
}

/// Node ids in postorder, children (in stored order) strictly before
/// their parent.
pub fn postorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    // Walk parent-first right-to-left, then flip
    let mut out = Vec::new();
    let mut todo = vec![start_node];

    while let Some(id) = todo.pop() {
        if let Some(node) = tree.get_node(id) {
            out.push(id);
            todo.extend(node.children.iter().copied());
        }
    }

    out.reverse();
    out
}
