use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Attach `child_id` under `parent_id`, updating both sides of the
/// link. The child must currently be parentless.
pub fn add_child(tree: &mut Tree, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
    if parent_id == child_id {
        return Err(format!("Node {} cannot be its own parent", parent_id));
    }
    for id in [parent_id, child_id] {
        if tree.get_node(id).is_none() {
            return Err(format!("Node {} not found or deleted", id));
        }
    }
    if let Some(existing) = tree.nodes[child_id].parent {
        return Err(format!(
            "Node {} is already attached to {}",
            child_id, existing
        ));
    }

    tree.nodes[child_id].parent = Some(parent_id);
    tree.nodes[parent_id].children.push(child_id);
    Ok(())
}

/// Detach a node. With `recursive` the whole subtree is detached;
/// otherwise the children survive as parentless orphans.
///
/// Slots are never reused, so ids held elsewhere (a pruning candidate
/// located in a cloned tree, say) keep meaning the same node.
pub fn remove_node(tree: &mut Tree, id: NodeId, recursive: bool) {
    if tree.get_node(id).is_none() {
        return;
    }

    // Unhook from the parent's child list first
    if let Some(parent_id) = tree.nodes[id].parent {
        if let Some(parent) = tree.get_node_mut(parent_id) {
            parent.children.retain(|&c| c != id);
        }
    }

    if recursive {
        let mut stack = vec![id];
        while let Some(curr) = stack.pop() {
            stack.extend(std::mem::take(&mut tree.nodes[curr].children));
            let node = &mut tree.nodes[curr];
            node.deleted = true;
            node.parent = None;
            if tree.root == Some(curr) {
                tree.root = None;
            }
        }
    } else {
        for child_id in std::mem::take(&mut tree.nodes[id].children) {
            tree.nodes[child_id].parent = None;
        }
        let node = &mut tree.nodes[id];
        node.deleted = true;
        node.parent = None;
        if tree.root == Some(id) {
            tree.root = None;
        }
    }
}
