use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Ancestor chain of `id`, root first, `id` last. Fails when `id` is
/// unknown or its chain does not reach the current root.
pub fn get_path_from_root(tree: &Tree, id: &NodeId) -> Result<Vec<NodeId>, String> {
    if tree.get_node(*id).is_none() {
        return Err(format!("Node {} not found", id));
    }

    let mut path = vec![*id];
    let mut cursor = tree.nodes[*id].parent;
    while let Some(up) = cursor {
        path.push(up);
        cursor = tree.nodes[up].parent;
    }
    path.reverse();

    match tree.root {
        Some(root) if path[0] != root => Err("Node is detached from root".to_string()),
        _ => Ok(path),
    }
}

/// Lowest common ancestor of two nodes, found by walking their root
/// paths in lockstep until they diverge.
pub fn get_common_ancestor(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    let shared = path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .count();

    if shared == 0 {
        return Err("Nodes are not in the same tree (no common ancestor)".to_string());
    }
    Ok(path_a[shared - 1])
}

/// Distance between two nodes as `(branch length sum, edge count)`.
/// Both are accumulated over the edges below the common ancestor; a
/// missing branch length counts as zero.
pub fn get_distance(tree: &Tree, a: &NodeId, b: &NodeId) -> Result<(f64, usize), String> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    let shared = path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .count();
    if shared == 0 {
        return Err("Nodes are not in the same tree (no common ancestor)".to_string());
    }

    let weighted: f64 = path_a[shared..]
        .iter()
        .chain(path_b[shared..].iter())
        .map(|&id| tree.nodes[id].length.unwrap_or(0.0))
        .sum();
    let topo = (path_a.len() - shared) + (path_b.len() - shared);

    Ok((weighted, topo))
}
