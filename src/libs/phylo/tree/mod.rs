pub mod io;
pub mod ops;
pub mod query;
pub mod stat;
pub mod traversal;

use super::node::{Node, NodeId};

/// An arena-backed phylogenetic tree. Nodes live in a flat `Vec` and
/// refer to each other by index, so ids stay valid for the lifetime of
/// the tree. Removal marks slots as detached instead of shifting later
/// ids.
#[derive(Debug, Default, Clone)]
pub struct Tree {
    pub(super) nodes: Vec<Node>,
    pub(super) root: Option<NodeId>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the next arena slot and return its id.
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Node::new(id));
        id
    }

    /// Count of live (not detached) nodes.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    /// Look up a live node. Detached slots read as absent.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    /// Mark `id` as the root. A detached or unknown id is ignored.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    /// Link an existing node under a parent. See [`ops::add_child`].
    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), String> {
        ops::add_child(self, parent_id, child_id)
    }

    /// Detach a node, and optionally its whole subtree. See
    /// [`ops::remove_node`].
    pub fn remove_node(&mut self, id: NodeId, recursive: bool) {
        ops::remove_node(self, id, recursive)
    }

    pub fn preorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, String> {
        Ok(traversal::preorder(self, *start_node))
    }

    pub fn postorder(&self, start_node: &NodeId) -> Result<Vec<NodeId>, String> {
        Ok(traversal::postorder(self, *start_node))
    }

    /// Ancestors of `id` from the root down, ending at `id` itself.
    pub fn get_path_from_root(&self, id: &NodeId) -> Result<Vec<NodeId>, String> {
        query::get_path_from_root(self, id)
    }

    pub fn get_common_ancestor(&self, a: &NodeId, b: &NodeId) -> Result<NodeId, String> {
        query::get_common_ancestor(self, a, b)
    }

    /// Patristic distance and topological hop count between two nodes.
    pub fn get_distance(&self, a: &NodeId, b: &NodeId) -> Result<(f64, usize), String> {
        query::get_distance(self, a, b)
    }

    /// Leaf ids in left-to-right order, empty if no root is set.
    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => stat::get_leaves(self, root),
            None => Vec::new(),
        }
    }

    pub fn get_leaf_names(&self) -> Vec<Option<String>> {
        match self.root {
            Some(root) => stat::get_leaf_names(self, root),
            None => Vec::new(),
        }
    }

    pub fn from_file(infile: &str) -> anyhow::Result<Vec<Tree>> {
        io::from_file(infile)
    }

    pub fn to_newick(&self) -> String {
        io::to_newick(self)
    }
}
