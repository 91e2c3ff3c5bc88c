/// Index into the tree's arena. Plain `usize`, cheap to copy and pass
/// around.
pub type NodeId = usize;

/// One arena slot. Structure (`parent`, `children`) and payload
/// (`name`, `length`) are plain public fields; the tree methods only
/// guard the structure.
#[derive(Debug, Clone)]
pub struct Node {
    /// This node's own arena index
    pub id: NodeId,

    /// `None` for the root and for orphans
    pub parent: Option<NodeId>,

    pub children: Vec<NodeId>,

    /// Taxon name on leaves; internal nodes usually have none
    pub name: Option<String>,

    /// Length of the branch leading up to the parent
    pub length: Option<f64>,

    /// Detached flag. Slots stay in the arena after removal so ids held
    /// elsewhere keep pointing at the same node.
    pub deleted: bool,
}

impl Node {
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            parent: None,
            children: Vec::new(),
            name: None,
            length: None,
            deleted: false,
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}
