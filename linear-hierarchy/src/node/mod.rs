//! Hierarchy nodes and the document schema they are ingested from.

mod schema;

pub use schema::{NodeKey, NodeKind, parse_document, parse_value};

/// One entry in the navigable tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Node {
    pub name: String,
    pub kind: NodeKind,
    /// Whether dynamic children may be added under this node.
    pub editable: bool,
    pub children: Vec<Node>,
}

impl Node {
    /// Create a static leaf.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Create a dynamic leaf, as inserted at navigation time.
    pub fn dynamic(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: NodeKind::Dynamic,
            ..Default::default()
        }
    }

    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    pub fn editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn is_dynamic(&self) -> bool {
        self.kind == NodeKind::Dynamic
    }
}
