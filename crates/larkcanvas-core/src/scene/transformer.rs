//! The shared selection/transform handle.
//!
//! One transformer lives on the overlay layer above the editable layer; the
//! pointer tool attaches it to whichever node is selected.

use super::node::NodeId;

/// Resize anchor positions around the selection box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    TopLeft,
    TopCenter,
    TopRight,
    MiddleLeft,
    MiddleRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl Anchor {
    /// All eight anchors.
    pub fn all() -> [Anchor; 8] {
        [
            Anchor::TopLeft,
            Anchor::TopCenter,
            Anchor::TopRight,
            Anchor::MiddleLeft,
            Anchor::MiddleRight,
            Anchor::BottomLeft,
            Anchor::BottomCenter,
            Anchor::BottomRight,
        ]
    }
}

/// Selection/transform handle state.
#[derive(Debug, Clone, Default)]
pub struct Transformer {
    nodes: Vec<NodeId>,
    enabled_anchors: Vec<Anchor>,
}

impl Transformer {
    /// Create a transformer with all anchors enabled and nothing attached.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            enabled_anchors: Anchor::all().to_vec(),
        }
    }

    /// Attach the transformer to the given nodes.
    pub fn set_nodes(&mut self, nodes: Vec<NodeId>) {
        self.nodes = nodes;
    }

    /// Attached node ids.
    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Detach from all nodes.
    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Whether any node is attached.
    pub fn has_selection(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Restrict which anchors are shown. An empty set disables resizing.
    pub fn set_enabled_anchors(&mut self, anchors: Vec<Anchor>) {
        self.enabled_anchors = anchors;
    }

    /// Currently enabled anchors.
    pub fn enabled_anchors(&self) -> &[Anchor] {
        &self.enabled_anchors
    }
}
