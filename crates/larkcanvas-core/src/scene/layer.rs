//! The editable layer: an ordered collection of scene nodes.

use super::node::{NodeId, NodeKind, SceneNode};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A canvas layer holding drawable nodes in z-order (back to front).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    #[serde(rename = "children")]
    nodes: Vec<SceneNode>,
    /// Redraw counter; bumped by [`Layer::draw`]. Hosts compare revisions to
    /// know when to repaint.
    #[serde(skip)]
    revision: u64,
}

impl Layer {
    /// Create a new empty layer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the top of the layer.
    pub fn add(&mut self, node: SceneNode) -> NodeId {
        let id = node.id;
        self.nodes.push(node);
        id
    }

    /// Remove a node by id.
    pub fn remove(&mut self, id: NodeId) -> Option<SceneNode> {
        let index = self.nodes.iter().position(|n| n.id == id)?;
        Some(self.nodes.remove(index))
    }

    /// Get a node by id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get a mutable node by id.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        self.nodes.iter_mut().find(|n| n.id == id)
    }

    /// Nodes in z-order (back to front).
    pub fn nodes(&self) -> &[SceneNode] {
        &self.nodes
    }

    /// Mutable access to all nodes.
    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut SceneNode> {
        self.nodes.iter_mut()
    }

    /// Number of nodes in the layer.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the layer has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Destroy all child nodes.
    pub fn destroy_children(&mut self) {
        self.nodes.clear();
    }

    /// Request a repaint of this layer.
    pub fn draw(&mut self) {
        self.revision += 1;
    }

    /// Current redraw revision.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Topmost node at a point, if any.
    pub fn node_at_point(&self, point: Point, tolerance: f64) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|n| n.hit_test(point, tolerance))
            .map(|n| n.id)
    }

    /// Nodes of a given kind.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &SceneNode> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    /// Toggle draggability for every node.
    pub fn set_all_draggable(&mut self, draggable: bool) {
        for node in &mut self.nodes {
            node.attrs.draggable = draggable;
        }
    }
}
