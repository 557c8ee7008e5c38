//! Snapshot codec: serialize the editable layer and rebuild it.
//!
//! A snapshot is a structured JSON document (the layer's node tree), not a
//! string. Snapshots are immutable once captured and compared by deep
//! structural equality, which makes the history and autosave redundancy
//! guards effective.

use crate::loader::ImageLoader;
use crate::scene::{note_scene_func, Layer, NodeKind, SceneNode, Transformer};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Snapshot errors.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to parse snapshot data: {0}")]
    Malformed(#[source] serde_json::Error),
    #[error("invalid snapshot: missing children collection")]
    Invalid,
}

/// An immutable serialized form of the editable layer at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Value);

impl Snapshot {
    /// Wrap an already-structured document.
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    /// Parse the string encoding of a snapshot.
    pub fn parse(text: &str) -> Result<Self, SnapshotError> {
        serde_json::from_str(text)
            .map(Self)
            .map_err(SnapshotError::Malformed)
    }

    /// The underlying document.
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// The child node descriptors, if the document has any.
    pub fn children(&self) -> Option<&Vec<Value>> {
        self.0.get("children").and_then(Value::as_array)
    }

    /// String encoding of this snapshot.
    pub fn to_json(&self) -> String {
        self.0.to_string()
    }
}

/// Input accepted by [`restore`]: a structured document or its string
/// encoding.
#[derive(Debug, Clone)]
pub enum SnapshotData {
    Document(Snapshot),
    Text(String),
}

impl From<Snapshot> for SnapshotData {
    fn from(snapshot: Snapshot) -> Self {
        SnapshotData::Document(snapshot)
    }
}

impl From<String> for SnapshotData {
    fn from(text: String) -> Self {
        SnapshotData::Text(text)
    }
}

impl From<&str> for SnapshotData {
    fn from(text: &str) -> Self {
        SnapshotData::Text(text.to_string())
    }
}

/// Serialize the layer into a snapshot.
///
/// Every image node's persisted `src` attribute is first rewritten to its
/// loaded resource locator so the snapshot is self-contained. Returns `None`
/// when the layer cannot be serialized.
pub fn capture(layer: &mut Layer) -> Option<Snapshot> {
    for node in layer.nodes_mut() {
        if node.kind == NodeKind::Image {
            if let Some(resource) = &node.resource {
                node.attrs.src = Some(resource.src.clone());
            }
        }
    }

    match serde_json::to_value(&*layer) {
        Ok(value) => Some(Snapshot(value)),
        Err(err) => {
            log::error!("Failed to serialize layer: {}", err);
            None
        }
    }
}

/// Rebuild the layer from a snapshot (destructive replace, not merge).
///
/// The input is validated before anything is touched: a string that fails to
/// parse or a document without a `children` collection returns an error with
/// the layer intact. On success the selection is cleared, the layer's
/// children are destroyed, and the node tree is rebuilt: image descriptors
/// load their resource concurrently through `loader` (a failed load drops
/// that node but never the batch), all other descriptors go through the
/// generic node constructor with per-node failures skipped. Finally note
/// nodes get their render function re-bound and the layer is redrawn.
///
/// Calling this twice with the same snapshot yields an equivalent layer; it
/// is not atomic, so a partial failure leaves a partially rebuilt layer.
pub async fn restore(
    layer: &mut Layer,
    transformer: &mut Transformer,
    data: SnapshotData,
    loader: &dyn ImageLoader,
) -> Result<(), SnapshotError> {
    let snapshot = match data {
        SnapshotData::Document(snapshot) => snapshot,
        SnapshotData::Text(text) => Snapshot::parse(&text)?,
    };

    let children = snapshot.children().ok_or(SnapshotError::Invalid)?.clone();

    transformer.clear();
    layer.destroy_children();

    let mut image_loads = Vec::new();

    for value in &children {
        let kind = value.get("kind").and_then(Value::as_str);
        let src = value
            .get("attrs")
            .and_then(|attrs| attrs.get("src"))
            .and_then(Value::as_str);

        if kind == Some("Image") && src.is_some() {
            let value = value.clone();
            let src = src.unwrap_or_default().to_string();
            image_loads.push(async move {
                let resource = match loader.load(&src).await {
                    Ok(resource) => resource,
                    Err(err) => {
                        log::error!("Failed to load image {}: {}", src, err);
                        return None;
                    }
                };
                match SceneNode::from_value(&value) {
                    Ok(mut node) => {
                        node.resource = Some(resource);
                        Some(node)
                    }
                    Err(err) => {
                        log::error!("Failed to create node: {}", err);
                        None
                    }
                }
            });
        } else {
            match SceneNode::from_value(value) {
                Ok(node) => {
                    layer.add(node);
                }
                Err(err) => log::error!("Failed to create node: {}", err),
            }
        }
    }

    for node in join_all(image_loads).await.into_iter().flatten() {
        layer.add(node);
    }

    for node in layer.nodes_mut() {
        if node.kind == NodeKind::Note {
            node.set_scene_func(note_scene_func);
        }
    }
    layer.draw();

    Ok(())
}
