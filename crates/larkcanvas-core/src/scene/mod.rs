//! Scene model for the whiteboard.

mod layer;
mod node;
mod surface;
mod transformer;

pub use layer::Layer;
pub use node::{
    note_scene_func, point_to_polyline_dist, point_to_segment_dist, NodeAttrs, NodeId, NodeKind,
    Rgba, SceneFunc, SceneNode,
};
pub use surface::{ContainerHandle, StageSurface};
pub use transformer::{Anchor, Transformer};
