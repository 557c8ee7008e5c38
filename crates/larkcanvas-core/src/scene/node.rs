//! Scene node model.
//!
//! Nodes carry their own `kind` tag so the rest of the crate never dispatches
//! on a rendering library's class hierarchy.

use crate::loader::ImageResource;
use kurbo::{BezPath, Point, Rect, RoundedRect, Shape as KurboShape};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Unique identifier for scene nodes.
pub type NodeId = Uuid;

/// Kind tag for a drawable node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    Rect,
    Line,
    Text,
    Note,
    Image,
}

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn black() -> Self {
        Self::new(0, 0, 0, 255)
    }

    pub fn white() -> Self {
        Self::new(255, 255, 255, 255)
    }
}

/// Attributes persisted with every node.
///
/// Which fields are meaningful depends on the node kind; absent fields stay
/// out of the serialized form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeAttrs {
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    /// Polyline points for line nodes.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<Point>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub padding: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Rgba>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<Rgba>,
    /// Resource locator for image nodes; rewritten from the loaded resource
    /// when the layer is serialized.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    pub draggable: bool,
}

/// Custom render function for a node.
///
/// Not serializable; snapshot restore re-binds it for note nodes after the
/// layer is rebuilt.
pub type SceneFunc = fn(&SceneNode) -> BezPath;

/// A drawable node in the editable layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneNode {
    #[serde(default = "Uuid::new_v4")]
    pub id: NodeId,
    pub kind: NodeKind,
    pub attrs: NodeAttrs,
    /// Loaded image resource for image nodes.
    #[serde(skip)]
    pub resource: Option<ImageResource>,
    #[serde(skip)]
    scene_func: Option<SceneFunc>,
}

impl SceneNode {
    /// Create a new node of the given kind.
    pub fn new(kind: NodeKind, attrs: NodeAttrs) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            attrs,
            resource: None,
            scene_func: None,
        }
    }

    /// Create an image node from a loaded resource.
    ///
    /// Display size defaults to the resource's pixel dimensions when known.
    pub fn image_from_resource(position: Point, resource: ImageResource) -> Self {
        let (width, height) = match resource.dimensions {
            Some((w, h)) => (Some(w as f64), Some(h as f64)),
            None => (None, None),
        };
        let attrs = NodeAttrs {
            x: position.x,
            y: position.y,
            width,
            height,
            src: Some(resource.src.clone()),
            ..NodeAttrs::default()
        };
        let mut node = Self::new(NodeKind::Image, attrs);
        node.resource = Some(resource);
        node
    }

    /// Generic constructor from a serialized node descriptor.
    pub fn from_value(value: &Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value.clone())
    }

    /// Bind a custom render function (used for sticky notes).
    pub fn set_scene_func(&mut self, func: SceneFunc) {
        self.scene_func = Some(func);
    }

    /// Whether a custom render function is bound.
    pub fn has_scene_func(&self) -> bool {
        self.scene_func.is_some()
    }

    /// Bounding box in canvas coordinates.
    pub fn bounds(&self) -> Rect {
        match self.kind {
            NodeKind::Line => {
                let mut bounds: Option<Rect> = None;
                for p in &self.attrs.points {
                    let r = Rect::new(p.x, p.y, p.x, p.y);
                    bounds = Some(match bounds {
                        Some(b) => b.union(r),
                        None => r,
                    });
                }
                bounds.unwrap_or_else(|| {
                    Rect::new(self.attrs.x, self.attrs.y, self.attrs.x, self.attrs.y)
                })
            }
            _ => {
                let width = self.attrs.width.unwrap_or(0.0);
                let height = self.attrs.height.unwrap_or(0.0);
                Rect::new(
                    self.attrs.x,
                    self.attrs.y,
                    self.attrs.x + width,
                    self.attrs.y + height,
                )
            }
        }
    }

    /// Check whether a point (in canvas coordinates) hits this node.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self.kind {
            NodeKind::Line => {
                let reach = tolerance + self.attrs.stroke_width.unwrap_or(1.0) / 2.0;
                point_to_polyline_dist(point, &self.attrs.points) <= reach
            }
            _ => self.bounds().inflate(tolerance, tolerance).contains(point),
        }
    }

    /// Path representation of this node.
    ///
    /// Uses the bound custom render function when present, otherwise the
    /// default path for the node kind.
    pub fn to_path(&self) -> BezPath {
        if let Some(func) = self.scene_func {
            return func(self);
        }
        match self.kind {
            NodeKind::Line => {
                let mut path = BezPath::new();
                let mut points = self.attrs.points.iter();
                if let Some(first) = points.next() {
                    path.move_to(*first);
                    for p in points {
                        path.line_to(*p);
                    }
                }
                path
            }
            _ => self.bounds().to_path(0.1),
        }
    }
}

/// Render function for sticky notes: a rounded paper rectangle behind the
/// text. Re-bound by snapshot restore because function pointers do not
/// serialize.
pub fn note_scene_func(node: &SceneNode) -> BezPath {
    const CORNER_RADIUS: f64 = 6.0;
    let bounds = node.bounds();
    RoundedRect::from_rect(bounds, CORNER_RADIUS).to_path(0.1)
}

/// Distance from a point to a line segment (a->b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = kurbo::Vec2::new(b.x - a.x, b.y - a.y);
    let pv = kurbo::Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    if points.len() == 1 {
        return point_to_segment_dist(point, points[0], points[0]);
    }
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}
