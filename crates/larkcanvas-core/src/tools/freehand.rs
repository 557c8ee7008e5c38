//! Freehand drawing tool.

use super::{Tool, ToolAction};
use crate::input::PointerEvent;
use crate::scene::{NodeAttrs, NodeId, NodeKind, Rgba, SceneNode};
use crate::stage::Stage;

/// Stroke width of freehand lines.
pub const FREEHAND_STROKE_WIDTH: f64 = 3.0;

/// Draws a polyline node while the pointer is held down.
#[derive(Default)]
pub struct FreehandTool {
    drawing: bool,
    current: Option<NodeId>,
}

impl FreehandTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn append_point(&self, stage: &mut Stage, event: &PointerEvent) {
        let Some(id) = self.current else {
            return;
        };
        let position = event.position();
        if let Some(node) = stage.editable_layer_mut().and_then(|layer| layer.node_mut(id)) {
            node.attrs.points.push(position);
        }
    }
}

impl Tool for FreehandTool {
    fn name(&self) -> &'static str {
        "freehand"
    }

    fn on_deselect(&mut self, _stage: &mut Stage) {
        self.drawing = false;
        self.current = None;
    }

    fn on_pointer_down(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        self.drawing = true;

        if self.current.is_none() {
            let line = SceneNode::new(
                NodeKind::Line,
                NodeAttrs {
                    stroke: Some(Rgba::black()),
                    stroke_width: Some(FREEHAND_STROKE_WIDTH),
                    ..NodeAttrs::default()
                },
            );
            self.current = stage.add_node(line);
        }

        self.append_point(stage, event);
        ToolAction::None
    }

    fn on_pointer_move(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        if self.drawing {
            self.append_point(stage, event);
        }
        ToolAction::None
    }

    fn on_pointer_up(&mut self, _stage: &mut Stage, _event: &PointerEvent) -> ToolAction {
        self.drawing = false;
        self.current = None;
        ToolAction::None
    }
}
