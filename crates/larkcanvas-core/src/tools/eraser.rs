//! Eraser tool: removes freehand lines under the pointer.

use super::{Tool, ToolAction, HIT_TOLERANCE};
use crate::input::PointerEvent;
use crate::scene::NodeKind;
use crate::stage::Stage;

/// Erases line nodes while the pointer is held down.
#[derive(Default)]
pub struct EraserTool {
    erasing: bool,
}

impl EraserTool {
    pub fn new() -> Self {
        Self::default()
    }

    fn erase(&self, stage: &mut Stage, event: &PointerEvent) {
        if !self.erasing {
            return;
        }
        let position = event.position();
        let Some(layer) = stage.editable_layer_mut() else {
            return;
        };
        if let Some(id) = layer.node_at_point(position, HIT_TOLERANCE) {
            // Only strokes are erasable; other nodes are deleted explicitly.
            if layer.node(id).is_some_and(|node| node.kind == NodeKind::Line) {
                layer.remove(id);
            }
        }
    }
}

impl Tool for EraserTool {
    fn name(&self) -> &'static str {
        "eraser"
    }

    fn on_deselect(&mut self, _stage: &mut Stage) {
        self.erasing = false;
    }

    fn on_pointer_down(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        self.erasing = true;
        self.erase(stage, event);
        ToolAction::None
    }

    fn on_pointer_move(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        self.erase(stage, event);
        ToolAction::None
    }

    fn on_pointer_up(&mut self, _stage: &mut Stage, _event: &PointerEvent) -> ToolAction {
        self.erasing = false;
        ToolAction::None
    }
}
