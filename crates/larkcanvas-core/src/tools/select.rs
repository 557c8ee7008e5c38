//! Pointer tool: selection and transform handling.

use super::{Tool, ToolAction, HIT_TOLERANCE};
use crate::feedback::UiFeedback;
use crate::input::PointerEvent;
use crate::scene::{Anchor, NodeKind};
use crate::stage::Stage;

/// Selects nodes with the pointer and attaches the shared transformer.
#[derive(Default)]
pub struct SelectTool;

impl SelectTool {
    pub fn new() -> Self {
        Self
    }
}

impl Tool for SelectTool {
    fn name(&self) -> &'static str {
        "select"
    }

    fn on_select(&mut self, stage: &mut Stage) {
        if let Some(layer) = stage.editable_layer_mut() {
            layer.set_all_draggable(true);
        }
    }

    fn on_deselect(&mut self, stage: &mut Stage) {
        stage.transformer_mut().clear();
        if let Some(layer) = stage.editable_layer_mut() {
            layer.set_all_draggable(false);
        }
        stage.feedback().selection_cleared();
    }

    fn on_pointer_down(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        stage
            .transformer_mut()
            .set_enabled_anchors(Anchor::all().to_vec());

        let position = event.position();
        let hit = stage
            .editable_layer()
            .and_then(|layer| layer.node_at_point(position, HIT_TOLERANCE));

        let Some(id) = hit else {
            stage.transformer_mut().clear();
            stage.feedback().selection_cleared();
            return ToolAction::None;
        };

        // Notes keep a fixed size; disable the resize anchors for them.
        let is_note = stage
            .editable_layer()
            .and_then(|layer| layer.node(id))
            .is_some_and(|node| node.kind == NodeKind::Note);
        if is_note {
            stage.transformer_mut().set_enabled_anchors(Vec::new());
        }

        stage.transformer_mut().set_nodes(vec![id]);
        if let Some(node) = stage.editable_layer().and_then(|layer| layer.node(id)) {
            stage.feedback().node_selected(node);
        }

        ToolAction::None
    }
}
