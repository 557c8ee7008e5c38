//! Sticky-note tool.

use super::{Tool, ToolAction};
use crate::input::PointerEvent;
use crate::scene::{note_scene_func, NodeAttrs, NodeKind, Rgba, SceneNode};
use crate::stage::Stage;

/// Sticky-note dimensions.
pub const NOTE_WIDTH: f64 = 200.0;
pub const NOTE_HEIGHT: f64 = 300.0;

/// Text padding inside the note.
pub const NOTE_PADDING: f64 = 10.0;

/// Note paper color.
pub const NOTE_FILL: Rgba = Rgba {
    r: 255,
    g: 248,
    b: 184,
    a: 255,
};

/// Places a sticky note on pointer release, then yields to the pointer tool.
pub struct NoteTool;

impl Tool for NoteTool {
    fn name(&self) -> &'static str {
        "note"
    }

    fn on_pointer_up(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        let position = event.position();
        let mut note = SceneNode::new(
            NodeKind::Note,
            NodeAttrs {
                x: position.x,
                y: position.y,
                width: Some(NOTE_WIDTH),
                height: Some(NOTE_HEIGHT),
                font_size: Some(super::TEXT_FONT_SIZE),
                text: Some("Text".to_string()),
                padding: Some(NOTE_PADDING),
                fill: Some(NOTE_FILL),
                ..NodeAttrs::default()
            },
        );
        note.set_scene_func(note_scene_func);
        stage.add_node(note);
        ToolAction::SwitchToPointer
    }
}
