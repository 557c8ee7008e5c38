//! Text tool.

use super::{Tool, ToolAction};
use crate::input::PointerEvent;
use crate::scene::{NodeAttrs, NodeKind, SceneNode};
use crate::stage::Stage;

/// Default width of a placed text node.
pub const TEXT_WIDTH: f64 = 200.0;

/// Default font size of a placed text node.
pub const TEXT_FONT_SIZE: f64 = 20.0;

/// Places a text node on pointer release, then yields to the pointer tool.
pub struct TextTool;

impl Tool for TextTool {
    fn name(&self) -> &'static str {
        "text"
    }

    fn on_pointer_up(&mut self, stage: &mut Stage, event: &PointerEvent) -> ToolAction {
        let position = event.position();
        let text = SceneNode::new(
            NodeKind::Text,
            NodeAttrs {
                x: position.x,
                y: position.y,
                width: Some(TEXT_WIDTH),
                font_size: Some(TEXT_FONT_SIZE),
                text: Some("Text".to_string()),
                ..NodeAttrs::default()
            },
        );
        stage.add_node(text);
        ToolAction::SwitchToPointer
    }
}
