//! Tool system for the whiteboard.
//!
//! Every tool implements the [`Tool`] trait; the [`Toolbar`] owns the tool
//! list and routes pointer events to the active one. Tools report follow-up
//! requests (like returning to the pointer tool after placing a node)
//! through the returned [`ToolAction`] instead of reaching into the toolbar.

mod eraser;
mod freehand;
mod note;
mod select;
mod text;

pub use eraser::EraserTool;
pub use freehand::{FreehandTool, FREEHAND_STROKE_WIDTH};
pub use note::{NoteTool, NOTE_FILL, NOTE_HEIGHT, NOTE_PADDING, NOTE_WIDTH};
pub use select::SelectTool;
pub use text::{TextTool, TEXT_FONT_SIZE, TEXT_WIDTH};

use crate::input::PointerEvent;
use crate::stage::Stage;

/// Pointer hit-testing slack for selection and erasing, in canvas units.
pub const HIT_TOLERANCE: f64 = 4.0;

/// Follow-up requested by a tool after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToolAction {
    #[default]
    None,
    /// Return control to the pointer tool.
    SwitchToPointer,
}

/// A selectable editing tool.
pub trait Tool {
    /// Short identifier used for logging and toolbar display.
    fn name(&self) -> &'static str;

    /// Called when the tool becomes active.
    fn on_select(&mut self, _stage: &mut Stage) {}

    /// Called when another tool takes over.
    fn on_deselect(&mut self, _stage: &mut Stage) {}

    fn on_pointer_down(&mut self, _stage: &mut Stage, _event: &PointerEvent) -> ToolAction {
        ToolAction::None
    }

    fn on_pointer_up(&mut self, _stage: &mut Stage, _event: &PointerEvent) -> ToolAction {
        ToolAction::None
    }

    fn on_pointer_move(&mut self, _stage: &mut Stage, _event: &PointerEvent) -> ToolAction {
        ToolAction::None
    }
}

/// Owns the tool list and the active selection.
pub struct Toolbar {
    tools: Vec<Box<dyn Tool>>,
    active: usize,
}

impl Toolbar {
    /// Index of the pointer tool, by convention the first entry.
    pub const POINTER_TOOL: usize = 0;

    /// Create a toolbar; the first tool starts active.
    pub fn new(tools: Vec<Box<dyn Tool>>) -> Self {
        Self { tools, active: 0 }
    }

    /// Index of the active tool.
    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Name of the active tool.
    pub fn active_name(&self) -> Option<&'static str> {
        self.tools.get(self.active).map(|t| t.name())
    }

    /// Switch the active tool, running deselect/select lifecycle hooks.
    pub fn select_tool(&mut self, stage: &mut Stage, index: usize) {
        if index >= self.tools.len() {
            log::warn!("No tool at index {}", index);
            return;
        }
        if let Some(current) = self.tools.get_mut(self.active) {
            current.on_deselect(stage);
        }
        self.active = index;
        self.tools[index].on_select(stage);
    }

    /// Route a pointer press to the active tool.
    pub fn pointer_down(&mut self, stage: &mut Stage, event: &PointerEvent) {
        let Some(tool) = self.tools.get_mut(self.active) else {
            return;
        };
        let action = tool.on_pointer_down(stage, event);
        self.apply(stage, action);
    }

    /// Route a pointer release to the active tool.
    pub fn pointer_up(&mut self, stage: &mut Stage, event: &PointerEvent) {
        let Some(tool) = self.tools.get_mut(self.active) else {
            return;
        };
        let action = tool.on_pointer_up(stage, event);
        self.apply(stage, action);
    }

    /// Route a pointer move to the active tool.
    pub fn pointer_move(&mut self, stage: &mut Stage, event: &PointerEvent) {
        let Some(tool) = self.tools.get_mut(self.active) else {
            return;
        };
        let action = tool.on_pointer_move(stage, event);
        self.apply(stage, action);
    }

    fn apply(&mut self, stage: &mut Stage, action: ToolAction) {
        match action {
            ToolAction::None => {}
            ToolAction::SwitchToPointer => self.select_tool(stage, Self::POINTER_TOOL),
        }
    }

    /// The default tool set: pointer first, then the drawing tools.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(SelectTool::new()),
            Box::new(FreehandTool::new()),
            Box::new(EraserTool::new()),
            Box::new(TextTool),
            Box::new(NoteTool),
        ])
    }
}
