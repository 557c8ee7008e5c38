//! Pointer event types for mouse/touch handling.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerButton {
    Left,
    Right,
    Middle,
}

/// Pointer event for unified mouse/touch handling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: PointerButton },
    Up { position: Point, button: PointerButton },
    Move { position: Point },
}

impl PointerEvent {
    /// Pointer position of the event, in canvas coordinates.
    pub fn position(&self) -> Point {
        match self {
            PointerEvent::Down { position, .. } => *position,
            PointerEvent::Up { position, .. } => *position,
            PointerEvent::Move { position } => *position,
        }
    }

    /// Convenience constructor for a left-button press.
    pub fn down(position: Point) -> Self {
        PointerEvent::Down {
            position,
            button: PointerButton::Left,
        }
    }

    /// Convenience constructor for a left-button release.
    pub fn up(position: Point) -> Self {
        PointerEvent::Up {
            position,
            button: PointerButton::Left,
        }
    }

    /// Convenience constructor for a move.
    pub fn moved(position: Point) -> Self {
        PointerEvent::Move { position }
    }
}
