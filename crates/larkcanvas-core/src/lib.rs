//! LarkCanvas Core Library
//!
//! Platform-agnostic scene model, snapshot codec, history, and autosave
//! logic for the LarkCanvas whiteboard.

pub mod api;
pub mod autosave;
pub mod feedback;
pub mod input;
pub mod loader;
pub mod scene;
pub mod snapshot;
pub mod stage;
pub mod storage;
pub mod tools;

#[cfg(test)]
pub(crate) mod testing;

pub use autosave::{AutosaveCoordinator, AutosaveTimer, DEFAULT_SAVE_INTERVAL_MS, SAVED_NOTICE_MS};
pub use feedback::{NullFeedback, UiFeedback};
pub use input::{PointerButton, PointerEvent};
pub use scene::{Layer, NodeKind, SceneNode, StageSurface, Transformer};
pub use snapshot::{Snapshot, SnapshotData, SnapshotError};
pub use stage::{PersistenceTarget, Stage, StageConfig};
pub use tools::{Tool, ToolAction, Toolbar};
