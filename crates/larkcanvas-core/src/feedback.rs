//! UI feedback collaborator.
//!
//! Tools and the autosave coordinator report user-visible events through this
//! trait instead of mutating global UI state. The host (side panel, snackbar,
//! status bar) implements whichever callbacks it renders.

use crate::scene::SceneNode;

/// Sink for transient UI notifications and selection feedback.
///
/// All methods default to no-ops so implementations only override what they
/// display.
pub trait UiFeedback {
    /// Raise or lower the "saving" indicator around an in-flight save.
    fn set_saving(&self, _active: bool) {}

    /// A save completed. Hosts show a transient notice and hide it after
    /// [`crate::autosave::SAVED_NOTICE_MS`].
    fn notify_saved(&self) {}

    /// A project was exported; `file_name` is the name reported by the drive.
    fn notify_exported(&self, _file_name: &str) {}

    /// A node was selected with the pointer tool.
    fn node_selected(&self, _node: &SceneNode) {}

    /// The selection was cleared.
    fn selection_cleared(&self) {}
}

/// Feedback sink that discards everything.
pub struct NullFeedback;

impl UiFeedback for NullFeedback {}
