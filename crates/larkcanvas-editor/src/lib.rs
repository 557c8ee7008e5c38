//! LarkCanvas editor layer.
//!
//! Wires the core stage and toolbar to host events, and implements the
//! editor's one-shot actions: board-file export/import, local-cache load,
//! image upload, and cloud-drive import/export.

pub mod actions;
pub mod board_file;
pub mod drive;
pub mod editor;

#[cfg(test)]
pub(crate) mod testing;

pub use board_file::{BoardFile, BoardFileError, BOARD_FILE_EXTENSION};
pub use drive::{Clock, DriveAuth, DriveFiles, DrivePicker, PickedFile};
pub use editor::Editor;
