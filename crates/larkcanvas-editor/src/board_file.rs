//! The `.lkc` board file: a JSON envelope around one snapshot.

use larkcanvas_core::snapshot::Snapshot;
use larkcanvas_core::stage::Stage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File extension for exported boards.
pub const BOARD_FILE_EXTENSION: &str = "lkc";

/// Board file errors.
#[derive(Debug, Error)]
pub enum BoardFileError {
    #[error("failed to parse board file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("board file does not contain snapshot data")]
    MissingSnapshot,
}

/// A parsed board file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoardFile {
    pub snapshot: Snapshot,
}

impl BoardFile {
    /// The JSON body written to disk.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "snapshot": self.snapshot.as_value() }).to_string()
    }
}

/// Parse a board file body.
///
/// Fails when the body is not JSON or the `snapshot` key is absent; callers
/// must not touch the stage in either case.
pub fn parse(text: &str) -> Result<BoardFile, BoardFileError> {
    let value: serde_json::Value = serde_json::from_str(text).map_err(BoardFileError::Parse)?;
    let snapshot = value
        .get("snapshot")
        .cloned()
        .ok_or(BoardFileError::MissingSnapshot)?;
    Ok(BoardFile {
        snapshot: Snapshot::from_value(snapshot),
    })
}

/// Export the stage's current content as a board file.
pub fn export(stage: &mut Stage) -> Option<BoardFile> {
    stage.serialize().map(|snapshot| BoardFile { snapshot })
}

/// Native file dialogs for board files.
#[cfg(not(target_arch = "wasm32"))]
pub mod dialogs {
    use super::{BoardFile, BOARD_FILE_EXTENSION};

    /// Save a board file using the native save dialog.
    pub fn save_board(board: &BoardFile, name: &str) {
        let dialog = rfd::FileDialog::new()
            .set_title("Save Board")
            .set_file_name(format!("{}.{}", name, BOARD_FILE_EXTENSION))
            .add_filter("LarkCanvas Board", &[BOARD_FILE_EXTENSION]);

        if let Some(path) = dialog.save_file() {
            if let Err(e) = std::fs::write(&path, board.to_json()) {
                log::error!("Failed to write file: {}", e);
            } else {
                log::info!("Saved board to: {:?}", path);
            }
        }
    }

    /// Pick a board file and read its body; parsing is the caller's job.
    pub fn open_board() -> Option<String> {
        let dialog = rfd::FileDialog::new()
            .set_title("Open Board")
            .add_filter("LarkCanvas Board", &[BOARD_FILE_EXTENSION]);

        let path = dialog.pick_file()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                log::error!("Failed to read file: {}", e);
                None
            }
        }
    }
}
