//! One-shot editor actions: export, import, and local-cache load.

use crate::board_file::{self, BoardFile, BoardFileError};
use larkcanvas_core::stage::Stage;
use larkcanvas_core::storage::{KeyValueStore, StoreResult, STAGE_CACHE_KEY};

/// Manual save: run one autosave cycle (when configured), then export the
/// current board regardless of the autosave outcome.
pub async fn manual_save(stage: &mut Stage) -> Option<BoardFile> {
    stage
        .manual_save()
        .await
        .map(|snapshot| BoardFile { snapshot })
}

/// Import a board file body into the stage.
///
/// A body that fails to parse or lacks the `snapshot` key reports an error
/// without touching the stage.
pub async fn load_board(stage: &mut Stage, text: &str) -> Result<(), BoardFileError> {
    let board = board_file::parse(text)?;
    stage.deserialize(board.snapshot).await;
    Ok(())
}

/// Restore the snapshot cached in local storage, if any.
///
/// Returns whether anything was restored.
pub async fn load_from_cache(
    stage: &mut Stage,
    store: &dyn KeyValueStore,
) -> StoreResult<bool> {
    match store.get(STAGE_CACHE_KEY).await? {
        Some(text) => {
            stage.deserialize(text).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Cache the current snapshot string in local storage.
///
/// Returns whether anything was written (`false` when there is nothing to
/// serialize).
pub async fn cache_current(stage: &mut Stage, store: &dyn KeyValueStore) -> StoreResult<bool> {
    let Some(snapshot) = stage.serialize() else {
        return Ok(false);
    };
    store.set(STAGE_CACHE_KEY, &snapshot.to_json()).await?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{attached_stage, block_on};
    use larkcanvas_core::scene::{NodeAttrs, NodeKind, SceneNode};
    use larkcanvas_core::stage::StageConfig;
    use larkcanvas_core::storage::MemoryStore;

    fn stage_with_rect() -> Stage {
        let mut stage = attached_stage(StageConfig::default());
        stage.add_node(SceneNode::new(
            NodeKind::Rect,
            NodeAttrs {
                x: 10.0,
                y: 20.0,
                width: Some(100.0),
                height: Some(50.0),
                ..NodeAttrs::default()
            },
        ));
        stage
    }

    #[test]
    fn test_manual_save_exports_board() {
        let mut stage = stage_with_rect();
        let board = block_on(manual_save(&mut stage)).unwrap();
        assert_eq!(board.snapshot.children().unwrap().len(), 1);
    }

    #[test]
    fn test_load_board_restores_nodes() {
        let mut source = stage_with_rect();
        let text = block_on(manual_save(&mut source)).unwrap().to_json();

        let mut stage = attached_stage(StageConfig::default());
        block_on(load_board(&mut stage, &text)).unwrap();

        let layer = stage.editable_layer().unwrap();
        assert_eq!(layer.len(), 1);
        assert_eq!(layer.nodes()[0].kind, NodeKind::Rect);
    }

    #[test]
    fn test_load_board_without_snapshot_key_leaves_stage_untouched() {
        let mut stage = stage_with_rect();

        let result = block_on(load_board(&mut stage, r#"{"other":"data"}"#));

        assert!(matches!(result, Err(BoardFileError::MissingSnapshot)));
        assert_eq!(stage.editable_layer().unwrap().len(), 1);
    }

    #[test]
    fn test_load_board_with_bad_json_reports_parse_error() {
        let mut stage = stage_with_rect();

        let result = block_on(load_board(&mut stage, "{not json"));

        assert!(matches!(result, Err(BoardFileError::Parse(_))));
        assert_eq!(stage.editable_layer().unwrap().len(), 1);
    }

    #[test]
    fn test_cache_round_trip() {
        let store = MemoryStore::new();

        let mut source = stage_with_rect();
        assert!(block_on(cache_current(&mut source, &store)).unwrap());

        let mut stage = attached_stage(StageConfig::default());
        assert!(block_on(load_from_cache(&mut stage, &store)).unwrap());
        assert_eq!(stage.editable_layer().unwrap().len(), 1);
    }

    #[test]
    fn test_load_from_empty_cache() {
        let store = MemoryStore::new();
        let mut stage = attached_stage(StageConfig::default());

        assert!(!block_on(load_from_cache(&mut stage, &store)).unwrap());
        assert!(stage.editable_layer().unwrap().is_empty());
    }
}
