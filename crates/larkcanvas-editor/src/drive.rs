//! Cloud-drive import and export.
//!
//! The picker is an explicitly constructed value owned by the application
//! root and passed by reference to the actions that need it; there is no
//! process-wide instance. Auth, file picking, and download are host
//! collaborators behind traits.

use crate::board_file::{self, BoardFile};
use larkcanvas_core::api::{ApiError, ApiResult, BoxFuture, DriveApi, UploadDriveProject};
use larkcanvas_core::feedback::UiFeedback;
use larkcanvas_core::snapshot::Snapshot;
use larkcanvas_core::stage::Stage;
use serde::Serialize;
use std::rc::Rc;

/// Wall-clock source for export metadata. Injected so tests and hosts
/// control the timestamp format's origin.
pub trait Clock {
    /// Current time as an ISO-8601 string.
    fn now_iso(&self) -> String;
}

/// OAuth collaborator: obtains an access token for the drive scope.
pub trait DriveAuth {
    fn request_access_token(&self) -> BoxFuture<'_, ApiResult<String>>;
}

/// A file the user picked from their drive.
#[derive(Debug, Clone)]
pub struct PickedFile {
    pub id: String,
    pub name: String,
}

/// Drive file-browsing collaborator: shows the picker UI and downloads the
/// picked file's body.
pub trait DriveFiles {
    /// Show the picker; `None` when the user cancels.
    fn pick(&self) -> BoxFuture<'_, ApiResult<Option<PickedFile>>>;

    /// Download a file body by id.
    fn download(&self, file_id: &str) -> BoxFuture<'_, ApiResult<String>>;
}

/// Drive project picker, constructed once by the application root.
pub struct DrivePicker {
    files: Rc<dyn DriveFiles>,
}

impl DrivePicker {
    pub fn new(files: Rc<dyn DriveFiles>) -> Self {
        Self { files }
    }

    /// Let the user pick a project file and download it.
    ///
    /// Returns `None` when the pick is cancelled. A downloaded body without
    /// a valid snapshot envelope is a response error.
    pub async fn pick_project(&self) -> ApiResult<Option<BoardFile>> {
        let Some(file) = self.files.pick().await? else {
            return Ok(None);
        };
        log::info!("Loading project from drive: {}", file.name);
        let body = self.files.download(&file.id).await?;
        let board =
            board_file::parse(&body).map_err(|err| ApiError::Response(err.to_string()))?;
        Ok(Some(board))
    }
}

#[derive(Serialize)]
struct ProjectMetadata {
    title: String,
    #[serde(rename = "createdAt")]
    created_at: String,
}

#[derive(Serialize)]
struct ProjectEnvelope {
    metadata: ProjectMetadata,
    snapshot: Snapshot,
}

/// Export the current board to the user's cloud drive.
///
/// The uploaded `project` is a JSON string of
/// `{ metadata: { title, createdAt }, snapshot }`. The returned file name is
/// reported through the feedback sink.
pub async fn save_to_drive(
    stage: &mut Stage,
    auth: &dyn DriveAuth,
    api: &dyn DriveApi,
    clock: &dyn Clock,
    feedback: &dyn UiFeedback,
    title: &str,
) -> ApiResult<()> {
    let access_token = auth.request_access_token().await?;

    let Some(snapshot) = stage.serialize() else {
        log::warn!("Nothing to export");
        return Ok(());
    };

    let envelope = ProjectEnvelope {
        metadata: ProjectMetadata {
            title: title.to_string(),
            created_at: clock.now_iso(),
        },
        snapshot,
    };
    let project =
        serde_json::to_string(&envelope).map_err(|err| ApiError::Response(err.to_string()))?;

    let response = api
        .upload_project(UploadDriveProject {
            access_token,
            project,
        })
        .await?;

    feedback.notify_exported(&response.file_name);
    Ok(())
}

/// Import a project picked from the user's cloud drive.
///
/// Returns whether a project was loaded (`false` on cancel).
pub async fn load_from_drive(stage: &mut Stage, picker: &DrivePicker) -> ApiResult<bool> {
    match picker.pick_project().await? {
        Some(board) => {
            stage.deserialize(board.snapshot).await;
            Ok(true)
        }
        None => Ok(false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{attached_stage, block_on};
    use larkcanvas_core::api::DriveFile;
    use larkcanvas_core::feedback::NullFeedback;
    use larkcanvas_core::scene::{NodeAttrs, NodeKind, SceneNode};
    use larkcanvas_core::stage::StageConfig;
    use std::cell::RefCell;

    struct FixedClock;

    impl Clock for FixedClock {
        fn now_iso(&self) -> String {
            "2024-05-01T12:00:00Z".to_string()
        }
    }

    struct StubAuth;

    impl DriveAuth for StubAuth {
        fn request_access_token(&self) -> BoxFuture<'_, ApiResult<String>> {
            Box::pin(async { Ok("token-123".to_string()) })
        }
    }

    #[derive(Default)]
    struct RecordingDriveApi {
        uploads: RefCell<Vec<UploadDriveProject>>,
    }

    impl DriveApi for RecordingDriveApi {
        fn upload_project(
            &self,
            request: UploadDriveProject,
        ) -> BoxFuture<'_, ApiResult<DriveFile>> {
            Box::pin(async move {
                self.uploads.borrow_mut().push(request);
                Ok(DriveFile {
                    file_name: "Board.lkc".to_string(),
                })
            })
        }
    }

    struct StubFiles {
        body: Option<String>,
    }

    impl DriveFiles for StubFiles {
        fn pick(&self) -> BoxFuture<'_, ApiResult<Option<PickedFile>>> {
            let picked = self.body.as_ref().map(|_| PickedFile {
                id: "file-1".to_string(),
                name: "Board.lkc".to_string(),
            });
            Box::pin(async move { Ok(picked) })
        }

        fn download(&self, _file_id: &str) -> BoxFuture<'_, ApiResult<String>> {
            let body = self.body.clone().unwrap_or_default();
            Box::pin(async move { Ok(body) })
        }
    }

    #[test]
    fn test_save_to_drive_uploads_envelope() {
        let mut stage = attached_stage(StageConfig::default());
        stage.add_node(SceneNode::new(
            NodeKind::Rect,
            NodeAttrs {
                x: 1.0,
                y: 2.0,
                width: Some(10.0),
                height: Some(10.0),
                ..NodeAttrs::default()
            },
        ));

        let api = RecordingDriveApi::default();
        block_on(save_to_drive(
            &mut stage,
            &StubAuth,
            &api,
            &FixedClock,
            &NullFeedback,
            "Board",
        ))
        .unwrap();

        let uploads = api.uploads.borrow();
        assert_eq!(uploads.len(), 1);
        assert_eq!(uploads[0].access_token, "token-123");

        let envelope: serde_json::Value = serde_json::from_str(&uploads[0].project).unwrap();
        assert_eq!(envelope["metadata"]["title"], "Board");
        assert_eq!(envelope["metadata"]["createdAt"], "2024-05-01T12:00:00Z");
        assert_eq!(envelope["snapshot"]["children"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_load_from_drive_restores_board() {
        let body = serde_json::json!({
            "snapshot": {
                "children": [
                    { "kind": "Rect", "attrs": { "x": 5.0, "y": 6.0 } }
                ]
            }
        })
        .to_string();

        let picker = DrivePicker::new(Rc::new(StubFiles { body: Some(body) }));
        let mut stage = attached_stage(StageConfig::default());

        let loaded = block_on(load_from_drive(&mut stage, &picker)).unwrap();
        assert!(loaded);
        assert_eq!(stage.editable_layer().unwrap().len(), 1);
    }

    #[test]
    fn test_cancelled_pick_loads_nothing() {
        let picker = DrivePicker::new(Rc::new(StubFiles { body: None }));
        let mut stage = attached_stage(StageConfig::default());

        let loaded = block_on(load_from_drive(&mut stage, &picker)).unwrap();
        assert!(!loaded);
        assert!(stage.editable_layer().unwrap().is_empty());
    }

    #[test]
    fn test_body_without_snapshot_is_response_error() {
        let picker = DrivePicker::new(Rc::new(StubFiles {
            body: Some(r#"{"other":"data"}"#.to_string()),
        }));
        let mut stage = attached_stage(StageConfig::default());

        let result = block_on(load_from_drive(&mut stage, &picker));
        assert!(matches!(result, Err(ApiError::Response(_))));
        assert!(stage.editable_layer().unwrap().is_empty());
    }
}
