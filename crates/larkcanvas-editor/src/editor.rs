//! The editor: stage plus toolbar, with collaborators injected at the root.

use kurbo::Point;
use larkcanvas_core::api::{ApiError, FileData, ImageApi, UploadImage};
use larkcanvas_core::input::PointerEvent;
use larkcanvas_core::loader::ImageLoader;
use larkcanvas_core::scene::SceneNode;
use larkcanvas_core::stage::Stage;
use larkcanvas_core::tools::Toolbar;
use std::rc::Rc;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Where uploaded images land on the canvas.
const UPLOAD_POSITION: Point = Point::new(50.0, 50.0);

/// Owns the stage and toolbar and routes host events between them.
///
/// Pointer events reach the stage's history hooks first, then the active
/// tool, mirroring the order the listeners were bound in.
pub struct Editor {
    stage: Stage,
    toolbar: Toolbar,
    image_api: Option<Rc<dyn ImageApi>>,
}

impl Editor {
    /// Create an editor around an attached stage.
    pub fn new(stage: Stage, toolbar: Toolbar) -> Self {
        Self {
            stage,
            toolbar,
            image_api: None,
        }
    }

    /// Configure the image hosting collaborator.
    pub fn with_image_api(mut self, api: Rc<dyn ImageApi>) -> Self {
        self.image_api = Some(api);
        self
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn stage_mut(&mut self) -> &mut Stage {
        &mut self.stage
    }

    pub fn toolbar(&self) -> &Toolbar {
        &self.toolbar
    }

    /// Switch the active tool.
    pub fn select_tool(&mut self, index: usize) {
        self.toolbar.select_tool(&mut self.stage, index);
    }

    /// Handle a pointer press from the host.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        self.stage.pointer_pressed();
        self.toolbar.pointer_down(&mut self.stage, &event);
    }

    /// Handle a pointer release from the host.
    pub fn pointer_up(&mut self, event: PointerEvent) {
        self.stage.pointer_released();
        self.toolbar.pointer_up(&mut self.stage, &event);
    }

    /// Handle a pointer move from the host.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        self.toolbar.pointer_move(&mut self.stage, &event);
    }

    /// Periodic host callback; runs an autosave cycle when one is due.
    pub async fn tick(&mut self, now: Instant) {
        if self.stage.autosave_due(now) {
            self.stage.autosave().await;
        }
    }

    /// Upload a picked image file and place it on the canvas.
    ///
    /// Upload failures propagate to the caller; there is no local recovery
    /// path for them. A failed load of the uploaded URL is logged and leaves
    /// the canvas unchanged.
    pub async fn upload_image(&mut self, file: FileData) -> Result<(), ApiError> {
        let Some(api) = self.image_api.clone() else {
            log::warn!("No image API configured; ignoring upload");
            return Ok(());
        };

        let uploaded = api.upload(UploadImage { file }).await?;

        let loader = self.stage.loader().clone();
        match loader.load(&uploaded.url).await {
            Ok(resource) => {
                let node = SceneNode::image_from_resource(UPLOAD_POSITION, resource);
                self.stage.add_node(node);
                self.stage.save_snapshot();
                self.toolbar
                    .select_tool(&mut self.stage, Toolbar::POINTER_TOOL);
            }
            Err(err) => {
                log::error!("Failed to load uploaded image {}: {}", uploaded.url, err);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{attached_stage, block_on};
    use larkcanvas_core::api::{ApiResult, BoxFuture, UploadedImage};
    use larkcanvas_core::scene::NodeKind;
    use larkcanvas_core::stage::StageConfig;
    use std::cell::Cell;

    struct StubImageApi {
        uploads: Cell<usize>,
        fail: bool,
    }

    impl ImageApi for StubImageApi {
        fn upload(&self, request: UploadImage) -> BoxFuture<'_, ApiResult<UploadedImage>> {
            Box::pin(async move {
                if self.fail {
                    return Err(ApiError::Request("upload rejected".to_string()));
                }
                self.uploads.set(self.uploads.get() + 1);
                Ok(UploadedImage {
                    url: format!("https://images.example/{}", request.file.name),
                })
            })
        }
    }

    fn editor() -> Editor {
        Editor::new(attached_stage(StageConfig::default()), Toolbar::standard())
    }

    #[test]
    fn test_pointer_lifecycle_snapshots_drawing() {
        let mut editor = editor();
        // Freehand tool is second in the standard toolbar.
        editor.select_tool(1);

        editor.pointer_down(PointerEvent::down(Point::new(0.0, 0.0)));
        editor.pointer_move(PointerEvent::moved(Point::new(10.0, 10.0)));
        editor.pointer_up(PointerEvent::up(Point::new(10.0, 10.0)));

        let stage = editor.stage();
        assert_eq!(stage.editable_layer().unwrap().len(), 1);
        // Seed plus the post-release snapshot of the new stroke.
        assert_eq!(stage.history_len(), 2);
    }

    #[test]
    fn test_upload_image_places_node_and_yields_to_pointer() {
        let api = Rc::new(StubImageApi {
            uploads: Cell::new(0),
            fail: false,
        });
        let mut editor = editor().with_image_api(api.clone());
        editor.select_tool(1);

        block_on(editor.upload_image(FileData {
            name: "cat.png".to_string(),
            bytes: vec![1, 2, 3],
        }))
        .unwrap();

        assert_eq!(api.uploads.get(), 1);
        let stage = editor.stage();
        let layer = stage.editable_layer().unwrap();
        assert_eq!(layer.nodes_of_kind(NodeKind::Image).count(), 1);
        let image = layer.nodes_of_kind(NodeKind::Image).next().unwrap();
        assert_eq!(
            image.attrs.src.as_deref(),
            Some("https://images.example/cat.png")
        );
        assert_eq!(editor.toolbar().active_index(), Toolbar::POINTER_TOOL);
    }

    #[test]
    fn test_tick_runs_due_autosave() {
        use larkcanvas_core::api::ProjectApi;
        use larkcanvas_core::stage::PersistenceTarget;
        use std::time::Duration;

        struct CountingProjectApi {
            updates: Cell<usize>,
        }

        impl ProjectApi for CountingProjectApi {
            fn update(
                &self,
                _request: larkcanvas_core::api::UpdateProject,
            ) -> BoxFuture<'_, ApiResult<()>> {
                self.updates.set(self.updates.get() + 1);
                Box::pin(async { Ok(()) })
            }
        }

        let api = Rc::new(CountingProjectApi {
            updates: Cell::new(0),
        });
        let stage = attached_stage(StageConfig {
            save_interval: Duration::from_millis(50),
            target: Some(PersistenceTarget {
                project_id: "project-1".to_string(),
                api: api.clone(),
            }),
        });
        let mut editor = Editor::new(stage, Toolbar::standard());

        let now = Instant::now();
        block_on(editor.tick(now));
        assert_eq!(api.updates.get(), 0);

        block_on(editor.tick(now + Duration::from_millis(100)));
        assert_eq!(api.updates.get(), 1);
    }

    #[test]
    fn test_upload_failure_propagates() {
        let api = Rc::new(StubImageApi {
            uploads: Cell::new(0),
            fail: true,
        });
        let mut editor = editor().with_image_api(api);

        let result = block_on(editor.upload_image(FileData {
            name: "cat.png".to_string(),
            bytes: vec![1, 2, 3],
        }));

        assert!(matches!(result, Err(ApiError::Request(_))));
        assert!(editor.stage().editable_layer().unwrap().is_empty());
    }
}
