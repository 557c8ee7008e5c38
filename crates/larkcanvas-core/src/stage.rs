//! Stage controller: canvas lifecycle, undo/redo history, and autosave.
//!
//! The stage owns the surface and its layers, the shared transformer, the
//! snapshot history, and the autosave machinery. Tools talk to the canvas
//! exclusively through it.

use crate::api::ProjectApi;
use crate::autosave::{AutosaveCoordinator, AutosaveTimer, DEFAULT_SAVE_INTERVAL_MS};
use crate::feedback::UiFeedback;
use crate::loader::ImageLoader;
use crate::scene::{ContainerHandle, Layer, SceneNode, StageSurface, Transformer};
use crate::snapshot::{self, Snapshot, SnapshotData};
use std::rc::Rc;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Remote persistence target. Its absence disables autosave entirely.
pub struct PersistenceTarget {
    pub project_id: String,
    pub api: Rc<dyn ProjectApi>,
}

/// Stage configuration.
pub struct StageConfig {
    /// Autosave period.
    pub save_interval: Duration,
    /// Remote persistence target, if any.
    pub target: Option<PersistenceTarget>,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            save_interval: Duration::from_millis(DEFAULT_SAVE_INTERVAL_MS),
            target: None,
        }
    }
}

/// Top-level owner of the canvas document, history, and autosave.
pub struct Stage {
    surface: Option<StageSurface>,
    container: Option<Rc<dyn ContainerHandle>>,
    transformer: Transformer,
    history: Vec<Snapshot>,
    cursor: Option<usize>,
    timer: AutosaveTimer,
    coordinator: Option<AutosaveCoordinator>,
    loader: Rc<dyn ImageLoader>,
    feedback: Rc<dyn UiFeedback>,
}

impl Stage {
    /// Create a detached stage.
    pub fn new(
        config: StageConfig,
        loader: Rc<dyn ImageLoader>,
        feedback: Rc<dyn UiFeedback>,
    ) -> Self {
        let coordinator = config.target.map(|target| {
            AutosaveCoordinator::new(target.api, target.project_id, feedback.clone())
        });
        Self {
            surface: None,
            container: None,
            transformer: Transformer::new(),
            history: Vec::new(),
            cursor: None,
            timer: AutosaveTimer::new(config.save_interval),
            coordinator,
            loader,
            feedback,
        }
    }

    /// Attach the stage to a canvas surface and its container.
    ///
    /// Logs and returns when either reference is absent. Creates the editable
    /// layer and the transformer overlay, syncs the canvas size to the
    /// container, seeds the history with a baseline snapshot, and starts
    /// autosave when a persistence target is configured.
    pub fn attach(
        &mut self,
        surface: Option<StageSurface>,
        container: Option<Rc<dyn ContainerHandle>>,
    ) {
        let (Some(mut surface), Some(container)) = (surface, container) else {
            log::error!("Invalid stage or container references");
            return;
        };

        self.history.clear();
        self.cursor = None;
        self.transformer = Transformer::new();

        surface.add_layer(Layer::new());
        surface.add_layer(Layer::new());

        self.surface = Some(surface);
        self.container = Some(container);

        self.sync_size();
        self.save_snapshot();

        if self.coordinator.is_some() {
            self.timer.start(Instant::now());
        }
    }

    /// Detach from the canvas.
    ///
    /// Disconnects the container observer, stops autosave, and clears the
    /// history. Safe to call when `attach` never ran or partially failed.
    pub fn detach(&mut self) {
        self.container = None;
        self.timer.stop();
        self.history.clear();
        self.cursor = None;
    }

    /// Whether the stage is attached to a surface.
    pub fn is_attached(&self) -> bool {
        self.surface.is_some()
    }

    /// Keep the canvas dimensions matching the container. The host's resize
    /// observer calls this whenever the container changes.
    pub fn sync_size(&mut self) {
        let (Some(surface), Some(container)) = (self.surface.as_mut(), self.container.as_ref())
        else {
            return;
        };
        surface.set_size(container.client_size());
    }

    /// The surface, when attached.
    pub fn surface(&self) -> Option<&StageSurface> {
        self.surface.as_ref()
    }

    /// The editable layer, when attached.
    pub fn editable_layer(&self) -> Option<&Layer> {
        self.surface.as_ref().and_then(StageSurface::editable_layer)
    }

    /// Mutable access to the editable layer.
    pub fn editable_layer_mut(&mut self) -> Option<&mut Layer> {
        self.surface.as_mut().and_then(StageSurface::editable_layer_mut)
    }

    /// The shared selection/transform handle.
    pub fn transformer(&self) -> &Transformer {
        &self.transformer
    }

    /// Mutable access to the transformer.
    pub fn transformer_mut(&mut self) -> &mut Transformer {
        &mut self.transformer
    }

    /// The injected UI feedback sink.
    pub fn feedback(&self) -> &Rc<dyn UiFeedback> {
        &self.feedback
    }

    /// The injected image loader.
    pub fn loader(&self) -> &Rc<dyn ImageLoader> {
        &self.loader
    }

    /// Serialize the editable layer; `None` when there is none.
    pub fn serialize(&mut self) -> Option<Snapshot> {
        let layer = self.surface.as_mut()?.editable_layer_mut()?;
        snapshot::capture(layer)
    }

    /// Rebuild the editable layer from a snapshot or its string encoding.
    ///
    /// Malformed or invalid input is logged and leaves the canvas untouched;
    /// the editor stays interactive.
    pub async fn deserialize(&mut self, data: impl Into<SnapshotData>) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let Some(layer) = surface.editable_layer_mut() else {
            return;
        };
        if let Err(err) = snapshot::restore(
            layer,
            &mut self.transformer,
            data.into(),
            self.loader.as_ref(),
        )
        .await
        {
            log::error!("Failed to restore snapshot: {}", err);
        }
    }

    /// Record the current state in the history.
    ///
    /// No-op when serialization yields nothing or the state is unchanged from
    /// the entry at the cursor. Pushing after an undo discards the redo
    /// branch.
    pub fn save_snapshot(&mut self) {
        let Some(serialized) = self.serialize() else {
            return;
        };

        if let Some(index) = self.cursor {
            if self.history.get(index) == Some(&serialized) {
                return;
            }
        }

        let keep = self.cursor.map_or(0, |index| index + 1);
        self.history.truncate(keep);
        self.history.push(serialized);
        self.cursor = Some(keep);
    }

    /// Step back one history entry.
    pub async fn undo(&mut self) {
        let Some(index) = self.cursor else {
            return;
        };
        if index == 0 {
            return;
        }
        self.cursor = Some(index - 1);
        let snapshot = self.history[index - 1].clone();
        self.deserialize(snapshot).await;
    }

    /// Step forward one history entry.
    pub async fn redo(&mut self) {
        if self.history.is_empty() {
            return;
        }
        let next = match self.cursor {
            Some(index) if index + 1 >= self.history.len() => return,
            Some(index) => index + 1,
            None => 0,
        };
        self.cursor = Some(next);
        let snapshot = self.history[next].clone();
        self.deserialize(snapshot).await;
    }

    /// Pointer press lifecycle hook; snapshots the pre-interaction state.
    pub fn pointer_pressed(&mut self) {
        self.save_snapshot();
    }

    /// Pointer release lifecycle hook; snapshots the post-interaction state.
    pub fn pointer_released(&mut self) {
        self.save_snapshot();
    }

    /// Number of history entries.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Current history cursor; `None` before the history is seeded.
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// The history entry at the cursor.
    pub fn current_snapshot(&self) -> Option<&Snapshot> {
        self.cursor.and_then(|index| self.history.get(index))
    }

    /// Check whether an autosave tick is due, consuming it if so.
    pub fn autosave_due(&mut self, now: Instant) -> bool {
        self.coordinator.is_some() && self.timer.poll(now)
    }

    /// Run one autosave tick against the current history entry.
    pub async fn autosave(&self) {
        if let Some(coordinator) = &self.coordinator {
            coordinator.tick(self.current_snapshot()).await;
        }
    }

    /// The autosave coordinator, when a persistence target is configured.
    pub fn autosave_coordinator(&self) -> Option<&AutosaveCoordinator> {
        self.coordinator.as_ref()
    }

    /// Run one autosave cycle (when configured), then return the current
    /// serialization for export. A failed autosave is logged by the
    /// coordinator and does not block the export.
    pub async fn manual_save(&mut self) -> Option<Snapshot> {
        if self.coordinator.is_some() {
            self.autosave().await;
        }
        self.serialize()
    }

    /// Convenience for tools: add a node to the editable layer.
    pub fn add_node(&mut self, node: SceneNode) -> Option<crate::scene::NodeId> {
        self.editable_layer_mut().map(|layer| layer.add(node))
    }
}
