//! Periodic remote persistence of the current history entry.
//!
//! The stage owns an [`AutosaveTimer`] and drives the [`AutosaveCoordinator`]
//! whenever a tick is due. The coordinator skips redundant and overlapping
//! saves and never escalates a failed save beyond a log line: the stale
//! `last_saved` value makes the next tick retry the same content.

use crate::api::{ProjectApi, UpdateProject};
use crate::feedback::UiFeedback;
use crate::snapshot::Snapshot;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Instant;

#[cfg(target_arch = "wasm32")]
use web_time::Instant;

/// Default autosave interval.
pub const DEFAULT_SAVE_INTERVAL_MS: u64 = 30_000;

/// How long hosts keep the transient "saved" notification visible.
pub const SAVED_NOTICE_MS: u64 = 3_000;

/// Interval timer for autosave ticks.
///
/// Created by the stage on attach when a persistence target is configured
/// and stopped on detach. `start` and `stop` are idempotent.
#[derive(Debug)]
pub struct AutosaveTimer {
    interval: Duration,
    last_fire: Option<Instant>,
    running: bool,
}

impl AutosaveTimer {
    /// Create a stopped timer with the given interval.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_fire: None,
            running: false,
        }
    }

    /// Start the timer. Starting a running timer restarts it.
    pub fn start(&mut self, now: Instant) {
        if self.running {
            self.stop();
        }
        self.running = true;
        self.last_fire = Some(now);
        log::info!(
            "Auto-save started (every {} seconds)",
            self.interval.as_secs()
        );
    }

    /// Stop the timer. Stopping a stopped timer is a no-op.
    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            self.last_fire = None;
            log::info!("Auto-save stopped");
        }
    }

    /// Whether the timer is running.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Check whether a tick is due, consuming it if so.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.running {
            return false;
        }
        match self.last_fire {
            Some(last) if now.duration_since(last) >= self.interval => {
                self.last_fire = Some(now);
                true
            }
            Some(_) => false,
            None => {
                self.last_fire = Some(now);
                false
            }
        }
    }
}

/// Persists the current history entry through the remote project API.
///
/// The `saving` flag is the sole overlap guard. That is sufficient only
/// because the surrounding scheduler is cooperative: the flag is read and set
/// before the first suspension point of a tick, so a second tick arriving
/// while a save is in flight observes it and skips. It is not safe against
/// preemptive threads.
pub struct AutosaveCoordinator {
    api: Rc<dyn ProjectApi>,
    project_id: String,
    feedback: Rc<dyn UiFeedback>,
    last_saved: RefCell<Option<Snapshot>>,
    saving: Cell<bool>,
}

impl AutosaveCoordinator {
    /// Create a coordinator for the given project.
    pub fn new(
        api: Rc<dyn ProjectApi>,
        project_id: impl Into<String>,
        feedback: Rc<dyn UiFeedback>,
    ) -> Self {
        Self {
            api,
            project_id: project_id.into(),
            feedback,
            last_saved: RefCell::new(None),
            saving: Cell::new(false),
        }
    }

    /// Whether a save is currently in flight.
    pub fn is_saving(&self) -> bool {
        self.saving.get()
    }

    /// The last snapshot successfully persisted, if any.
    pub fn last_saved(&self) -> Option<Snapshot> {
        self.last_saved.borrow().clone()
    }

    /// Run one autosave tick against the current history entry.
    ///
    /// Skips when a save is in flight, when there is no current entry, or
    /// when the entry equals the last persisted snapshot. The saving
    /// indicator is lowered and the in-flight flag cleared regardless of the
    /// outcome.
    pub async fn tick(&self, current: Option<&Snapshot>) {
        if self.saving.get() {
            return;
        }
        let Some(current) = current else {
            return;
        };
        if self.last_saved.borrow().as_ref() == Some(current) {
            return;
        }

        self.saving.set(true);
        self.feedback.set_saving(true);

        let request = UpdateProject {
            id: self.project_id.clone(),
            content: current.clone(),
        };
        match self.api.update(request).await {
            Ok(()) => {
                *self.last_saved.borrow_mut() = Some(current.clone());
                log::debug!("Save successful");
                self.feedback.notify_saved();
            }
            Err(err) => {
                log::error!("Save error: {}", err);
            }
        }

        self.saving.set(false);
        self.feedback.set_saving(false);
    }
}
