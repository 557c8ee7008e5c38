//! Local key-value persistence.
//!
//! Durable string storage for snapshots outside the remote project store:
//! browser key-value storage on the web, a file per key on native.

mod memory;

#[cfg(not(target_arch = "wasm32"))]
mod file;

pub use memory::MemoryStore;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;

use crate::api::BoxFuture;
use thiserror::Error;

/// Key under which the last snapshot string is cached for the load action.
pub const STAGE_CACHE_KEY: &str = "stage";

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("storage error: {0}")]
    Other(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Trait for durable key-value backends.
///
/// Note: futures are boxed and non-Send, matching the single-threaded
/// browser host; native callers drive them to completion on one thread.
pub trait KeyValueStore {
    /// Read a value; `None` when the key is absent.
    fn get(&self, key: &str) -> BoxFuture<'_, StoreResult<Option<String>>>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, StoreResult<()>>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> BoxFuture<'_, StoreResult<()>>;

    /// Check whether a key is present.
    fn contains(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>>;
}
