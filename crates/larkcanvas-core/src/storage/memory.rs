//! In-memory storage implementation.

use super::{KeyValueStore, StoreError, StoreResult};
use crate::api::BoxFuture;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory store for testing and ephemeral use.
#[derive(Default)]
pub struct MemoryStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> BoxFuture<'_, StoreResult<Option<String>>> {
        let key = key.to_string();
        Box::pin(async move {
            let values = self
                .values
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(values.get(&key).cloned())
        })
    }

    fn set(&self, key: &str, value: &str) -> BoxFuture<'_, StoreResult<()>> {
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            let mut values = self
                .values
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            values.insert(key, value);
            Ok(())
        })
    }

    fn remove(&self, key: &str) -> BoxFuture<'_, StoreResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut values = self
                .values
                .write()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            values.remove(&key);
            Ok(())
        })
    }

    fn contains(&self, key: &str) -> BoxFuture<'_, StoreResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let values = self
                .values
                .read()
                .map_err(|e| StoreError::Other(format!("Lock error: {}", e)))?;
            Ok(values.contains_key(&key))
        })
    }
}
