//! Key-value persistence seam.
//!
//! Implementations must serialize reads and writes per key: no read observes a
//! write in progress and two writes never interleave into a torn value.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::error::StoreError;

#[async_trait]
pub trait DataStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;
    async fn set_value(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;
    async fn remove_value(&self, key: &str) -> Result<(), StoreError>;
}

/// Process-local store, last write wins.
#[derive(Default)]
pub struct InMemoryDataStore {
    entries: Mutex<HashMap<String, Vec<u8>>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    async fn value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn set_value(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn remove_value(&self, key: &str) -> Result<(), StoreError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}
