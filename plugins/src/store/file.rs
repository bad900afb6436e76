//! File-backed key-value store: one JSON document per key under a directory.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

use watchdog_core::api::{DataStore, StoreError};

pub struct FileDataStore {
    directory: PathBuf,
    /// Serializes every operation so a read never sees a half-written file.
    lock: Mutex<()>,
}

impl FileDataStore {
    pub fn new<P: Into<PathBuf>>(directory: P) -> Result<Self> {
        let directory = directory.into();
        std::fs::create_dir_all(&directory)
            .with_context(|| format!("Failed to create store directory: {:?}", directory))?;
        Ok(Self {
            directory,
            lock: Mutex::new(()),
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.directory.join(format!("{name}.json"))
    }
}

#[async_trait]
impl DataStore for FileDataStore {
    async fn value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::read(self.path_for(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set_value(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &value).await?;
        tokio::fs::rename(&tmp, &path).await?;
        tracing::trace!(path = ?path, bytes = value.len(), "stored value");
        Ok(())
    }

    async fn remove_value(&self, key: &str) -> Result<(), StoreError> {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stores_and_removes_values() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDataStore::new(temp_dir.path()).unwrap();

        assert!(store.value("app-state").await.unwrap().is_none());

        store.set_value("app-state", b"one".to_vec()).await.unwrap();
        store.set_value("app-state", b"two".to_vec()).await.unwrap();
        assert_eq!(store.value("app-state").await.unwrap(), Some(b"two".to_vec()));
        assert!(temp_dir.path().join("app-state.json").is_file());

        store.remove_value("app-state").await.unwrap();
        assert!(store.value("app-state").await.unwrap().is_none());
        store.remove_value("app-state").await.unwrap();
    }

    #[tokio::test]
    async fn survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        FileDataStore::new(temp_dir.path())
            .unwrap()
            .set_value("k", b"v".to_vec())
            .await
            .unwrap();

        let reopened = FileDataStore::new(temp_dir.path()).unwrap();
        assert_eq!(reopened.value("k").await.unwrap(), Some(b"v".to_vec()));
    }

    #[test]
    fn keys_are_sanitized_into_file_names() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDataStore::new(temp_dir.path()).unwrap();
        assert_eq!(
            store.path_for("../evil key"),
            temp_dir.path().join("___evil_key.json")
        );
    }
}
