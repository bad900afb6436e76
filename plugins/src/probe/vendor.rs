//! Per-install identifier persisted next to the app state.

use std::path::{Path, PathBuf};
use uuid::Uuid;

use watchdog_core::api::VendorIdProvider;

pub struct FileVendorIdProvider {
    vendor_id: Option<String>,
}

impl FileVendorIdProvider {
    /// Reads the id stored at `path`, creating one on first use. I/O failures leave it unset.
    pub fn load_or_create<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let vendor_id = match read_id(&path) {
            Some(id) => Some(id),
            None => create_id(&path),
        };
        Self { vendor_id }
    }
}

fn read_id(path: &Path) -> Option<String> {
    let s = std::fs::read_to_string(path).ok()?;
    let id = s.trim();
    (!id.is_empty()).then(|| id.to_string())
}

fn create_id(path: &Path) -> Option<String> {
    let id = Uuid::new_v4().to_string();
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            tracing::warn!(path = ?parent, error = %e, "cannot create vendor id directory");
            return None;
        }
    }
    match std::fs::write(path, &id) {
        Ok(()) => Some(id),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "cannot persist vendor id");
            None
        }
    }
}

impl VendorIdProvider for FileVendorIdProvider {
    fn vendor_id(&self) -> Option<String> {
        self.vendor_id.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn id_is_stable_across_instances() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("vendor-id");

        let first = FileVendorIdProvider::load_or_create(&path).vendor_id();
        let second = FileVendorIdProvider::load_or_create(&path).vendor_id();

        assert!(first.is_some());
        assert_eq!(first, second);
    }

    #[test]
    fn unwritable_location_yields_none() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();

        let provider = FileVendorIdProvider::load_or_create(blocker.join("vendor-id"));
        assert_eq!(provider.vendor_id(), None);
    }
}
