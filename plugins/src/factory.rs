use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;

use watchdog_core::api::{
    AppConfig, DataStore, EnvironmentProbe, InMemoryDataStore, StoreProvider, VendorIdProvider,
};

use crate::probe::{FileVendorIdProvider, SystemProbe};
use crate::store::FileDataStore;

fn data_dir(cfg: &AppConfig) -> Result<PathBuf> {
    match cfg.data_dir.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => Ok(PathBuf::from(d)),
        _ => watchdog_core::config::get_watchdog_data_dir(),
    }
}

pub fn build_data_store(cfg: &AppConfig) -> Result<Arc<dyn DataStore>> {
    match &cfg.store.provider {
        StoreProvider::File(file_cfg) => {
            let dir = match file_cfg.directory.as_deref().map(str::trim) {
                Some(d) if !d.is_empty() => PathBuf::from(d),
                _ => data_dir(cfg)?.join("store"),
            };
            let store = FileDataStore::new(dir).context("Failed to open file store")?;
            Ok(Arc::new(store))
        }
        StoreProvider::Memory => Ok(Arc::new(InMemoryDataStore::new())),
    }
}

pub fn build_probe(_cfg: &AppConfig) -> Arc<dyn EnvironmentProbe> {
    Arc::new(SystemProbe::new())
}

pub fn build_vendor_id_provider(cfg: &AppConfig) -> Result<Arc<dyn VendorIdProvider>> {
    let path = data_dir(cfg)?.join("vendor-id");
    Ok(Arc::new(FileVendorIdProvider::load_or_create(path)))
}
