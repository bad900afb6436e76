#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use watchdog_core::api::{
    AppStateManager, AppStateStore, DataStore, EnvironmentProbe, InMemoryDataStore, ProbeError,
    StaticVendorIdProvider, StoreError, WatchdogTerminationReporting,
};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter("watchdog_core=debug")
        .try_init();
}

/// Probe whose answers can be changed between simulated launches.
pub struct StubProbe {
    pub boot_time: Mutex<Result<f64, ProbeError>>,
    pub os_version: Mutex<String>,
    pub is_debugging: Mutex<bool>,
}

impl StubProbe {
    pub fn new(boot_time: f64, os_version: &str, is_debugging: bool) -> Arc<Self> {
        Arc::new(Self {
            boot_time: Mutex::new(Ok(boot_time)),
            os_version: Mutex::new(os_version.to_string()),
            is_debugging: Mutex::new(is_debugging),
        })
    }

    pub fn set_boot_time(&self, boot_time: Result<f64, ProbeError>) {
        *self.boot_time.lock().unwrap() = boot_time;
    }
}

impl EnvironmentProbe for StubProbe {
    fn system_boot_time(&self) -> Result<f64, ProbeError> {
        self.boot_time.lock().unwrap().clone()
    }

    fn os_version(&self) -> Result<String, ProbeError> {
        Ok(self.os_version.lock().unwrap().clone())
    }

    fn is_debugging(&self) -> Result<bool, ProbeError> {
        Ok(*self.is_debugging.lock().unwrap())
    }
}

#[derive(Default)]
pub struct CountingReporter {
    sent: AtomicUsize,
}

impl CountingReporter {
    pub fn count(&self) -> usize {
        self.sent.load(Ordering::SeqCst)
    }
}

impl WatchdogTerminationReporting for CountingReporter {
    fn send(&self) {
        self.sent.fetch_add(1, Ordering::SeqCst);
    }
}

/// In-memory store that counts writes.
#[derive(Default)]
pub struct CountingDataStore {
    inner: InMemoryDataStore,
    writes: AtomicUsize,
}

impl CountingDataStore {
    pub fn writes(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataStore for CountingDataStore {
    async fn value(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner.value(key).await
    }

    async fn set_value(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_value(key, value).await
    }

    async fn remove_value(&self, key: &str) -> Result<(), StoreError> {
        self.inner.remove_value(key).await
    }
}

pub fn manager(
    store: Arc<dyn DataStore>,
    probe: Arc<StubProbe>,
    vendor_id: &str,
    app_version: &str,
) -> AppStateManager {
    AppStateManager::new(
        AppStateStore::new(store),
        probe,
        Arc::new(StaticVendorIdProvider::new(Some(vendor_id.to_string()))),
        app_version,
    )
}
