//! Two simulated launches over one in-memory store: the first run is left in the
//! foreground when it "dies", so the second launch reports a watchdog termination.

use anyhow::Result;
use std::sync::Arc;
use watchdog_core::api::{
    AppLifecycleState, AppStateManager, AppStateStore, DataStore, DeviceInfo, EnvironmentProbe,
    InMemoryDataStore, LaunchReport, LogReporter, MessageBus, ProbeError, StaticVendorIdProvider,
    WatchdogTerminationChecker, WatchdogTerminationMonitor,
};

struct FixedProbe;

impl EnvironmentProbe for FixedProbe {
    fn system_boot_time(&self) -> Result<f64, ProbeError> {
        Ok(1_700_000_000.0)
    }

    fn os_version(&self) -> Result<String, ProbeError> {
        Ok("17.2".to_string())
    }

    fn is_debugging(&self) -> Result<bool, ProbeError> {
        Ok(false)
    }
}

fn launch(store: Arc<dyn DataStore>) -> (WatchdogTerminationMonitor, MessageBus) {
    let manager = AppStateManager::new(
        AppStateStore::new(store),
        Arc::new(FixedProbe),
        Arc::new(StaticVendorIdProvider::new(Some("install-1".into()))),
        "1.0.0",
    );
    let bus = MessageBus::new();
    bus.subscribe(Arc::new(manager.clone()));
    let checker = WatchdogTerminationChecker::new(DeviceInfo::default());
    (
        WatchdogTerminationMonitor::new(checker, manager, Arc::new(LogReporter)),
        bus,
    )
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("watchdog_core=debug,watchdog=warn")
        .init();

    let store: Arc<dyn DataStore> = Arc::new(InMemoryDataStore::new());

    let (monitor, bus) = launch(store.clone());
    println!("first launch: {:?}", monitor.start(None).await);
    bus.publish_state(AppLifecycleState::Background);
    bus.publish_state(AppLifecycleState::Active);
    println!(
        "persisted before kill: {:?}",
        monitor.app_state_manager().read_app_state().await
    );

    let (monitor, _bus) = launch(store);
    let verdict = monitor.start(Some(LaunchReport::new(false))).await;
    println!("second launch: {:?}", verdict);

    Ok(())
}
