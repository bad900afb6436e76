//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `watchdog_core::api` instead of reaching into internal modules.

pub use crate::bus::{ContextUpdate, FeatureMessage, FeatureMessageReceiver, MessageBus};
pub use crate::config::{
    load_default, AppConfig, DeviceConfig, EventsOutConfig, LoggingConfig, StoreProvider,
    WatchdogConfig,
};
pub use crate::context::{AppContext, Services, ServicesFactory};
pub use crate::error::{CliError, ProbeError, StoreError};
pub use crate::events_out::EventsOutTx;
pub use crate::probe::{EnvironmentProbe, StaticVendorIdProvider, VendorIdProvider};
pub use crate::state::{
    AppLifecycleState, AppStateManager, AppStateSnapshot, AppStateStore, DeviceInfo,
    LaunchReport, StateTransition, APP_STATE_KEY,
};
pub use crate::store::{DataStore, InMemoryDataStore};
pub use crate::watchdog::{
    classify, EventsOutReporter, Explanation, LogReporter, Verdict, WatchdogTerminationChecker,
    WatchdogTerminationMonitor, WatchdogTerminationReporting,
};
