use crate::config::AppConfig;
use crate::error::CliError;
use crate::events_out::{start_events_out, EventsOutTx};
use crate::probe::{EnvironmentProbe, VendorIdProvider};
use crate::state::{AppStateManager, AppStateStore, DeviceInfo};
use crate::store::DataStore;
use crate::watchdog::{
    EventsOutReporter, LogReporter, WatchdogTerminationChecker, WatchdogTerminationMonitor,
    WatchdogTerminationReporting,
};
use std::sync::Arc;

#[derive(Clone)]
pub struct Services {
    pub data_store: Arc<dyn DataStore>,
    pub probe: Arc<dyn EnvironmentProbe>,
    pub vendor_id: Arc<dyn VendorIdProvider>,
    pub device_info: DeviceInfo,
}

#[async_trait::async_trait]
pub trait ServicesFactory: Send + Sync {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError>;
}

#[derive(Clone)]
pub struct AppContext {
    cfg: AppConfig,
    events_out: Option<EventsOutTx>,
    services_factory: Option<Arc<dyn ServicesFactory>>,
}

impl AppContext {
    pub async fn new(
        cfg: AppConfig,
        services_factory: Option<Arc<dyn ServicesFactory>>,
    ) -> Result<Self, CliError> {
        let events_out = start_events_out(&cfg.events_out)
            .await
            .map_err(CliError::Config)?;
        Ok(Self {
            cfg,
            events_out,
            services_factory,
        })
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn events_out(&self) -> Option<EventsOutTx> {
        self.events_out.clone()
    }

    /// Waits for queued events-out lines to reach the sink.
    pub async fn flush(&self) {
        if let Some(out) = self.events_out.as_ref() {
            out.flush().await;
        }
    }

    pub async fn build_services(&self) -> Result<Services, CliError> {
        let Some(factory) = self.services_factory.as_ref() else {
            return Err(CliError::Config(
                "services_factory missing (cannot build store/probes)".into(),
            ));
        };
        factory.build_services(&self.cfg).await
    }

    fn reporter(&self) -> Arc<dyn WatchdogTerminationReporting> {
        match self.events_out.clone() {
            Some(out) => Arc::new(EventsOutReporter::new(out, self.cfg.app_version.clone())),
            None => Arc::new(LogReporter),
        }
    }

    /// Wires services into a monitor. Must run inside a Tokio runtime.
    pub async fn build_monitor(&self) -> Result<WatchdogTerminationMonitor, CliError> {
        let services = self.build_services().await?;
        let store =
            AppStateStore::with_key(services.data_store, self.cfg.watchdog.store_key.clone());
        let manager = AppStateManager::new(
            store,
            services.probe,
            services.vendor_id,
            self.cfg.app_version.clone(),
        );
        let checker = WatchdogTerminationChecker::new(services.device_info);
        Ok(WatchdogTerminationMonitor::new(checker, manager, self.reporter()))
    }
}
