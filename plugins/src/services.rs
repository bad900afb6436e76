//! ServicesFactory implementation: builds store, probes and identity from config for the CLI.
use async_trait::async_trait;
use watchdog_core::api::{AppConfig, CliError, Services, ServicesFactory};

use crate::{device, factory};

pub struct PluginServicesFactory;

impl Default for PluginServicesFactory {
    fn default() -> Self {
        Self
    }
}

#[async_trait]
impl ServicesFactory for PluginServicesFactory {
    async fn build_services(&self, cfg: &AppConfig) -> Result<Services, CliError> {
        let data_store = factory::build_data_store(cfg)?;
        let probe = factory::build_probe(cfg);
        let vendor_id = factory::build_vendor_id_provider(cfg)?;
        let device_info = device::device_info(cfg);
        Ok(Services {
            data_store,
            probe,
            vendor_id,
            device_info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use tempfile::TempDir;
    use watchdog_core::api::{AppContext, Explanation, LaunchReport, StoreProvider, Verdict};

    #[tokio::test]
    async fn context_builds_a_working_monitor() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = AppConfig {
            data_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..AppConfig::default()
        };
        cfg.store.provider = StoreProvider::Memory;
        cfg.events_out.enabled = false;

        let ctx = AppContext::new(cfg, Some(Arc::new(PluginServicesFactory)))
            .await
            .unwrap();
        let probe = ctx.build_services().await.unwrap().probe;
        let probed = probe
            .system_boot_time()
            .and(probe.os_version())
            .and(probe.is_debugging());
        if let Err(e) = probed {
            eprintln!("skipping: host environment cannot be queried ({e})");
            return;
        }
        let monitor = ctx.build_monitor().await.unwrap();

        // first launch has nothing to compare against
        let verdict = monitor.start(Some(LaunchReport::new(false))).await;
        assert_eq!(verdict, Some(Verdict::Explained(Explanation::NoPreviousState)));
        assert!(monitor.app_state_manager().is_monitoring());
    }
}
