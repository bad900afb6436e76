use std::sync::Arc;

use super::checker::{Verdict, WatchdogTerminationChecker};
use super::reporter::WatchdogTerminationReporting;
use crate::error::ProbeError;
use crate::state::{AppStateManager, LaunchReport};

/// Runs one classification per cold start, then re-baselines the persisted state.
pub struct WatchdogTerminationMonitor {
    checker: WatchdogTerminationChecker,
    app_state_manager: AppStateManager,
    reporter: Arc<dyn WatchdogTerminationReporting>,
}

impl WatchdogTerminationMonitor {
    pub fn new(
        checker: WatchdogTerminationChecker,
        app_state_manager: AppStateManager,
        reporter: Arc<dyn WatchdogTerminationReporting>,
    ) -> Self {
        Self {
            checker,
            app_state_manager,
            reporter,
        }
    }

    pub fn app_state_manager(&self) -> &AppStateManager {
        &self.app_state_manager
    }

    /// Classifies the previous run and starts monitoring this one.
    ///
    /// Returns `None` when no classification took place: either no launch report was
    /// supplied or a probe failed. The new baseline is attempted in every case, and only
    /// after the previous snapshot has been read.
    pub async fn start(&self, launch_report: Option<LaunchReport>) -> Option<Verdict> {
        let verdict = match self.check_previous_run(launch_report).await {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::error!(error = %e, "failed to check for watchdog termination");
                None
            }
        };

        if let Err(e) = self.app_state_manager.start() {
            tracing::error!(error = %e, "failed to start app state monitoring");
        }

        verdict
    }

    pub fn stop(&self) {
        self.app_state_manager.stop();
    }

    async fn check_previous_run(
        &self,
        launch_report: Option<LaunchReport>,
    ) -> Result<Option<Verdict>, ProbeError> {
        let previous = self.app_state_manager.read_app_state().await;
        let current = self.app_state_manager.current_app_state()?;

        let Some(launch) = launch_report else {
            tracing::debug!("no launch report; skipping watchdog termination check");
            return Ok(None);
        };

        let verdict = self.checker.evaluate(&launch, previous.as_ref(), &current);
        match verdict {
            Verdict::WatchdogTermination => {
                tracing::info!(
                    app_version = %current.app_version,
                    "watchdog termination detected"
                );
                self.reporter.send();
            }
            Verdict::Explained(reason) => {
                tracing::debug!(?reason, "previous run end explained");
            }
        }
        Ok(Some(verdict))
    }
}
