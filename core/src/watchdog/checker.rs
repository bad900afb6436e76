use serde::Serialize;

use crate::state::{AppStateSnapshot, DeviceInfo, LaunchReport};

/// Outcome of comparing the previous run's snapshot with the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "verdict", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    WatchdogTermination,
    Explained(Explanation),
}

impl Verdict {
    pub fn is_watchdog_termination(&self) -> bool {
        matches!(self, Self::WatchdogTermination)
    }
}

/// The first observed fact that accounts for the previous run ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Explanation {
    NoPreviousState,
    Simulator,
    Debugging,
    AppVersionChanged,
    Crashed,
    GracefullyTerminated,
    OsVersionChanged,
    DeviceRebooted,
    VendorIdChanged,
    InBackground,
}

/// Every condition must hold for the launch to count as a watchdog termination.
pub fn evaluate(
    launch: &LaunchReport,
    previous: Option<&AppStateSnapshot>,
    current: &AppStateSnapshot,
    is_simulator: bool,
) -> Verdict {
    let Some(previous) = previous else {
        return Verdict::Explained(Explanation::NoPreviousState);
    };

    let explanation = if is_simulator {
        Some(Explanation::Simulator)
    } else if previous.is_debugging {
        Some(Explanation::Debugging)
    } else if previous.app_version != current.app_version {
        Some(Explanation::AppVersionChanged)
    } else if launch.did_crash {
        Some(Explanation::Crashed)
    } else if previous.was_terminated {
        Some(Explanation::GracefullyTerminated)
    } else if previous.os_version != current.os_version {
        Some(Explanation::OsVersionChanged)
    } else if previous.system_boot_time != current.system_boot_time {
        Some(Explanation::DeviceRebooted)
    } else if previous.vendor_id != current.vendor_id {
        Some(Explanation::VendorIdChanged)
    } else if !previous.is_active {
        Some(Explanation::InBackground)
    } else {
        None
    };

    match explanation {
        Some(e) => Verdict::Explained(e),
        None => Verdict::WatchdogTermination,
    }
}

pub fn classify(
    launch: &LaunchReport,
    previous: Option<&AppStateSnapshot>,
    current: &AppStateSnapshot,
    is_simulator: bool,
) -> bool {
    evaluate(launch, previous, current, is_simulator).is_watchdog_termination()
}

pub struct WatchdogTerminationChecker {
    device_info: DeviceInfo,
}

impl WatchdogTerminationChecker {
    pub fn new(device_info: DeviceInfo) -> Self {
        Self { device_info }
    }

    pub fn device_info(&self) -> &DeviceInfo {
        &self.device_info
    }

    pub fn evaluate(
        &self,
        launch: &LaunchReport,
        previous: Option<&AppStateSnapshot>,
        current: &AppStateSnapshot,
    ) -> Verdict {
        evaluate(launch, previous, current, self.device_info.is_simulator)
    }

    pub fn is_watchdog_termination(
        &self,
        launch: &LaunchReport,
        previous: Option<&AppStateSnapshot>,
        current: &AppStateSnapshot,
    ) -> bool {
        classify(launch, previous, current, self.device_info.is_simulator)
    }
}
