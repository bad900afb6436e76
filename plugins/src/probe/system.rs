//! Environment probe backed by `sysinfo` and, on Linux, procfs.

use sysinfo::System;
use watchdog_core::api::{EnvironmentProbe, ProbeError};

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProbe;

impl SystemProbe {
    pub fn new() -> Self {
        Self
    }
}

impl EnvironmentProbe for SystemProbe {
    fn system_boot_time(&self) -> Result<f64, ProbeError> {
        match System::boot_time() {
            0 => Err(ProbeError::BootTime("boot time not reported".into())),
            secs => Ok(secs as f64),
        }
    }

    fn os_version(&self) -> Result<String, ProbeError> {
        System::long_os_version()
            .or_else(System::os_version)
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ProbeError::OsVersion("os version not reported".into()))
    }

    fn is_debugging(&self) -> Result<bool, ProbeError> {
        is_traced()
    }
}

#[cfg(target_os = "linux")]
fn is_traced() -> Result<bool, ProbeError> {
    let status = std::fs::read_to_string("/proc/self/status")
        .map_err(|e| ProbeError::DebugStatus(e.to_string()))?;
    parse_tracer_pid(&status)
        .map(|pid| pid != 0)
        .ok_or_else(|| ProbeError::DebugStatus("TracerPid missing".into()))
}

// No tracer query available; treat as not debugged.
#[cfg(not(target_os = "linux"))]
fn is_traced() -> Result<bool, ProbeError> {
    Ok(false)
}

#[cfg_attr(not(target_os = "linux"), allow(dead_code))]
fn parse_tracer_pid(status: &str) -> Option<u32> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("TracerPid:"))
        .and_then(|v| v.trim().parse().ok())
}
