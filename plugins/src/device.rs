use sysinfo::System;
use watchdog_core::api::{AppConfig, DeviceInfo};

pub fn device_info(cfg: &AppConfig) -> DeviceInfo {
    DeviceInfo {
        name: System::host_name().unwrap_or_default(),
        model: System::distribution_id(),
        os_name: System::name().unwrap_or_default(),
        os_version: System::os_version().unwrap_or_default(),
        architecture: std::env::consts::ARCH.to_string(),
        is_simulator: cfg.device.is_simulator,
    }
}
