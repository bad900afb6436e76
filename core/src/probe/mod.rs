//! Environment and identity queries consumed when building a snapshot.

use crate::error::ProbeError;

/// Synchronous, fallible queries against the OS. Call off latency-critical paths.
pub trait EnvironmentProbe: Send + Sync {
    /// Device boot timestamp in seconds since the Unix epoch.
    fn system_boot_time(&self) -> Result<f64, ProbeError>;
    fn os_version(&self) -> Result<String, ProbeError>;
    fn is_debugging(&self) -> Result<bool, ProbeError>;
}

/// Stable per-install identifier. Absence is a valid answer.
pub trait VendorIdProvider: Send + Sync {
    fn vendor_id(&self) -> Option<String>;
}

#[derive(Debug, Clone, Default)]
pub struct StaticVendorIdProvider {
    vendor_id: Option<String>,
}

impl StaticVendorIdProvider {
    pub fn new(vendor_id: Option<String>) -> Self {
        Self { vendor_id }
    }
}

impl VendorIdProvider for StaticVendorIdProvider {
    fn vendor_id(&self) -> Option<String> {
        self.vendor_id.clone()
    }
}
