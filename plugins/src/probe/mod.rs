pub mod system;
pub mod vendor;

pub use system::SystemProbe;
pub use vendor::FileVendorIdProvider;
