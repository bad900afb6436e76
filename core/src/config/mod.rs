mod load;
mod types;

pub use load::{get_watchdog_data_dir, load_default, load_from_str};
pub use types::{
    AppConfig, DeviceConfig, EventsOutConfig, FileStoreConfig, LoggingConfig, StoreConfig,
    StoreProvider, WatchdogConfig,
};
