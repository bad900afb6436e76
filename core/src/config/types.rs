use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Version of the monitored application build.
    #[serde(default = "default_app_version")]
    pub app_version: String,

    /// Root directory for persisted state, vendor id and logs. Resolved by the loader when unset.
    #[serde(default)]
    pub data_dir: Option<String>,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub watchdog: WatchdogConfig,

    #[serde(default)]
    pub store: StoreConfig,

    #[serde(default)]
    pub device: DeviceConfig,

    #[serde(default)]
    pub events_out: EventsOutConfig,
}

fn default_app_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_version: default_app_version(),
            data_dir: None,
            logging: LoggingConfig::default(),
            watchdog: WatchdogConfig::default(),
            store: StoreConfig::default(),
            device: DeviceConfig::default(),
            events_out: EventsOutConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "watchdog_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchdogConfig {
    #[serde(default = "default_watchdog_enabled")]
    pub enabled: bool,

    /// Key of the single persisted app-state slot.
    #[serde(default = "default_store_key")]
    pub store_key: String,
}

fn default_watchdog_enabled() -> bool {
    true
}

fn default_store_key() -> String {
    crate::state::APP_STATE_KEY.to_string()
}

impl Default for WatchdogConfig {
    fn default() -> Self {
        Self {
            enabled: default_watchdog_enabled(),
            store_key: default_store_key(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default = "default_store_provider")]
    #[serde(flatten)]
    pub provider: StoreProvider,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "provider")]
pub enum StoreProvider {
    #[serde(rename = "file")]
    File(FileStoreConfig),
    /// Process-local store; nothing survives a restart.
    #[serde(rename = "memory")]
    Memory,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Directory holding one file per key. Defaults to `<data_dir>/store`.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_store_provider() -> StoreProvider {
    StoreProvider::File(FileStoreConfig::default())
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_store_provider(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Simulated devices are exempt from watchdog termination reports.
    #[serde(default)]
    pub is_simulator: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventsOutConfig {
    pub enabled: bool,
    pub path: String,
    pub channel_capacity: usize,
    pub drop_when_full: bool,
}

impl Default for EventsOutConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: "./watchdog.events.jsonl".to_string(),
            channel_capacity: 256,
            drop_when_full: true,
        }
    }
}
