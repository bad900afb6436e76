use std::path::{Path, PathBuf};

use super::types::{AppConfig, StoreProvider};

/// Get the default watchdog data directory: ~/.watchdog
pub fn get_watchdog_data_dir() -> anyhow::Result<PathBuf> {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map_err(|_| anyhow::anyhow!("Cannot determine home directory"))?;
    Ok(PathBuf::from(home).join(".watchdog"))
}

pub fn load_from_str(s: &str) -> anyhow::Result<AppConfig> {
    Ok(toml::from_str::<AppConfig>(s)?)
}

pub fn load_default() -> anyhow::Result<AppConfig> {
    // Priority 1: ~/.watchdog/config.toml (highest)
    let default_dir = get_watchdog_data_dir()?;
    let user_config = default_dir.join("config.toml");

    // Priority 2: ./config.toml (current directory)
    let local_config = Path::new("config.toml");

    let mut cfg: AppConfig = if user_config.exists() {
        load_from_str(&std::fs::read_to_string(&user_config)?)?
    } else if local_config.exists() {
        load_from_str(&std::fs::read_to_string(local_config)?)?
    } else {
        AppConfig::default()
    };

    apply_env_overrides(&mut cfg);
    resolve_paths(&mut cfg, &default_dir)?;

    Ok(cfg)
}

/// Environment variable overrides (Priority 0: highest)
fn apply_env_overrides(cfg: &mut AppConfig) {
    if let Ok(v) = std::env::var("WATCHDOG_APP_VERSION") {
        if !v.trim().is_empty() {
            cfg.app_version = v.trim().to_string();
        }
    }
    if let Ok(v) = std::env::var("WATCHDOG_DATA_DIR") {
        if !v.trim().is_empty() {
            cfg.data_dir = Some(v.trim().to_string());
        }
    }
    if let Some(v) = env_flag("WATCHDOG_SIMULATOR") {
        cfg.device.is_simulator = v;
    }
    if let Some(v) = env_flag("WATCHDOG_ENABLED") {
        cfg.watchdog.enabled = v;
    }
}

fn env_flag(name: &str) -> Option<bool> {
    let v = std::env::var(name).ok()?;
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Fill unset directories below the data directory and make sure they exist.
fn resolve_paths(cfg: &mut AppConfig, default_dir: &Path) -> anyhow::Result<()> {
    let data_dir = match cfg.data_dir.as_deref().map(str::trim) {
        Some(d) if !d.is_empty() => PathBuf::from(d),
        _ => default_dir.to_path_buf(),
    };
    std::fs::create_dir_all(&data_dir)?;
    cfg.data_dir = Some(data_dir.to_string_lossy().to_string());

    if let StoreProvider::File(ref mut file_cfg) = cfg.store.provider {
        if is_blank(file_cfg.directory.as_deref()) {
            let store_dir = data_dir.join("store");
            std::fs::create_dir_all(&store_dir)?;
            file_cfg.directory = Some(store_dir.to_string_lossy().to_string());
        }
    }

    if is_blank(cfg.logging.directory.as_deref()) {
        let logs_dir = data_dir.join("logs");
        std::fs::create_dir_all(&logs_dir)?;
        cfg.logging.directory = Some(logs_dir.to_string_lossy().to_string());
    }

    // Update events_out path to use the data directory if using default
    if cfg.events_out.path == "./watchdog.events.jsonl" {
        cfg.events_out.path = data_dir
            .join("watchdog.events.jsonl")
            .to_string_lossy()
            .to_string();
    }

    Ok(())
}

fn is_blank(s: Option<&str>) -> bool {
    s.map(|s| s.trim().is_empty()).unwrap_or(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileStoreConfig;
    use tempfile::TempDir;

    #[test]
    fn empty_document_uses_defaults() {
        let cfg = load_from_str("").unwrap();
        assert!(cfg.watchdog.enabled);
        assert_eq!(cfg.watchdog.store_key, "app-state");
        assert!(!cfg.device.is_simulator);
        assert!(matches!(cfg.store.provider, StoreProvider::File(_)));
    }

    #[test]
    fn parses_memory_store_and_device_sections() {
        let cfg = load_from_str(
            r#"
            app_version = "2.4.1"

            [store]
            provider = "memory"

            [device]
            is_simulator = true
            "#,
        )
        .unwrap();
        assert_eq!(cfg.app_version, "2.4.1");
        assert!(matches!(cfg.store.provider, StoreProvider::Memory));
        assert!(cfg.device.is_simulator);
    }

    #[test]
    fn resolve_paths_fills_directories_under_data_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut cfg = AppConfig {
            data_dir: Some(temp_dir.path().to_string_lossy().to_string()),
            ..AppConfig::default()
        };

        resolve_paths(&mut cfg, Path::new("/unused")).unwrap();

        let StoreProvider::File(FileStoreConfig { directory }) = &cfg.store.provider else {
            panic!("expected file store");
        };
        assert_eq!(
            directory.as_deref().map(PathBuf::from),
            Some(temp_dir.path().join("store"))
        );
        assert!(temp_dir.path().join("logs").is_dir());
        assert!(cfg.events_out.path.ends_with("watchdog.events.jsonl"));
        assert!(cfg.events_out.path.starts_with(&*temp_dir.path().to_string_lossy()));
    }
}
