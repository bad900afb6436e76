//! 持久化的应用状态快照

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::store::DataStore;

/// 持久化存储中应用状态的固定键
pub const APP_STATE_KEY: &str = "app-state";

/// 快照编码版本，版本不一致的数据视为缺失
const APP_STATE_VERSION: u32 = 1;

/// 应用状态快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStateSnapshot {
    /// 应用版本
    pub app_version: String,
    /// 系统版本
    pub os_version: String,
    /// 设备启动时间（秒）
    pub system_boot_time: f64,
    /// 采集时是否挂载调试器
    pub is_debugging: bool,
    /// 是否收到优雅退出通知
    pub was_terminated: bool,
    /// 应用是否在前台
    pub is_active: bool,
    /// 安装标识
    pub vendor_id: Option<String>,
}

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    value: T,
}

/// 单键快照存储：JSON 编码，读取失败或数据损坏一律视为缺失
#[derive(Clone)]
pub struct AppStateStore {
    store: Arc<dyn DataStore>,
    key: String,
}

impl AppStateStore {
    pub fn new(store: Arc<dyn DataStore>) -> Self {
        Self::with_key(store, APP_STATE_KEY)
    }

    pub fn with_key(store: Arc<dyn DataStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 读取快照
    pub async fn read(&self) -> Option<AppStateSnapshot> {
        let bytes = match self.store.value(&self.key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to read app state");
                return None;
            }
        };

        match serde_json::from_slice::<Envelope<AppStateSnapshot>>(&bytes) {
            Ok(env) if env.version == APP_STATE_VERSION => Some(env.value),
            Ok(env) => {
                tracing::warn!(
                    key = %self.key,
                    version = env.version,
                    "discarding app state with unsupported version"
                );
                None
            }
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "discarding undecodable app state");
                None
            }
        }
    }

    /// 写入快照（覆盖）
    pub async fn write(&self, state: &AppStateSnapshot) {
        let env = Envelope {
            version: APP_STATE_VERSION,
            value: state,
        };
        let bytes = match serde_json::to_vec(&env) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(key = %self.key, error = %e, "failed to encode app state");
                return;
            }
        };
        if let Err(e) = self.store.set_value(&self.key, bytes).await {
            tracing::warn!(key = %self.key, error = %e, "failed to write app state");
        }
    }

    /// 删除快照
    pub async fn delete(&self) {
        if let Err(e) = self.store.remove_value(&self.key).await {
            tracing::warn!(key = %self.key, error = %e, "failed to delete app state");
        }
    }
}
