//! 应用状态管理器
//!
//! 维护持久化快照的生命周期：启动时写入新基线，运行期间将生命周期事件
//! 映射为字段级更新。所有存储操作按提交顺序在同一个后台任务中执行。

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::{mpsc, oneshot};

use super::snapshot::{AppStateSnapshot, AppStateStore};
use super::transitions::StateTransition;
use super::types::AppLifecycleState;
use crate::bus::{FeatureMessage, FeatureMessageReceiver};
use crate::error::ProbeError;
use crate::probe::{EnvironmentProbe, VendorIdProvider};

/// 应用状态管理器
#[derive(Clone)]
pub struct AppStateManager {
    inner: Arc<AppStateManagerInner>,
}

struct AppStateManagerInner {
    app_version: String,
    probe: Arc<dyn EnvironmentProbe>,
    vendor_id_provider: Arc<dyn VendorIdProvider>,
    /// 监控标志与最近一次观察到的状态
    monitoring: Mutex<MonitoringState>,
    /// 存储命令队列（串行执行）
    command_tx: mpsc::UnboundedSender<StoreCommand>,
}

#[derive(Debug, Default)]
struct MonitoringState {
    is_monitoring: bool,
    last_observed: Option<AppLifecycleState>,
}

enum StoreCommand {
    Write(AppStateSnapshot),
    Update(AppLifecycleState),
    Delete,
    Read(oneshot::Sender<Option<AppStateSnapshot>>),
}

impl AppStateManager {
    /// 创建管理器并启动存储任务，必须在 Tokio 运行时内调用
    pub fn new(
        store: AppStateStore,
        probe: Arc<dyn EnvironmentProbe>,
        vendor_id_provider: Arc<dyn VendorIdProvider>,
        app_version: impl Into<String>,
    ) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        tokio::spawn(run_store_commands(store, command_rx));

        let inner = AppStateManagerInner {
            app_version: app_version.into(),
            probe,
            vendor_id_provider,
            monitoring: Mutex::new(MonitoringState::default()),
            command_tx,
        };

        Self {
            inner: Arc::new(inner),
        }
    }

    fn monitoring(&self) -> MutexGuard<'_, MonitoringState> {
        self.inner
            .monitoring
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn submit(&self, command: StoreCommand) {
        if self.inner.command_tx.send(command).is_err() {
            tracing::debug!("app state store task is gone; dropping command");
        }
    }

    /// 开始监控：采集当前状态并写入为新基线
    pub fn start(&self) -> Result<(), ProbeError> {
        tracing::debug!("Start app state monitoring");
        let state = self.current_app_state()?;

        // 持锁提交，保证基线写入排在之后的任何字段更新之前
        let mut monitoring = self.monitoring();
        monitoring.is_monitoring = true;
        monitoring.last_observed = None;
        self.submit(StoreCommand::Write(state));
        Ok(())
    }

    /// 停止监控，不删除已持久化的数据
    pub fn stop(&self) {
        tracing::debug!("Stop app state monitoring");
        self.monitoring().is_monitoring = false;
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring().is_monitoring
    }

    /// 删除持久化快照
    pub fn delete_app_state(&self) {
        tracing::debug!("Deleting app state from data store");
        self.submit(StoreCommand::Delete);
    }

    /// 读取持久化快照，排在此前提交的所有写入之后
    pub async fn read_app_state(&self) -> Option<AppStateSnapshot> {
        let (tx, rx) = oneshot::channel();
        self.submit(StoreCommand::Read(tx));
        rx.await.ok().flatten()
    }

    /// 根据实时探测构建当前快照
    pub fn current_app_state(&self) -> Result<AppStateSnapshot, ProbeError> {
        let system_boot_time = self.inner.probe.system_boot_time()?;
        let os_version = self.inner.probe.os_version()?;
        let is_debugging = self.inner.probe.is_debugging()?;
        let vendor_id = self.inner.vendor_id_provider.vendor_id();

        Ok(AppStateSnapshot {
            app_version: self.inner.app_version.clone(),
            os_version,
            system_boot_time,
            is_debugging,
            was_terminated: false,
            is_active: true,
            vendor_id,
        })
    }

    /// 处理生命周期状态（去重后提交一次读-改-写）
    fn observe(&self, state: AppLifecycleState) {
        let mut monitoring = self.monitoring();
        if !monitoring.is_monitoring || monitoring.last_observed == Some(state) {
            return;
        }
        monitoring.last_observed = Some(state);
        self.submit(StoreCommand::Update(state));
    }
}

impl FeatureMessageReceiver for AppStateManager {
    fn receive(&self, message: &FeatureMessage) -> bool {
        match message {
            FeatureMessage::Context(update) => self.observe(update.application_state),
            FeatureMessage::Baggage { .. }
            | FeatureMessage::Webview(_)
            | FeatureMessage::Telemetry(_) => {}
        }
        false
    }
}

async fn run_store_commands(
    store: AppStateStore,
    mut command_rx: mpsc::UnboundedReceiver<StoreCommand>,
) {
    while let Some(command) = command_rx.recv().await {
        match command {
            StoreCommand::Write(state) => {
                tracing::debug!("Storing app state in data store");
                store.write(&state).await;
            }
            StoreCommand::Update(lifecycle) => {
                let Some(mut state) = store.read().await else {
                    tracing::debug!(state = %lifecycle, "no app state to update");
                    continue;
                };
                StateTransition::apply(lifecycle, &mut state);
                tracing::debug!(state = %lifecycle, "Updating app state in data store");
                store.write(&state).await;
            }
            StoreCommand::Delete => store.delete().await,
            StoreCommand::Read(reply) => {
                tracing::debug!("Reading app state from data store");
                let _ = reply.send(store.read().await);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bus::ContextUpdate;
    use crate::probe::StaticVendorIdProvider;
    use crate::store::InMemoryDataStore;

    struct FixedProbe {
        boot_time: Result<f64, ProbeError>,
    }

    impl EnvironmentProbe for FixedProbe {
        fn system_boot_time(&self) -> Result<f64, ProbeError> {
            self.boot_time.clone()
        }

        fn os_version(&self) -> Result<String, ProbeError> {
            Ok("14.0".to_string())
        }

        fn is_debugging(&self) -> Result<bool, ProbeError> {
            Ok(false)
        }
    }

    fn manager_with(boot_time: Result<f64, ProbeError>) -> AppStateManager {
        AppStateManager::new(
            AppStateStore::new(Arc::new(InMemoryDataStore::new())),
            Arc::new(FixedProbe { boot_time }),
            Arc::new(StaticVendorIdProvider::new(Some("vendor".into()))),
            "1.0.0",
        )
    }

    fn context(state: AppLifecycleState) -> FeatureMessage {
        FeatureMessage::Context(ContextUpdate::now(state))
    }

    #[tokio::test]
    async fn current_app_state_is_alive_by_construction() {
        let manager = manager_with(Ok(42.0));
        let state = manager.current_app_state().unwrap();
        assert_eq!(state.app_version, "1.0.0");
        assert_eq!(state.os_version, "14.0");
        assert_eq!(state.system_boot_time, 42.0);
        assert_eq!(state.vendor_id.as_deref(), Some("vendor"));
        assert!(state.is_active);
        assert!(!state.was_terminated);
    }

    #[tokio::test]
    async fn start_persists_baseline() {
        let manager = manager_with(Ok(42.0));
        assert_eq!(manager.read_app_state().await, None);

        manager.start().unwrap();
        assert!(manager.is_monitoring());
        assert_eq!(
            manager.read_app_state().await,
            Some(manager.current_app_state().unwrap())
        );
    }

    #[tokio::test]
    async fn probe_failure_keeps_monitoring_off() {
        let manager = manager_with(Err(ProbeError::BootTime("sysctl".into())));

        assert_eq!(
            manager.start(),
            Err(ProbeError::BootTime("sysctl".into()))
        );
        assert!(!manager.is_monitoring());
        assert_eq!(manager.read_app_state().await, None);
    }

    #[tokio::test]
    async fn lifecycle_events_update_fields() {
        let manager = manager_with(Ok(1.0));
        manager.start().unwrap();

        assert!(!manager.receive(&context(AppLifecycleState::Background)));
        let state = manager.read_app_state().await.unwrap();
        assert!(!state.is_active);

        manager.receive(&context(AppLifecycleState::Active));
        let state = manager.read_app_state().await.unwrap();
        assert!(state.is_active);

        manager.receive(&context(AppLifecycleState::Terminated));
        let state = manager.read_app_state().await.unwrap();
        assert!(state.was_terminated);
        assert!(state.is_active);
    }

    #[tokio::test]
    async fn events_are_ignored_when_not_monitoring() {
        let manager = manager_with(Ok(1.0));
        manager.start().unwrap();
        manager.stop();

        manager.receive(&context(AppLifecycleState::Background));
        let state = manager.read_app_state().await.unwrap();
        assert!(state.is_active);
    }

    #[tokio::test]
    async fn other_message_kinds_are_ignored() {
        let manager = manager_with(Ok(1.0));
        manager.start().unwrap();

        let consumed = manager.receive(&FeatureMessage::Baggage {
            key: "k".into(),
            value: serde_json::json!(1),
        });
        assert!(!consumed);
        assert!(manager.read_app_state().await.unwrap().is_active);
    }

    #[tokio::test]
    async fn restart_resets_debounce() {
        let manager = manager_with(Ok(1.0));
        manager.start().unwrap();
        manager.receive(&context(AppLifecycleState::Background));

        manager.start().unwrap();
        assert!(manager.read_app_state().await.unwrap().is_active);

        manager.receive(&context(AppLifecycleState::Background));
        assert!(!manager.read_app_state().await.unwrap().is_active);
    }

    #[tokio::test]
    async fn update_without_snapshot_is_skipped() {
        let manager = manager_with(Ok(1.0));
        manager.start().unwrap();
        manager.delete_app_state();

        manager.receive(&context(AppLifecycleState::Background));
        assert_eq!(manager.read_app_state().await, None);
    }
}
