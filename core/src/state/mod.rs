//! # 应用状态模块
//!
//! 负责持久化 watchdog 判定所需的应用状态快照，并在生命周期事件到达时增量更新。
//!
//! ## 设计原则
//!
//! 1. **单一写入者**：所有存储读写都经由 `AppStateManager` 的后台任务串行执行
//! 2. **字段级更新**：生命周期事件只修改对应字段（读-改-写为一个原子单元）
//! 3. **损坏即缺失**：无法解码的持久化数据视为“无先前状态”

pub mod manager;
pub mod snapshot;
pub mod transitions;
pub mod types;

pub use manager::AppStateManager;
pub use snapshot::{AppStateSnapshot, AppStateStore, APP_STATE_KEY};
pub use transitions::StateTransition;
pub use types::{AppLifecycleState, DeviceInfo, LaunchReport};
