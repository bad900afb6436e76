//! 生命周期事件到快照字段的转换规则

use super::snapshot::AppStateSnapshot;
use super::types::AppLifecycleState;

/// 状态转换
pub struct StateTransition;

impl StateTransition {
    /// 将生命周期状态应用到快照（仅修改对应字段）
    pub fn apply(state: AppLifecycleState, snapshot: &mut AppStateSnapshot) {
        match state {
            AppLifecycleState::Active => snapshot.is_active = true,
            AppLifecycleState::Inactive | AppLifecycleState::Background => {
                snapshot.is_active = false
            }
            // 保持 is_active 不变
            AppLifecycleState::Terminated => snapshot.was_terminated = true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(is_active: bool) -> AppStateSnapshot {
        AppStateSnapshot {
            app_version: "1.0.0".into(),
            os_version: "14.2".into(),
            system_boot_time: 100.0,
            is_debugging: false,
            was_terminated: false,
            is_active,
            vendor_id: None,
        }
    }

    #[test]
    fn active_sets_foreground() {
        let mut s = snapshot(false);
        StateTransition::apply(AppLifecycleState::Active, &mut s);
        assert!(s.is_active);
        assert!(!s.was_terminated);
    }

    #[test]
    fn inactive_and_background_clear_foreground() {
        for state in [AppLifecycleState::Inactive, AppLifecycleState::Background] {
            let mut s = snapshot(true);
            StateTransition::apply(state, &mut s);
            assert!(!s.is_active);
            assert!(!s.was_terminated);
        }
    }

    #[test]
    fn terminated_leaves_foreground_untouched() {
        let mut s = snapshot(true);
        StateTransition::apply(AppLifecycleState::Terminated, &mut s);
        assert!(s.was_terminated);
        assert!(s.is_active);

        let mut s = snapshot(false);
        StateTransition::apply(AppLifecycleState::Terminated, &mut s);
        assert!(s.was_terminated);
        assert!(!s.is_active);
    }
}
