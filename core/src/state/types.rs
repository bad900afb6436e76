//! 状态类型定义

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 应用生命周期状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppLifecycleState {
    /// 前台活跃
    Active,
    /// 前台但不接收事件
    Inactive,
    /// 后台
    Background,
    /// 收到优雅退出通知
    Terminated,
}

impl AppLifecycleState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Inactive => "inactive",
            Self::Background => "background",
            Self::Terminated => "terminated",
        }
    }
}

impl fmt::Display for AppLifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppLifecycleState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            "background" => Ok(Self::Background),
            "terminated" => Ok(Self::Terminated),
            other => Err(format!("unknown application state: {other}")),
        }
    }
}

/// 崩溃上报模块在每次冷启动时提供的启动报告
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LaunchReport {
    /// 上一次运行是否以崩溃结束
    pub did_crash: bool,
}

impl LaunchReport {
    pub fn new(did_crash: bool) -> Self {
        Self { did_crash }
    }
}

/// 设备信息
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DeviceInfo {
    pub name: String,
    pub model: String,
    pub os_name: String,
    pub os_version: String,
    pub architecture: String,
    pub is_simulator: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lifecycle_states() {
        let parse = |s: &str| s.parse::<AppLifecycleState>();
        assert_eq!(parse("active"), Ok(AppLifecycleState::Active));
        assert_eq!(parse(" Background\n"), Ok(AppLifecycleState::Background));
        assert_eq!(parse("TERMINATED"), Ok(AppLifecycleState::Terminated));
        assert!("suspended".parse::<AppLifecycleState>().is_err());
    }

    #[test]
    fn display_matches_serde_name() {
        for state in [
            AppLifecycleState::Active,
            AppLifecycleState::Inactive,
            AppLifecycleState::Background,
            AppLifecycleState::Terminated,
        ] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }
}
