//! Watchdog termination detection: the launch classifier, the per-launch
//! orchestrator and the reporting seam.

pub mod checker;
pub mod monitor;
pub mod reporter;

pub use checker::{classify, evaluate, Explanation, Verdict, WatchdogTerminationChecker};
pub use monitor::WatchdogTerminationMonitor;
pub use reporter::{EventsOutReporter, LogReporter, WatchdogTerminationReporting};
