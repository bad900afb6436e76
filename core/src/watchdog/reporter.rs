use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::events_out::{write_event, EventsOutTx};

/// Fire-and-forget sink invoked once a watchdog termination is confirmed.
pub trait WatchdogTerminationReporting: Send + Sync {
    fn send(&self);
}

/// Records the termination in the log only.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl WatchdogTerminationReporting for LogReporter {
    fn send(&self) {
        tracing::warn!(target: "watchdog.report", "previous run ended in a watchdog termination");
    }
}

#[derive(Debug, Serialize)]
struct WatchdogTerminationEvent<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    timestamp: DateTime<Utc>,
    app_version: &'a str,
}

/// Appends one `watchdog_termination` line to the events-out sink.
#[derive(Clone)]
pub struct EventsOutReporter {
    out: EventsOutTx,
    app_version: String,
}

impl EventsOutReporter {
    pub fn new(out: EventsOutTx, app_version: impl Into<String>) -> Self {
        Self {
            out,
            app_version: app_version.into(),
        }
    }
}

impl WatchdogTerminationReporting for EventsOutReporter {
    fn send(&self) {
        let ev = WatchdogTerminationEvent {
            kind: "watchdog_termination",
            timestamp: Utc::now(),
            app_version: &self.app_version,
        };
        write_event(Some(&self.out), &ev);
    }
}
