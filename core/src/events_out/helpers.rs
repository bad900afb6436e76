use serde::Serialize;

use crate::events_out::EventsOutTx;

/// Serializes `ev` as one line and enqueues it without waiting for the writer.
///
/// `drop_when_full` on the sink decides whether a line that meets a full queue is lost.
pub fn write_event<T: Serialize>(out: Option<&EventsOutTx>, ev: &T) {
    let Some(out) = out else {
        return;
    };
    match serde_json::to_string(ev) {
        Ok(line) => out.enqueue_line(line),
        Err(e) => tracing::warn!(error = %e, "failed to encode event line"),
    }
}
