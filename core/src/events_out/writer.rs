use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;

use crate::config::EventsOutConfig;

enum Outgoing {
    Line(String),
    Flush(oneshot::Sender<()>),
}

#[derive(Clone)]
pub struct EventsOutTx {
    tx: mpsc::Sender<Outgoing>,
    dropped: Arc<AtomicU64>,
    drop_when_full: bool,
    /// Sends parked on a full channel while `drop_when_full` is off.
    pending: Arc<Mutex<Vec<JoinHandle<()>>>>,
}

impl EventsOutTx {
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub async fn send_line(&self, line: String) {
        if self.drop_when_full {
            self.try_send_line(line);
        } else if self.tx.send(Outgoing::Line(line)).await.is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Never waits: a full or closed channel counts the line as dropped.
    pub fn try_send_line(&self, line: String) {
        if self.tx.try_send(Outgoing::Line(line)).is_err() {
            self.dropped.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Enqueues without blocking the caller. With `drop_when_full` off, a line that finds
    /// the channel full is handed to a background send instead of being dropped.
    pub fn enqueue_line(&self, line: String) {
        if self.drop_when_full {
            self.try_send_line(line);
            return;
        }
        match self.tx.try_send(Outgoing::Line(line)) {
            Ok(()) => {}
            Err(TrySendError::Full(msg)) => {
                let tx = self.tx.clone();
                let dropped = self.dropped.clone();
                let handle = tokio::spawn(async move {
                    if tx.send(msg).await.is_err() {
                        dropped.fetch_add(1, Ordering::Relaxed);
                    }
                });
                let mut pending = self.pending.lock().unwrap_or_else(|e| e.into_inner());
                pending.retain(|h| !h.is_finished());
                pending.push(handle);
            }
            Err(TrySendError::Closed(_)) => {
                self.dropped.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    /// Resolves once every line enqueued so far has been written out.
    pub async fn flush(&self) {
        let pending = {
            let mut guard = self.pending.lock().unwrap_or_else(|e| e.into_inner());
            std::mem::take(&mut *guard)
        };
        for handle in pending {
            let _ = handle.await;
        }

        let (done_tx, done_rx) = oneshot::channel();
        if self.tx.send(Outgoing::Flush(done_tx)).await.is_ok() {
            let _ = done_rx.await;
        }
    }
}

pub async fn start_events_out(cfg: &EventsOutConfig) -> Result<Option<EventsOutTx>, String> {
    if !cfg.enabled || cfg.path.trim().is_empty() {
        return Ok(None);
    }

    let (tx, mut rx) = mpsc::channel::<Outgoing>(cfg.channel_capacity.max(1));
    let dropped = Arc::new(AtomicU64::new(0));
    let path = cfg.path.clone();
    let drop_when_full = cfg.drop_when_full;

    let mut writer: Box<dyn tokio::io::AsyncWrite + Unpin + Send> = if path == "stdout:" {
        Box::new(tokio::io::stdout())
    } else {
        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|e| format!("open events_out {path} failed: {e}"))?;
        Box::new(file)
    };

    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            let mut line = match msg {
                Outgoing::Line(line) => line,
                Outgoing::Flush(done) => {
                    let _ = done.send(());
                    continue;
                }
            };
            if !line.ends_with('\n') {
                line.push('\n');
            }
            if let Err(e) = writer.write_all(line.as_bytes()).await {
                tracing::warn!(error = %e, "events_out write failed; closing writer");
                return;
            }
            if let Err(e) = writer.flush().await {
                tracing::warn!(error = %e, "events_out flush failed; closing writer");
                return;
            }
        }
    });

    Ok(Some(EventsOutTx {
        tx,
        dropped,
        drop_when_full,
        pending: Arc::new(Mutex::new(Vec::new())),
    }))
}
