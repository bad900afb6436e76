//! Lifecycle message bus.
//!
//! Receivers are offered every message in subscription order until one of them
//! reports it as consumed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::state::AppLifecycleState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextUpdate {
    pub application_state: AppLifecycleState,
    pub timestamp: DateTime<Utc>,
}

impl ContextUpdate {
    pub fn now(application_state: AppLifecycleState) -> Self {
        Self {
            application_state,
            timestamp: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "payload", rename_all = "snake_case")]
pub enum FeatureMessage {
    Context(ContextUpdate),
    Baggage {
        key: String,
        value: serde_json::Value,
    },
    Webview(serde_json::Value),
    Telemetry(serde_json::Value),
}

pub trait FeatureMessageReceiver: Send + Sync {
    /// Returns `true` to stop propagation to later receivers.
    fn receive(&self, message: &FeatureMessage) -> bool;
}

#[derive(Default)]
pub struct MessageBus {
    receivers: RwLock<Vec<Arc<dyn FeatureMessageReceiver>>>,
}

impl MessageBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, receiver: Arc<dyn FeatureMessageReceiver>) {
        self.receivers
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .push(receiver);
    }

    /// Delivers `message`; returns whether some receiver consumed it.
    pub fn send(&self, message: &FeatureMessage) -> bool {
        let receivers = self
            .receivers
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone();
        receivers.iter().any(|r| r.receive(message))
    }

    pub fn publish_state(&self, state: AppLifecycleState) -> bool {
        self.send(&FeatureMessage::Context(ContextUpdate::now(state)))
    }
}
