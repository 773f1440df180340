//! In-app notification center with sink registry.
//!
//! # Responsibility
//! - Keep independent, auto-dismissing toasts.
//! - Register platform sinks by validated id and fan out deliveries.
//!
//! # Invariants
//! - Each toast dismisses after the fixed window or on explicit
//!   dismissal, independently of the others.
//! - Registration rejects blank, malformed or duplicate sink ids.

use crate::notify::sink::{NotificationSink, SinkPermission};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use uuid::Uuid;

/// How long a toast stays up without explicit dismissal.
pub const TOAST_AUTO_DISMISS_MS: i64 = 5_000;

/// Stable toast identifier.
pub type ToastId = Uuid;

/// One transient user-facing notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub body: String,
    /// Raise timestamp in epoch milliseconds.
    pub raised_at: i64,
}

/// Sink registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    InvalidSinkId(String),
    DuplicateSinkId(String),
}

impl Display for NotifyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidSinkId(value) => write!(f, "sink id is invalid: {value}"),
            Self::DuplicateSinkId(value) => write!(f, "sink id already registered: {value}"),
        }
    }
}

impl Error for NotifyError {}

/// Toast list plus registered delivery sinks.
#[derive(Default)]
pub struct NotificationCenter {
    toasts: Vec<Toast>,
    sinks: BTreeMap<String, Arc<dyn NotificationSink>>,
}

impl NotificationCenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers one platform sink.
    pub fn register_sink(&mut self, sink: Arc<dyn NotificationSink>) -> Result<(), NotifyError> {
        let sink_id = sink.sink_id().trim().to_string();
        if !is_valid_sink_id(&sink_id) {
            return Err(NotifyError::InvalidSinkId(sink_id));
        }
        if self.sinks.contains_key(sink_id.as_str()) {
            return Err(NotifyError::DuplicateSinkId(sink_id));
        }

        self.sinks.insert(sink_id, sink);
        Ok(())
    }

    /// Returns sorted registered sink ids.
    pub fn sink_ids(&self) -> Vec<String> {
        self.sinks.keys().cloned().collect()
    }

    /// Raises a toast and fans it out to granted sinks.
    ///
    /// Denied sinks are skipped; failing sinks are logged and ignored
    /// so the in-app toast always stands on its own.
    pub fn push(&mut self, title: &str, body: &str, now_ms: i64) -> ToastId {
        let toast = Toast {
            id: Uuid::new_v4(),
            title: title.to_string(),
            body: body.to_string(),
            raised_at: now_ms,
        };
        let toast_id = toast.id;

        for (sink_id, sink) in &self.sinks {
            match sink.permission() {
                SinkPermission::Denied => {
                    debug!(
                        "event=notify_sink_skipped module=notify status=ok sink={sink_id} reason=permission_denied"
                    );
                }
                SinkPermission::Granted => {
                    if let Err(err) = sink.deliver(&toast) {
                        warn!(
                            "event=notify_sink_failed module=notify status=recovered sink={sink_id} error={err}"
                        );
                    }
                }
            }
        }

        self.toasts.push(toast);
        toast_id
    }

    /// Toasts currently on screen.
    pub fn toasts(&self) -> &[Toast] {
        &self.toasts
    }

    /// Drops toasts older than the auto-dismiss window. Returns how
    /// many were dropped.
    pub fn prune(&mut self, now_ms: i64) -> usize {
        let before = self.toasts.len();
        self.toasts
            .retain(|toast| now_ms < toast.raised_at + TOAST_AUTO_DISMISS_MS);
        before - self.toasts.len()
    }

    /// Explicitly dismisses one toast. Returns whether it existed.
    pub fn dismiss(&mut self, toast_id: ToastId) -> bool {
        let before = self.toasts.len();
        self.toasts.retain(|toast| toast.id != toast_id);
        before != self.toasts.len()
    }
}

fn is_valid_sink_id(value: &str) -> bool {
    if value.is_empty() {
        return false;
    }
    value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-')
}
