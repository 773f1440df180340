//! Delivery sink contract for platform notification channels.
//!
//! A sink wraps one side channel (desktop notification, audio cue).
//! Permission is the platform's to grant; a denied sink is skipped and
//! the reminder degrades to the in-app toast only.

use crate::notify::center::Toast;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Platform permission state for one sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkPermission {
    Granted,
    Denied,
}

/// Delivery failure reported by a sink.
#[derive(Debug)]
pub struct SinkError {
    pub sink_id: String,
    pub message: String,
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "sink `{}` delivery failed: {}", self.sink_id, self.message)
    }
}

impl Error for SinkError {}

/// One platform notification channel.
pub trait NotificationSink {
    /// Stable sink identifier (lowercase ascii, digits, `_`, `-`).
    fn sink_id(&self) -> &str;

    /// Current platform permission for this sink.
    fn permission(&self) -> SinkPermission;

    /// Delivers one toast through the side channel.
    fn deliver(&self, toast: &Toast) -> Result<(), SinkError>;
}
