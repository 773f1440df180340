//! Periodic reminder scan cadence.
//!
//! # Responsibility
//! - Gate [`TodoService::scan_due_reminders`] behind the fixed scan
//!   interval.
//!
//! # Invariants
//! - Polls inside the interval do nothing; the scan itself decides
//!   which todos fire.

use crate::store::StateStore;
use crate::todos::service::{TodoResult, TodoService};
use crate::model::todo::TodoId;

/// Fixed pause between reminder scans.
pub const REMINDER_SCAN_INTERVAL_MS: i64 = 60_000;

/// One fired reminder, ready to be surfaced as a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReminderEvent {
    pub todo_id: TodoId,
    pub text: String,
    /// Due timestamp in epoch milliseconds.
    pub due_at: i64,
    /// Effective reminder instant that made this todo eligible.
    pub reminder_at: i64,
}

/// Interval gate over the reminder scan.
#[derive(Debug, Default)]
pub struct ReminderScanner {
    last_scan_at: Option<i64>,
}

impl ReminderScanner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs a scan when the interval has elapsed since the last one.
    pub fn poll<S: StateStore>(
        &mut self,
        todos: &mut TodoService,
        store: &mut S,
        now_ms: i64,
    ) -> TodoResult<Vec<ReminderEvent>> {
        if let Some(last) = self.last_scan_at {
            if now_ms - last < REMINDER_SCAN_INTERVAL_MS {
                return Ok(Vec::new());
            }
        }
        self.last_scan_at = Some(now_ms);
        todos.scan_due_reminders(store, now_ms)
    }
}
