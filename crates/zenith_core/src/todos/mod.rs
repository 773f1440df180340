//! To-do list service and due-date reminder scanning.
//!
//! # Responsibility
//! - Own the `todos` store key.
//! - Detect due reminders and mark them fired exactly once.
//!
//! # Invariants
//! - Editing the due date or reminder policy resets
//!   `reminder_triggered`.
//! - A reminder fires at most once per todo until such an edit.

pub mod reminder;
pub mod service;

pub use reminder::{ReminderEvent, ReminderScanner, REMINDER_SCAN_INTERVAL_MS};
pub use service::{TodoError, TodoResult, TodoService};
