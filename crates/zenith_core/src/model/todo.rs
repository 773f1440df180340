//! Todo and subtask entities, including the reminder offset rule.
//!
//! # Responsibility
//! - Define the todo collection persisted under `todos`.
//! - Compute the effective reminder instant from due date + policy.
//!
//! # Invariants
//! - `reminder_triggered`, once true, is reset only by editing the due
//!   date or reminder policy.
//! - A subtask is owned by exactly one todo.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable todo identifier.
pub type TodoId = Uuid;

/// Stable subtask identifier.
pub type SubtaskId = Uuid;

/// One hour in epoch milliseconds.
pub const HOUR_MS: i64 = 3_600_000;

/// One day in epoch milliseconds.
pub const DAY_MS: i64 = 86_400_000;

/// Task priority shown in list and dashboard views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

/// Named offset rule deciding when a due-date notification fires.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReminderPolicy {
    #[default]
    #[serde(rename = "none")]
    None,
    #[serde(rename = "at_due_date")]
    AtDueDate,
    #[serde(rename = "1h_before")]
    OneHourBefore,
    #[serde(rename = "24h_before")]
    OneDayBefore,
}

/// Checklist item owned by one todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: SubtaskId,
    pub text: String,
    pub completed: bool,
}

impl Subtask {
    /// Creates an open subtask with a generated stable id.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
        }
    }
}

/// To-do entry with optional due date and reminder policy.
///
/// Fields added after the first release carry `#[serde(default)]` so
/// documents written by older builds keep parsing instead of tripping
/// the store's fallback-to-default recovery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: TodoId,
    pub text: String,
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    /// Unix epoch milliseconds.
    #[serde(default)]
    pub due_date: Option<i64>,
    #[serde(default)]
    pub reminder: ReminderPolicy,
    #[serde(default)]
    pub reminder_triggered: bool,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
}

impl Todo {
    /// Creates an open todo with a generated stable id and default
    /// priority.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.into(),
            completed: false,
            priority: Priority::default(),
            due_date: None,
            reminder: ReminderPolicy::None,
            reminder_triggered: false,
            subtasks: Vec::new(),
        }
    }

    /// Returns the effective reminder instant in epoch milliseconds.
    ///
    /// `None` when there is no due date or the policy is
    /// [`ReminderPolicy::None`].
    pub fn reminder_at(&self) -> Option<i64> {
        let due = self.due_date?;
        match self.reminder {
            ReminderPolicy::None => None,
            ReminderPolicy::AtDueDate => Some(due),
            ReminderPolicy::OneHourBefore => Some(due - HOUR_MS),
            ReminderPolicy::OneDayBefore => Some(due - DAY_MS),
        }
    }

    /// Returns one owned subtask by id for in-place mutation.
    pub fn subtask_mut(&mut self, subtask_id: SubtaskId) -> Option<&mut Subtask> {
        self.subtasks.iter_mut().find(|sub| sub.id == subtask_id)
    }
}
