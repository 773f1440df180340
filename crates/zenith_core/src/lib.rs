//! Core domain logic for Zenith.
//! This crate is the single source of truth for business invariants.

pub mod clock;
pub mod dashboard;
pub mod db;
pub mod logging;
pub mod model;
pub mod notes;
pub mod notify;
pub mod search;
pub mod session;
pub mod store;
pub mod timer;
pub mod todos;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{Folder, FolderId, Note, NoteId};
pub use model::todo::{Priority, ReminderPolicy, Subtask, SubtaskId, Todo, TodoId};
pub use model::view::View;
pub use search::{search_notes, NoteHit, NoteQuery};
pub use session::{AppSession, SessionError, SessionResult, SessionTick};
pub use store::{MemoryStateStore, SqliteStateStore, StateStore, StoreBinding, StoreError};
pub use timer::{FocusMode, FocusTimer};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
