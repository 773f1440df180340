//! Top-level view selection persisted under the `active_view` key.

use serde::{Deserialize, Serialize};

/// Active top-level view of the application shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    /// Summary cards over notes and todos.
    Dashboard,
    /// Folder/note editor.
    #[default]
    Notes,
    /// Focus countdown timer.
    Pomodoro,
    /// To-do list.
    Todo,
}
