//! Folder and note entities.
//!
//! # Responsibility
//! - Define the folder-owned note collection persisted under
//!   `notes_folders`.
//!
//! # Invariants
//! - A note is owned by exactly one folder at a time.
//! - `updated_at` is stamped only when an edit is committed, not on
//!   every keystroke.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable folder identifier.
pub type FolderId = Uuid;

/// Stable note identifier.
pub type NoteId = Uuid;

/// Free-text note owned by one folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    /// Unix epoch milliseconds. Equals `created_at` until the first
    /// committed edit.
    #[serde(default)]
    pub updated_at: i64,
}

impl Note {
    /// Creates an empty note with a generated stable id.
    pub fn new(title: impl Into<String>, created_at_ms: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            content: String::new(),
            created_at: created_at_ms,
            updated_at: created_at_ms,
        }
    }
}

/// Named, exclusively-owned collection of notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub notes: Vec<Note>,
}

impl Folder {
    /// Creates an empty folder with a generated stable id.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            notes: Vec::new(),
        }
    }

    /// Returns one owned note by id.
    pub fn note(&self, note_id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == note_id)
    }

    /// Returns one owned note by id for in-place mutation.
    pub fn note_mut(&mut self, note_id: NoteId) -> Option<&mut Note> {
        self.notes.iter_mut().find(|note| note.id == note_id)
    }
}
