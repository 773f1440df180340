//! Folder/note workspace and the editor autosave machine.
//!
//! # Responsibility
//! - Own the `notes_folders` and selection store keys.
//! - Debounce editor keystrokes into committed note writes.
//!
//! # Invariants
//! - Selection always falls back to the first remaining folder after a
//!   folder delete, or to no selection when none remain.
//! - A pending edit is flushed, never silently discarded, before the
//!   selection changes.

pub mod autosave;
pub mod workspace;

pub use autosave::{AutosaveMachine, AutosavePhase, AUTOSAVE_DEBOUNCE_MS, SAVED_DISPLAY_MS};
pub use workspace::{EditorBuffer, NotesError, NotesResult, NotesWorkspace, DEFAULT_FOLDER_NAME};
