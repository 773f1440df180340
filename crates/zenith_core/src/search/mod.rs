//! Note search entry points.
//!
//! # Responsibility
//! - Expose query APIs for filtering the folder/note collection.
//! - Keep result shaping (snippets, ordering) inside core.

pub mod query;

pub use query::{search_notes, NoteHit, NoteQuery, SEARCH_DEFAULT_LIMIT};
