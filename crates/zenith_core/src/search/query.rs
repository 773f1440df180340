//! In-memory note search over the folder collection.
//!
//! The persisted state is one JSON document rather than indexed rows,
//! so search walks the loaded collection directly.
//!
//! # Invariants
//! - Matching is case-insensitive over title and content.
//! - Result ordering is deterministic: `created_at DESC, note id ASC`.
//! - Blank queries return no hits.

use crate::model::note::{Folder, FolderId, NoteId};
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Longest snippet returned with a hit, in characters.
const SNIPPET_MAX_CHARS: usize = 100;

/// Default maximum number of hits.
pub const SEARCH_DEFAULT_LIMIT: u32 = 20;

/// Search options for note filtering.
#[derive(Debug, Clone)]
pub struct NoteQuery {
    /// User query text; matched as a case-insensitive substring.
    pub text: String,
    /// Restrict matching to one folder.
    pub folder_id: Option<FolderId>,
    /// Maximum number of hits to return.
    pub limit: u32,
}

impl NoteQuery {
    /// Creates a query with default limit and no folder filter.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            folder_id: None,
            limit: SEARCH_DEFAULT_LIMIT,
        }
    }
}

/// Single hit returned by [`search_notes`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteHit {
    pub note_id: NoteId,
    pub folder_id: FolderId,
    pub folder_name: String,
    pub title: String,
    /// Whitespace-normalized content summary, when the note has one.
    pub snippet: Option<String>,
    pub created_at: i64,
}

/// Filters notes across folders by case-insensitive substring match.
pub fn search_notes(folders: &[Folder], query: &NoteQuery) -> Vec<NoteHit> {
    let needle = query.text.trim().to_lowercase();
    if needle.is_empty() || query.limit == 0 {
        return Vec::new();
    }

    let mut hits: Vec<NoteHit> = folders
        .iter()
        .filter(|folder| query.folder_id.is_none_or(|id| folder.id == id))
        .flat_map(|folder| {
            folder
                .notes
                .iter()
                .filter(|note| {
                    note.title.to_lowercase().contains(&needle)
                        || note.content.to_lowercase().contains(&needle)
                })
                .map(|note| NoteHit {
                    note_id: note.id,
                    folder_id: folder.id,
                    folder_name: folder.name.clone(),
                    title: note.title.clone(),
                    snippet: derive_snippet(&note.content),
                    created_at: note.created_at,
                })
        })
        .collect();

    hits.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.note_id.cmp(&b.note_id))
    });
    hits.truncate(query.limit as usize);
    hits
}

/// Collapses whitespace and caps length for result display.
fn derive_snippet(content: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    let trimmed = normalized.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed.chars().take(SNIPPET_MAX_CHARS).collect())
}
