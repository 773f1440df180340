//! Persistent key-value state store and typed bindings.
//!
//! # Responsibility
//! - Define the store contract feature modules read/write through.
//! - Provide the durable SQLite implementation and an in-memory one.
//!
//! # Invariants
//! - Each feature module owns only the keys it needs; the store is
//!   passed in explicitly, never reached through globals.
//! - The store is best-effort: unparseable values degrade to defaults,
//!   concurrent writers are last-write-wins with no locking.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod binding;
mod memory;
mod sqlite;

pub use binding::StoreBinding;
pub use memory::MemoryStateStore;
pub use sqlite::SqliteStateStore;

/// Fixed string literals identifying each persisted value slice.
pub mod keys {
    pub const ACTIVE_VIEW: &str = "active_view";
    pub const NOTES_FOLDERS: &str = "notes_folders";
    pub const SELECTED_FOLDER_ID: &str = "selected_folder_id";
    pub const SELECTED_NOTE_ID: &str = "selected_note_id";
    pub const TODOS: &str = "todos";
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Errors from state store access and value encoding.
///
/// Note that a stored value failing to *parse* is deliberately not an
/// error: bindings recover to their default instead (availability over
/// strict validation).
#[derive(Debug)]
pub enum StoreError {
    /// Underlying SQLite/bootstrap failure.
    Db(DbError),
    /// A value could not be encoded for writing.
    Serialize {
        key: &'static str,
        source: serde_json::Error,
    },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Required column is missing from expected table.
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize { key, source } => {
                write!(f, "cannot encode value for key `{key}`: {source}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "state store requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "state store requires table `{table}`")
            }
            Self::MissingRequiredColumn { table, column } => write!(
                f,
                "state store requires column `{column}` in table `{table}`"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize { source, .. } => Some(source),
            Self::UninitializedConnection { .. } => None,
            Self::MissingRequiredTable(_) => None,
            Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Raw string-keyed store contract.
///
/// Values are opaque text at this layer; [`StoreBinding`] owns the
/// JSON encoding on top.
pub trait StateStore {
    /// Reads the raw text stored under `key`, if any.
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes raw text under `key`, replacing any previous value.
    fn write_raw(&mut self, key: &str, value: &str) -> StoreResult<()>;
}
