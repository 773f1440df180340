//! Durable SQLite implementation of the state store.
//!
//! # Responsibility
//! - Persist key-value slices in the `app_state` table.
//! - Keep SQL details inside the store boundary.
//!
//! # Invariants
//! - Constructor rejects connections without the migrated schema.
//! - Writes are last-write-wins per key, mirroring the stamp in
//!   `updated_at`.

use super::{StateStore, StoreError, StoreResult};
use crate::db::migrations::latest_version;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashSet;

const STATE_TABLE: &str = "app_state";
const REQUIRED_COLUMNS: [&str; 3] = ["key", "value", "updated_at"];

/// SQLite-backed state store over a migrated connection.
#[derive(Debug)]
pub struct SqliteStateStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStateStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl StateStore for SqliteStateStore<'_> {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM app_state WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO app_state (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

fn ensure_connection_ready(conn: &Connection) -> StoreResult<()> {
    let expected_version = latest_version();
    let actual_version =
        conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
    if actual_version != expected_version {
        return Err(StoreError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    let table_exists = conn.query_row(
        "SELECT EXISTS (
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
         );",
        [STATE_TABLE],
        |row| row.get::<_, bool>(0),
    )?;
    if !table_exists {
        return Err(StoreError::MissingRequiredTable(STATE_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([STATE_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<HashSet<_>, _>>()?;
    for column in REQUIRED_COLUMNS {
        if !present.contains(column) {
            return Err(StoreError::MissingRequiredColumn {
                table: STATE_TABLE,
                column,
            });
        }
    }

    Ok(())
}
