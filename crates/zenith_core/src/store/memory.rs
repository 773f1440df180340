//! In-memory state store for tests and ephemeral sessions.

use super::{StateStore, StoreResult};
use std::collections::BTreeMap;

/// Volatile state store backed by a plain map. Never fails.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StateStore for MemoryStateStore {
    fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
