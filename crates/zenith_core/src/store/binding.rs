//! Typed (current-value, setter) binding over one store key.
//!
//! # Responsibility
//! - Initialize from the store with fallback to a caller default.
//! - Serialize every setter invocation back under the same key.
//!
//! # Invariants
//! - A stored value that fails to parse falls back silently to the
//!   default; callers never see a parse error.
//! - The cached value only advances after a successful store write.

use super::{StateStore, StoreError, StoreResult};
use log::warn;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Value slice bound to one fixed store key.
#[derive(Debug)]
pub struct StoreBinding<T> {
    key: &'static str,
    value: T,
}

impl<T> StoreBinding<T>
where
    T: Clone + Serialize + DeserializeOwned,
{
    /// Initializes the binding from the store.
    ///
    /// Uses `default` when the key is absent or the stored text cannot
    /// be parsed back into `T`. Recovery from malformed text is logged
    /// but deliberately not surfaced as an error. Nothing is written
    /// back until the first setter call.
    pub fn load<S: StateStore>(store: &S, key: &'static str, default: T) -> StoreResult<Self> {
        let value = match store.read_raw(key)? {
            Some(raw) => match serde_json::from_str(&raw) {
                Ok(parsed) => parsed,
                Err(err) => {
                    warn!(
                        "event=store_parse_fallback module=store status=recovered key={key} error={err}"
                    );
                    default
                }
            },
            None => default,
        };

        Ok(Self { key, value })
    }

    /// The fixed key this binding owns.
    pub fn key(&self) -> &'static str {
        self.key
    }

    /// Current in-memory value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Replaces the value and writes it through to the store.
    pub fn set<S: StateStore>(&mut self, store: &mut S, value: T) -> StoreResult<()> {
        let raw = serde_json::to_string(&value).map_err(|source| StoreError::Serialize {
            key: self.key,
            source,
        })?;
        store.write_raw(self.key, &raw)?;
        self.value = value;
        Ok(())
    }

    /// Applies an updater to a copy of the current value and writes
    /// the result through to the store.
    pub fn update<S, F>(&mut self, store: &mut S, apply: F) -> StoreResult<()>
    where
        S: StateStore,
        F: FnOnce(&mut T),
    {
        let mut next = self.value.clone();
        apply(&mut next);
        self.set(store, next)
    }
}
