//! Domain model for the persisted application state.
//!
//! # Responsibility
//! - Define the entities serialized into the key-value state store.
//! - Keep the JSON wire shape stable (camelCase fields, lowercase tags).
//!
//! # Invariants
//! - Every entity id is generated once at creation and never reused.
//! - Deletion is hard delete; there are no tombstones or versions.

pub mod note;
pub mod todo;
pub mod view;
