//! Persisted widget state
//!
//! Five independent keys, each holding one whole JSON value. Backends are
//! either JSON files in the data directory or process memory.

pub mod backend;
pub mod persisted;

pub use backend::{JsonFileStore, MemoryStore, StorageBackend, StoreKey};
pub use persisted::PersistedStore;
