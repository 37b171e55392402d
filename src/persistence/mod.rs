//! Key-value persistence
//!
//! The game persists two things: the best score and the player's settings.
//! Both go through [`KeyValueStore`] so the browser build can use
//! LocalStorage while native builds and tests keep everything in memory.

use std::collections::HashMap;

use thiserror::Error;

#[cfg(target_arch = "wasm32")]
mod local;

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

/// Errors from writing to a store
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage is not available")]
    Unavailable,
    #[error("storage rejected write for key `{key}`")]
    WriteFailed { key: String },
    #[error("failed to encode value: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Minimal string key-value store
pub trait KeyValueStore {
    /// Read a value; missing keys and read failures both yield `None`
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store for native builds and tests
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-filled with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert!(store.get("bestScore").is_none());
        store.set("bestScore", "40").unwrap();
        assert_eq!(store.get("bestScore").as_deref(), Some("40"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_error_messages() {
        let err = StorageError::WriteFailed {
            key: "bestScore".into(),
        };
        assert_eq!(err.to_string(), "storage rejected write for key `bestScore`");
    }
}
