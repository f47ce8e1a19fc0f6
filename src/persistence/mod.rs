//! Key-value preference storage
//!
//! The game persists exactly one thing (the mute flag, via [`crate::Settings`]),
//! but it goes through this small abstraction so the browser's LocalStorage and
//! an in-memory map are interchangeable. Failures are typed here and swallowed
//! by callers; storage trouble never reaches the simulation.

#[cfg(target_arch = "wasm32")]
mod local_storage;

#[cfg(target_arch = "wasm32")]
pub use local_storage::LocalStorageStore;

use std::collections::HashMap;

use thiserror::Error;

/// Why a store operation failed
#[derive(Debug, Error)]
pub enum StoreError {
    /// No backing store (private browsing, storage disabled, no window)
    #[error("preference store unavailable")]
    Unavailable,
    /// The backend rejected the operation (quota exceeded, security error)
    #[error("preference store rejected {op} of {key:?}: {reason}")]
    Backend {
        op: &'static str,
        key: String,
        reason: String,
    },
}

/// String key-value store
pub trait KvStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that is never available
#[derive(Debug, Clone, Copy, Default)]
pub struct NullStore;

impl KvStore for NullStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Unavailable)
    }
}
