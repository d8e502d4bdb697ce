//! Session storage - the local key/value store behind the wallet descriptor
//!
//! Browser local storage semantics: string keys, string values, last write
//! wins. [`MemoryStorage`] backs tests and ephemeral runs; [`FileStorage`]
//! keeps a single JSON object on disk for the CLI.

#[cfg(feature = "native")]
mod file;

#[cfg(feature = "native")]
pub use file::{storage_path, FileStorage};

use crate::error::StorageError;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

pub trait SessionStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl SessionStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries().remove(key);
        Ok(())
    }
}
