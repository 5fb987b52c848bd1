//! In-memory configuration store.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use super::{ConfigError, ConfigStore};

/// Configuration store backed by a map, for embedding and tests.
#[derive(Debug, Default)]
pub struct MemoryConfigStore {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryConfigStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with `key = value`.
    #[must_use]
    pub fn with(self, key: &str, value: &str) -> Self {
        self.insert(key, value);
        self
    }

    // A panicking writer cannot leave the map half-updated, so poisoning is
    // recovered from rather than reported.
    fn insert(&self, key: &str, value: &str) {
        self.values
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
    }
}

impl ConfigStore for MemoryConfigStore {
    fn read(&self, key: &str) -> Result<Option<String>, ConfigError> {
        Ok(self
            .values
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        self.insert(key, value);
        Ok(())
    }
}
