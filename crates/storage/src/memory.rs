//! In-memory substrate

use parking_lot::RwLock;
use std::collections::HashMap;

use ledgerstore_core::Result;

use crate::substrate::Substrate;

/// Non-durable substrate backed by a HashMap
///
/// The default substrate for tests and ephemeral stores. Individual
/// operations are atomic under the lock; there is no cross-operation
/// isolation, matching the engine's concurrency contract.
#[derive(Debug, Default)]
pub struct MemorySubstrate {
    entries: RwLock<HashMap<String, String>>,
}

impl MemorySubstrate {
    /// Create an empty in-memory substrate
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// True when no keys are stored
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl Substrate for MemorySubstrate {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries
            .write()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.entries.write().remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }
}
