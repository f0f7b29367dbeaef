//! In-memory store.

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::{Error, Store, Value};

/// A store that keeps every key in memory.
///
/// Used as the process-wide standard store and in tests. Nothing survives the
/// process.
///
/// # Example
///
/// ```rust
/// use prefcell_core_store::{InMemoryStore, Store, Value};
///
/// let store = InMemoryStore::new();
/// store.set("name", Value::from("Alice")).unwrap();
/// assert_eq!(store.get("name"), Some(Value::from("Alice")));
/// ```
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Value>>,
}

impl InMemoryStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial entries.
    pub fn with_entries(entries: BTreeMap<String, Value>) -> Self {
        Self {
            entries: RwLock::new(entries),
        }
    }

    /// Remove every key.
    pub fn clear(&self) {
        self.write_entries().clear();
    }

    /// Copy of all entries.
    pub fn snapshot(&self) -> BTreeMap<String, Value> {
        self.read_entries().clone()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read_entries(&self) -> RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for InMemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.write_entries().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.write_entries().remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.read_entries().keys().cloned().collect()
    }
}
