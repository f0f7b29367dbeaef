//! The typed preference cell.

use std::fmt;
use std::sync::Arc;

use prefcell_core_store::{standard, Error, Store};

use crate::Storable;

type Observer = Box<dyn FnMut() + Send>;

/// A typed value bound to one key of a preference store.
///
/// The cell reads the store once, when it is constructed, and keeps the
/// decoded value in memory. [`get`](PrefCell::get) returns that mirror
/// without touching the store; [`set`](PrefCell::set) writes through and
/// replaces it. The mirror always holds exactly the last value set, even when
/// the store's encoding of that value is lossy.
///
/// # Example
///
/// ```rust
/// use prefcell::{InMemoryStore, PrefCell, Store, Value};
/// use std::sync::Arc;
///
/// let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
///
/// let mut launches = PrefCell::with_store(0i64, "launches", store.clone()).unwrap();
/// assert_eq!(*launches.get(), 0);
///
/// launches.set(3);
/// assert_eq!(store.get("launches"), Some(Value::Integer(3)));
///
/// // A second cell on the same key sees the persisted value, not its default.
/// let again = PrefCell::with_store(99i64, "launches", store).unwrap();
/// assert_eq!(*again.get(), 3);
/// ```
pub struct PrefCell<T> {
    key: String,
    store: Arc<dyn Store>,
    default_value: T,
    value: T,
    observers: Vec<Observer>,
}

impl<T: Storable + Clone> PrefCell<T> {
    /// Bind `key` in the standard store.
    ///
    /// # Errors
    ///
    /// Rejects an empty key and a default value the store cannot hold.
    pub fn new(default_value: T, key: impl Into<String>) -> Result<Self, Error> {
        Self::with_store(default_value, key, standard())
    }

    /// Bind `key` in the given store.
    ///
    /// Reads the store once; never writes to it.
    ///
    /// # Errors
    ///
    /// Rejects an empty key and a default value the store cannot hold.
    pub fn with_store(
        default_value: T,
        key: impl Into<String>,
        store: Arc<dyn Store>,
    ) -> Result<Self, Error> {
        let key = key.into();
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        default_value.validate()?;

        let value = Self::load(&key, store.as_ref()).unwrap_or_else(|| default_value.clone());

        Ok(Self {
            key,
            store,
            default_value,
            value,
            observers: Vec::new(),
        })
    }

    fn load(key: &str, store: &dyn Store) -> Option<T> {
        let stored = store.get(key);
        let decoded = T::decode(stored.as_ref(), store);
        if decoded.is_none() {
            if let Some(stored) = &stored {
                log::trace!(
                    "Preference {:?} holds an unusable {} value, using default",
                    key,
                    stored.kind()
                );
            }
        }
        decoded
    }
}

impl<T: Storable + Clone> PrefCell<Option<T>> {
    /// Bind `key` in the standard store, absent by default.
    pub fn optional(key: impl Into<String>) -> Result<Self, Error> {
        Self::with_store(None, key, standard())
    }

    /// Bind `key` in the given store, absent by default.
    pub fn optional_with_store(key: impl Into<String>, store: Arc<dyn Store>) -> Result<Self, Error> {
        Self::with_store(None, key, store)
    }
}

impl<T: Storable> PrefCell<T> {
    /// The current value.
    pub fn get(&self) -> &T {
        &self.value
    }

    /// Store a new value and notify observers.
    ///
    /// An absent optional removes the key. If the store rejects the write the
    /// failure is logged and the cell still holds `value`.
    pub fn set(&mut self, value: T) {
        if let Err(err) = self.persist(&value) {
            log::warn!("Failed to store preference {:?}: {}", self.key, err);
        }
        self.value = value;

        for observer in &mut self.observers {
            observer();
        }
    }

    /// Register an observer called once after every [`set`](PrefCell::set).
    pub fn on_change(&mut self, observer: impl FnMut() + Send + 'static) -> &mut Self {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> &T {
        &self.default_value
    }

    pub fn store(&self) -> &Arc<dyn Store> {
        &self.store
    }

    fn persist(&self, value: &T) -> Result<(), Error> {
        match value.encode(self.store.as_ref())? {
            Some(encoded) => self.store.set(&self.key, encoded),
            None => self.store.remove(&self.key),
        }
    }
}

/// Cells compare by value only; key and store are ignored.
impl<T: PartialEq> PartialEq for PrefCell<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<T: fmt::Debug> fmt::Debug for PrefCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrefCell")
            .field("key", &self.key)
            .field("value", &self.value)
            .field("default_value", &self.default_value)
            .field("observers", &self.observers.len())
            .finish()
    }
}
