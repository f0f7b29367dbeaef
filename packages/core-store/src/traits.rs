//! Core trait: Store.

use bytes::Bytes;

use crate::archive::KeyedArchive;
use crate::{Error, Value};

/// A key-value preference store.
///
/// Keys are opaque strings; each key holds one [`Value`] or nothing. Stores
/// are shared between many cells (`Arc<dyn Store>`), so every method takes
/// `&self` and implementations synchronize internally. A cell performs no
/// locking of its own: two cells writing the same key from different threads
/// race at the store boundary, and the store decides who wins.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `Arc<dyn Store>`.
pub trait Store: Send + Sync {
    /// Read the value at a key.
    ///
    /// Returns `None` if nothing is stored there.
    fn get(&self, key: &str) -> Option<Value>;

    /// Write a value at a key, replacing whatever was there.
    fn set(&self, key: &str, value: Value) -> Result<(), Error>;

    /// Remove the value at a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), Error>;

    /// All keys currently holding a value, in sorted order.
    fn keys(&self) -> Vec<String>;

    /// Check whether a key holds a value.
    fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Archive an object graph into bytes.
    ///
    /// `class` names the archived type so that unarchival can refuse objects
    /// of the wrong kind. The default implementation writes a keyed archive.
    fn archive(&self, class: &str, root: serde_json::Value) -> Result<Bytes, Error> {
        KeyedArchive::new(class, root).to_bytes()
    }

    /// Unarchive an object graph previously produced by [`Store::archive`].
    ///
    /// # Errors
    ///
    /// Fails if the bytes are not an archive or hold a class other than
    /// `expected_class`.
    fn unarchive(&self, data: &[u8], expected_class: &str) -> Result<serde_json::Value, Error> {
        KeyedArchive::from_bytes(data)?.into_root(expected_class)
    }
}

// Blanket implementations for shared pointers

impl<T: Store + ?Sized> Store for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Option<Value> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.as_ref().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.as_ref().remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.as_ref().keys()
    }

    fn archive(&self, class: &str, root: serde_json::Value) -> Result<Bytes, Error> {
        self.as_ref().archive(class, root)
    }

    fn unarchive(&self, data: &[u8], expected_class: &str) -> Result<serde_json::Value, Error> {
        self.as_ref().unarchive(data, expected_class)
    }
}

impl<T: Store + ?Sized> Store for Box<T> {
    fn get(&self, key: &str) -> Option<Value> {
        self.as_ref().get(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        self.as_ref().set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        self.as_ref().remove(key)
    }

    fn keys(&self) -> Vec<String> {
        self.as_ref().keys()
    }

    fn archive(&self, class: &str, root: serde_json::Value) -> Result<Bytes, Error> {
        self.as_ref().archive(class, root)
    }

    fn unarchive(&self, data: &[u8], expected_class: &str) -> Result<serde_json::Value, Error> {
        self.as_ref().unarchive(data, expected_class)
    }
}
