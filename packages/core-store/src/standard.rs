//! The process-wide standard store.
//!
//! Cells constructed without an explicit store bind to this one. It is
//! created lazily, once, as an empty [`InMemoryStore`]. An application that
//! wants persistence installs its own store with [`set_standard`] before
//! constructing cells; tests do the same to isolate themselves.

use std::sync::{Arc, PoisonError, RwLock};

use crate::{InMemoryStore, Store};

lazy_static::lazy_static! {
    static ref STANDARD: RwLock<Arc<dyn Store>> = RwLock::new(Arc::new(InMemoryStore::new()) as Arc<dyn Store>);
}

/// The current standard store.
pub fn standard() -> Arc<dyn Store> {
    STANDARD
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

/// Install a new standard store, returning the previous one.
///
/// Cells that already resolved the standard store keep using the old one.
pub fn set_standard(store: Arc<dyn Store>) -> Arc<dyn Store> {
    let mut guard = STANDARD.write().unwrap_or_else(PoisonError::into_inner);
    log::debug!("Replacing standard preference store");
    std::mem::replace(&mut *guard, store)
}
