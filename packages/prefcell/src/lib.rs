//! Typed preference cells.
//!
//! A [`PrefCell`] binds one key of a preference store to a Rust type. It
//! reads the key once when created, serves reads from memory, and writes
//! through on every `set`. How a type is laid out in the store is decided by
//! its [`Storable`] implementation:
//!
//! | Type | Stored as |
//! |---|---|
//! | `bool`, `i64`/`i32`/`u32`, `f64`, `String`, `Bytes`, `DateTime<Utc>` | the matching native slot |
//! | raw-value enums ([`raw_enum!`]) | the raw integer or string |
//! | `Url`, local (`file:`) | its filesystem path, as a string |
//! | `Url`, remote | a keyed archive, as bytes |
//! | `Option<T>` | `T`'s encoding, or no value at all for `None` |
//! | `Vec<T>`, `BTreeMap<String, T>`, `HashMap<String, T>` | arrays and maps of the element encoding |
//! | [`Value`] | itself |
//!
//! Anything a store holds that a type cannot decode (absent key, wrong slot,
//! unknown enum case, broken archive) reads as the cell's default.
//!
//! # Example
//!
//! ```rust
//! use prefcell::{raw_enum, InMemoryStore, PrefCell, Store};
//! use std::sync::Arc;
//!
//! raw_enum! {
//!     #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//!     pub enum Sort: i64 {
//!         Name = 0,
//!         Date = 1,
//!     }
//! }
//!
//! let store: Arc<dyn Store> = Arc::new(InMemoryStore::new());
//!
//! let mut sort = PrefCell::with_store(Sort::Name, "sort", store.clone()).unwrap();
//! let mut last_opened = PrefCell::<Option<String>>::optional_with_store("last", store).unwrap();
//!
//! sort.set(Sort::Date);
//! last_opened.set(Some("notes.txt".to_string()));
//! last_opened.set(None);
//!
//! assert_eq!(*sort.get(), Sort::Date);
//! assert_eq!(*last_opened.get(), None);
//! ```

pub use bytes::Bytes;
pub use url::Url;

mod cell;
mod locator;
pub mod raw;
mod storable;

pub use cell::PrefCell;
pub use locator::file_locator;
pub use raw::{RawRepresentable, RawValue};
pub use storable::Storable;

// Re-export the store layer for convenience
pub use prefcell_core_store::{
    archive_object, set_standard, standard, unarchive_object, Archivable, Error, InMemoryStore,
    KeyedArchive, Store, Value,
};
