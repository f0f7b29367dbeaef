//! Preference store layer.
//!
//! This is the contract that typed preference cells are written against:
//! - `Value`: the physical slot a store holds under a key
//! - `Store`: get/set/remove by string key, plus object archival
//! - `KeyedArchive`: the archival envelope for types without a native slot
//! - `InMemoryStore` and the process-wide standard store
//!
//! Persistent stores live in their own crates and implement `Store`.
//!
//! # Example
//!
//! ```rust
//! use prefcell_core_store::{standard, Store, Value};
//!
//! let store = standard();
//! store.set("launch_count", Value::from(3i64)).unwrap();
//! assert_eq!(store.get("launch_count"), Some(Value::Integer(3)));
//! ```

pub use bytes::Bytes;

pub mod archive;
mod error;
mod memory;
mod standard;
mod traits;
mod value;

pub use archive::{archive_object, unarchive_object, Archivable, KeyedArchive};
pub use error::Error;
pub use memory::InMemoryStore;
pub use standard::{set_standard, standard};
pub use traits::Store;
pub use value::Value;
