//! File-backed preference domains.
//!
//! A domain is one JSON document holding every key of one store. Stores are
//! loaded once on open and written through on every change.

pub mod convert;
pub mod file_store;

pub use prefcell_core_store::{Error, Store, Value};

pub use convert::{json_to_value, value_to_json};
pub use file_store::JsonFileStore;
