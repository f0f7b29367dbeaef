//! Keyed object archival.
//!
//! Some logical types have no primitive slot of their own. Those are archived:
//! serialized into a self-describing envelope and stored as bytes. The
//! envelope records the archived class so a reader asking for one type never
//! silently decodes another.
//!
//! ```text
//! {"$archiver": "KeyedArchive", "$version": 1, "$class": "URL", "$root": ...}
//! ```

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::{Error, Store};

const ARCHIVER: &str = "KeyedArchive";
const VERSION: u32 = 1;

/// A type that can be stored through a store's object archival.
pub trait Archivable: Serialize + DeserializeOwned {
    /// Class name recorded in the archive.
    const CLASS_NAME: &'static str;
}

impl Archivable for url::Url {
    const CLASS_NAME: &'static str = "URL";
}

/// The archive envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyedArchive {
    #[serde(rename = "$archiver")]
    archiver: String,
    #[serde(rename = "$version")]
    version: u32,
    #[serde(rename = "$class")]
    class: String,
    #[serde(rename = "$root")]
    root: serde_json::Value,
}

impl KeyedArchive {
    /// Wrap an object graph of the given class.
    pub fn new(class: impl Into<String>, root: serde_json::Value) -> Self {
        Self {
            archiver: ARCHIVER.to_string(),
            version: VERSION,
            class: class.into(),
            root,
        }
    }

    /// Serialize the envelope.
    pub fn to_bytes(&self) -> Result<Bytes, Error> {
        Ok(Bytes::from(serde_json::to_vec(self)?))
    }

    /// Parse an envelope, checking the archiver tag and version.
    pub fn from_bytes(data: &[u8]) -> Result<Self, Error> {
        let archive: KeyedArchive = serde_json::from_slice(data)
            .map_err(|e| Error::archive(format!("not a keyed archive: {}", e)))?;

        if archive.archiver != ARCHIVER {
            return Err(Error::archive(format!(
                "unknown archiver {:?}",
                archive.archiver
            )));
        }
        if archive.version != VERSION {
            return Err(Error::archive(format!(
                "unsupported archive version {}",
                archive.version
            )));
        }
        Ok(archive)
    }

    /// Take the root object, requiring it to be of `expected_class`.
    pub fn into_root(self, expected_class: &str) -> Result<serde_json::Value, Error> {
        if self.class != expected_class {
            return Err(Error::ArchiveClassMismatch {
                expected: expected_class.to_string(),
                found: self.class,
            });
        }
        Ok(self.root)
    }
}

/// Archive an object through the store's archival mechanism.
pub fn archive_object<T: Archivable>(store: &dyn Store, object: &T) -> Result<Bytes, Error> {
    let root = serde_json::to_value(object)?;
    store.archive(T::CLASS_NAME, root)
}

/// Unarchive an object of type `T` through the store's archival mechanism.
pub fn unarchive_object<T: Archivable>(store: &dyn Store, data: &[u8]) -> Result<T, Error> {
    let root = store.unarchive(data, T::CLASS_NAME)?;
    serde_json::from_value(root)
        .map_err(|e| Error::archive(format!("malformed {}: {}", T::CLASS_NAME, e)))
}
