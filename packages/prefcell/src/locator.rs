//! Locators (`url::Url`).
//!
//! Locators are stored two different ways depending on where they point:
//!
//! - A `file:` locator is stored as its absolute filesystem path, as text.
//! - Any other locator is archived through the store and stored as bytes.
//!   So is a `file:` locator with no local path, such as one naming a host.
//!
//! Decoding tries text first (read as a filesystem path), then an archive.
//! A `file:` locator therefore comes back as the locator for the same path,
//! which need not be byte-identical to what was written: a trailing slash,
//! query, or fragment is not preserved. The cell's cached value is always the
//! exact locator that was set.

use std::path::Path;

use prefcell_core_store::{archive_object, unarchive_object, Error, Store, Value};
use url::Url;

use crate::Storable;

/// Build a `file:` locator from a filesystem path.
///
/// Relative paths are resolved against the current working directory.
/// Returns `None` if the path cannot be expressed as a locator.
pub fn file_locator(path: impl AsRef<Path>) -> Option<Url> {
    let path = path.as_ref();
    if path.is_absolute() {
        return Url::from_file_path(path).ok();
    }
    let cwd = std::env::current_dir().ok()?;
    Url::from_file_path(cwd.join(path)).ok()
}

fn is_local(url: &Url) -> bool {
    url.scheme() == "file"
}

impl Storable for Url {
    fn encode(&self, store: &dyn Store) -> Result<Option<Value>, Error> {
        if is_local(self) {
            match self.to_file_path() {
                Ok(path) => return Ok(Some(Value::String(path.to_string_lossy().into_owned()))),
                Err(()) => log::trace!("{} has no local path, archiving it", self),
            }
        }

        let data = archive_object(store, self)?;
        Ok(Some(Value::Bytes(data.to_vec())))
    }

    fn decode(stored: Option<&Value>, store: &dyn Store) -> Option<Self> {
        match stored? {
            Value::String(path) => file_locator(path),
            Value::Bytes(data) => match unarchive_object(store, data) {
                Ok(url) => Some(url),
                Err(err) => {
                    log::trace!("Stored bytes are not a locator archive: {}", err);
                    None
                }
            },
            _ => None,
        }
    }
}
