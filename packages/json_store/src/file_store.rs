use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use prefcell_core_store::{Error, Store, Value};
use tempfile::NamedTempFile;

use crate::convert::{json_to_value, value_to_json};

/// Directory under the user's config dir that holds domain files.
const DOMAIN_DIR: &str = "prefcell";

/// A preference domain persisted as a single JSON document.
///
/// The whole document is read on open and kept in memory; reads never touch
/// the disk. Every `set` and `remove` rewrites the file through a uniquely named
/// temporary sibling and a rename, so a crash leaves either the old or the new document.
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, Value>>,
}

impl JsonFileStore {
    /// Open the domain stored at `path`.
    ///
    /// A missing or empty file is an empty domain. The file is not created
    /// until the first write.
    pub fn open(path: impl Into<PathBuf>) -> Result<JsonFileStore, Error> {
        let path = path.into();
        let entries = Self::load(&path)?;
        Ok(JsonFileStore {
            path,
            entries: RwLock::new(entries),
        })
    }

    /// Open the named domain in the user's configuration directory.
    ///
    /// Resolves to `<config dir>/prefcell/<name>.json`, or a path relative to
    /// the working directory when the platform has no config dir.
    pub fn for_domain(name: &str) -> Result<JsonFileStore, Error> {
        Self::open(Self::domain_path(name)?)
    }

    /// File path backing the named domain.
    pub fn domain_path(name: &str) -> Result<PathBuf, Error> {
        if name.is_empty() || name.contains(['/', '\\']) || name == "." || name == ".." {
            return Err(Error::InvalidDomain {
                name: name.to_string(),
            });
        }

        Ok(dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(DOMAIN_DIR)
            .join(format!("{}.json", name)))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Drop every key and delete the backing file.
    pub fn remove_persistent_domain(&self) -> Result<(), Error> {
        let mut entries = self.write_entries();
        entries.clear();

        log::debug!("Removing domain {}...", self.path.display());
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn load(path: &Path) -> Result<BTreeMap<String, Value>, Error> {
        log::debug!("Reading {}...", path.display());

        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(err.into()),
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        let document: serde_json::Map<String, serde_json::Value> =
            serde_json::from_str(&contents)?;

        Ok(document
            .into_iter()
            .map(|(key, json)| (key, json_to_value(json)))
            .collect())
    }

    fn flush(&self, entries: &BTreeMap<String, Value>) -> Result<(), Error> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        let document: serde_json::Map<String, serde_json::Value> = entries
            .iter()
            .map(|(key, value)| (key.clone(), value_to_json(value)))
            .collect();
        let contents = serde_json::to_string_pretty(&document)?;

        log::debug!("Writing {}...", self.path.display());
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;

        Ok(())
    }

    fn read_entries(&self) -> RwLockReadGuard<'_, BTreeMap<String, Value>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_entries(&self) -> RwLockWriteGuard<'_, BTreeMap<String, Value>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_entries().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), Error> {
        let mut entries = self.write_entries();
        entries.insert(key.to_string(), value);
        self.flush(&entries)
    }

    fn remove(&self, key: &str) -> Result<(), Error> {
        let mut entries = self.write_entries();
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.flush(&entries)
    }

    fn keys(&self) -> Vec<String> {
        self.read_entries().keys().cloned().collect()
    }
}

impl std::fmt::Debug for JsonFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonFileStore")
            .field("path", &self.path)
            .field("keys", &self.keys())
            .finish()
    }
}
