//! JSON-file implementation of the key-value store.
//!
//! The whole store is one JSON object of string values. Every write rewrites
//! the file through a temporary sibling and a rename.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use crate::{Result, error::Error, ports::KeyValueStore};

/// File-backed key-value store.
///
/// # Examples
///
/// ```no_run
/// use noughts::adapters::FileKeyValueStore;
/// use noughts::ports::KeyValueStore;
///
/// let store = FileKeyValueStore::new("data/local-storage.json");
/// store.set("ttt-score-v1", r#"{"X":1,"O":0,"D":0}"#)?;
/// # Ok::<(), noughts::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(source) => {
                return Err(Error::Io {
                    operation: format!("read store {:?}", self.path),
                    source,
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&contents).map_err(|e| Error::SerializationContext {
            operation: format!("parse store {:?}", self.path),
            message: e.to_string(),
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| Error::Io {
                operation: format!("create directory {parent:?}"),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| Error::Io {
            operation: format!("write {tmp:?}"),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| Error::Io {
            operation: format!("replace store {:?}", self.path),
            source,
        })
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        entries.insert(key.to_string(), value.to_string());
        self.write_all(&entries)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self.read_all()?;
        if entries.remove(key).is_some() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}
