//! Session file backing `flows::SessionStore` in the terminal.
//!
//! DESIGN
//! ======
//! The file is a flat JSON object with the same keys the browser keeps in
//! `localStorage`. It is read once on open and rewritten after every change;
//! once the last key is removed the file is deleted. A file that cannot be
//! parsed reads as signed out.

#[cfg(test)]
#[path = "storage_test.rs"]
mod storage_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use flows::SessionStorage;

use crate::CliError;

/// `$HOME/.touchglyph/session.json`, or a relative path without `HOME`.
pub fn default_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_default()
        .join(".touchglyph")
        .join("session.json")
}

#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: RefCell<BTreeMap<String, String>>,
}

impl FileStorage {
    pub(crate) fn open(path: impl Into<PathBuf>) -> Result<Self, CliError> {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|error| {
                tracing::warn!(path = %path.display(), %error, "ignoring unreadable session file");
                BTreeMap::new()
            }),
            Err(error) if error.kind() == ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(CliError::Session { path, source }),
        };
        Ok(Self {
            path,
            entries: RefCell::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) {
        let entries = self.entries.borrow();
        let result = if entries.is_empty() {
            match std::fs::remove_file(&self.path) {
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                other => other,
            }
        } else {
            write_entries(&self.path, &entries)
        };
        if let Err(error) = result {
            tracing::warn!(path = %self.path.display(), %error, "failed to write session file");
        }
    }
}

fn write_entries(path: &Path, entries: &BTreeMap<String, String>) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let raw = serde_json::to_string_pretty(entries).map_err(std::io::Error::other)?;
    std::fs::write(path, raw)
}

impl SessionStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        self.persist();
    }

    fn remove(&self, key: &str) {
        let removed = self.entries.borrow_mut().remove(key);
        if removed.is_some() {
            self.persist();
        }
    }
}
