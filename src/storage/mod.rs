//! Persistence boundary: a durable key-value slot holding serialized flow snapshots.
//!
//! Backends are pure pass-through. They know nothing about flows; the store
//! hands them complete serialized snapshots and reads them back verbatim.

pub mod snapshot;

use crate::error::StorageError;
use ahash::AHashMap;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

/// A durable key-value slot for serialized snapshots.
pub trait Storage {
    /// Returns the contents of `slot`, or `None` if nothing was saved there yet.
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError>;

    /// Overwrites `slot` with `data`.
    fn save(&mut self, slot: &str, data: &str) -> Result<(), StorageError>;
}

impl<S: Storage + ?Sized> Storage for Box<S> {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        (**self).load(slot)
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<(), StorageError> {
        (**self).save(slot, data)
    }
}

/// Process-local storage, used for tests, previews and bindings.
#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    slots: AHashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates storage pre-populated with one slot.
    pub fn with_slot(slot: &str, data: impl Into<String>) -> Self {
        let mut slots = AHashMap::new();
        slots.insert(slot.to_string(), data.into());
        Self { slots }
    }

    pub fn get(&self, slot: &str) -> Option<&str> {
        self.slots.get(slot).map(String::as_str)
    }
}

impl Storage for MemoryStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        Ok(self.slots.get(slot).cloned())
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<(), StorageError> {
        self.slots.insert(slot.to_string(), data.to_string());
        Ok(())
    }
}

/// Stores each slot as `<root>/<slot>.json`.
///
/// Saves go through a temporary file and a rename, so a crash mid-write leaves
/// the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct DirStorage {
    root: PathBuf,
}

impl DirStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file backing `slot`.
    pub fn slot_path(&self, slot: &str) -> Result<PathBuf, StorageError> {
        let valid = !slot.is_empty()
            && slot
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::InvalidSlot(slot.to_string()));
        }
        Ok(self.root.join(format!("{}.json", slot)))
    }
}

impl Storage for DirStorage {
    fn load(&self, slot: &str) -> Result<Option<String>, StorageError> {
        let path = self.slot_path(slot)?;
        match fs::read_to_string(&path) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                slot: slot.to_string(),
                source,
            }),
        }
    }

    fn save(&mut self, slot: &str, data: &str) -> Result<(), StorageError> {
        let path = self.slot_path(slot)?;
        let io_err = |source| StorageError::Io {
            slot: slot.to_string(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(io_err)?;

        let tmp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&tmp_path).map_err(io_err)?;
        file.write_all(data.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp_path, &path).map_err(io_err)?;
        Ok(())
    }
}
