use bincode::{deserialize_from, serialize_into};
use flate2::Compression;
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use log::debug;
use std::collections::HashMap;
use std::fs::{File, create_dir_all};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::StorageError;
use crate::numeral::CalculationRecord;

/// String key/value persistence chosen by the caller at construction time.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError>;
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// Store that lives only as long as the process
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Store persisted to a gzip-compressed bincode file
///
/// The whole map is loaded on open and rewritten on every change.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: HashMap<String, String>,
}

impl FileStore {
    /// Open the store at `path`, starting empty if the file doesn't exist yet
    ///
    /// # Errors
    /// * Returns an error if the file exists but can't be read or decoded
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StorageError> {
        let path = path.as_ref().to_path_buf();
        let entries: HashMap<String, String> = if path.exists() {
            let decoder = GzDecoder::new(File::open(&path)?);
            let mut reader = BufReader::new(decoder);
            deserialize_from(&mut reader)?
        } else {
            HashMap::new()
        };
        debug!("Opened store {} ({} keys)", path.display(), entries.len());
        Ok(FileStore { path, entries })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                create_dir_all(parent)?;
            }
        }
        let encoder = GzEncoder::new(File::create(&self.path)?, Compression::default());
        let mut writer = BufWriter::new(encoder);
        serialize_into(&mut writer, &self.entries)?;
        writer
            .into_inner()
            .map_err(|e| e.into_error())?
            .finish()?
            .flush()?;
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        if self.entries.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Per-user calculation history on top of a [`KeyValueStore`]
pub struct HistoryRepository<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryRepository<S> {
    pub fn new(store: S) -> Self {
        HistoryRepository { store }
    }

    fn key(owner: &str) -> String {
        format!("history:{}", owner)
    }

    pub fn save(&mut self, owner: &str, records: &[CalculationRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string(records)?;
        self.store.set(&Self::key(owner), json)
    }

    /// Missing history loads as empty.
    pub fn load(&self, owner: &str) -> Result<Vec<CalculationRecord>, StorageError> {
        match self.store.get(&Self::key(owner))? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    pub fn clear(&mut self, owner: &str) -> Result<(), StorageError> {
        self.store.remove(&Self::key(owner))
    }

    pub fn into_inner(self) -> S {
        self.store
    }
}
