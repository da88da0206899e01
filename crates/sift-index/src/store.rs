//! Corpus stores.
//!
//! A [`CorpusStore`] supplies the raw article records wholesale and a cheap
//! [`CorpusSignature`] that changes whenever the records do. The index cache compares
//! signatures to decide whether its index is stale, so `signature` must be much cheaper
//! than `load`.

use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
    time::SystemTime,
};

use parking_lot::RwLock;
use serde_json::Value;

use crate::StoreError;

/// Cheap fingerprint of a corpus snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorpusSignature {
    /// File modification time and length in bytes.
    File {
        /// Last modification time.
        modified: SystemTime,
        /// File length in bytes.
        len: u64,
    },
    /// Revision counter of an in-memory store.
    Revision(u64),
}

/// Source of raw article records.
pub trait CorpusStore {
    /// Returns the current corpus signature.
    fn signature(&self) -> Result<CorpusSignature, StoreError>;

    /// Reads every record in the corpus.
    fn load(&self) -> Result<Vec<Value>, StoreError>;
}

/// Corpus kept in a JSON file.
///
/// The file holds either an array of records or an object whose `articles` field is an
/// array of records.
#[derive(Debug, Clone)]
pub struct FileStore {
    /// Path to the JSON file.
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the file at `path`. The file need not exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the corpus file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Wraps an I/O error with the corpus path.
    fn read_error(&self, source: io::Error) -> StoreError {
        StoreError::Read {
            path: self.path.clone(),
            source,
        }
    }
}

impl CorpusStore for FileStore {
    fn signature(&self) -> Result<CorpusSignature, StoreError> {
        let metadata = fs::metadata(&self.path).map_err(|e| self.read_error(e))?;
        let modified = metadata.modified().map_err(|e| self.read_error(e))?;
        Ok(CorpusSignature::File {
            modified,
            len: metadata.len(),
        })
    }

    fn load(&self) -> Result<Vec<Value>, StoreError> {
        let contents = fs::read_to_string(&self.path).map_err(|e| self.read_error(e))?;
        let document: Value =
            serde_json::from_str(&contents).map_err(|source| StoreError::Parse {
                path: self.path.clone(),
                source,
            })?;

        match document {
            Value::Array(records) => Ok(records),
            Value::Object(mut wrapper) => match wrapper.remove("articles") {
                Some(Value::Array(records)) => Ok(records),
                _ => Err(StoreError::Shape {
                    path: self.path.clone(),
                }),
            },
            _ => Err(StoreError::Shape {
                path: self.path.clone(),
            }),
        }
    }
}

/// Corpus held in memory.
///
/// Every [`replace`](Self::replace) bumps the revision, which is the signature.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Current records.
    records: RwLock<Vec<Value>>,
    /// Bumped on every replacement.
    revision: AtomicU64,
}

impl MemoryStore {
    /// Creates a store holding `records` at revision 0.
    pub fn new(records: Vec<Value>) -> Self {
        Self {
            records: RwLock::new(records),
            revision: AtomicU64::new(0),
        }
    }

    /// Replaces every record and bumps the revision.
    pub fn replace(&self, records: Vec<Value>) {
        let mut current = self.records.write();
        *current = records;
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    /// Returns the current revision.
    pub fn revision(&self) -> u64 {
        self.revision.load(Ordering::SeqCst)
    }
}

impl CorpusStore for MemoryStore {
    fn signature(&self) -> Result<CorpusSignature, StoreError> {
        Ok(CorpusSignature::Revision(self.revision()))
    }

    fn load(&self) -> Result<Vec<Value>, StoreError> {
        Ok(self.records.read().clone())
    }
}

impl<S: CorpusStore + ?Sized> CorpusStore for &S {
    fn signature(&self) -> Result<CorpusSignature, StoreError> {
        (**self).signature()
    }

    fn load(&self) -> Result<Vec<Value>, StoreError> {
        (**self).load()
    }
}
