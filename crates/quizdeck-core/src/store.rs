//! Completion-record persistence.
//!
//! A [`CompletionStore`] keeps at most one [`CompletionRecord`] per quiz id;
//! recording a new completion replaces the prior one — no history is kept.
//! The store is injected into whatever drives the attempt so tests can use
//! [`MemoryStore`]; the CLI uses [`JsonStore`], a single JSON array file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;

use crate::model::CompletionRecord;

/// Errors from reading or writing the completion store.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read completion store {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write completion store {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("completion store {path} is corrupt: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("completion store poisoned")]
    Poisoned,
}

/// Key-value persistence for graded attempts.
pub trait CompletionStore: Send + Sync {
    /// Store a completion, replacing any prior record for the same quiz id.
    fn record(&self, record: CompletionRecord) -> Result<(), StorageError>;

    /// The stored completion for a quiz, if any.
    fn get(&self, quiz_id: i64) -> Result<Option<CompletionRecord>, StorageError>;

    /// All stored completions, most recent first.
    fn list(&self) -> Result<Vec<CompletionRecord>, StorageError>;
}

/// In-memory store for tests.
#[derive(Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<i64, CompletionRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CompletionStore for MemoryStore {
    fn record(&self, record: CompletionRecord) -> Result<(), StorageError> {
        let mut records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        records.insert(record.quiz_id, record);
        Ok(())
    }

    fn get(&self, quiz_id: i64) -> Result<Option<CompletionRecord>, StorageError> {
        let records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        Ok(records.get(&quiz_id).cloned())
    }

    fn list(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let records = self.records.lock().map_err(|_| StorageError::Poisoned)?;
        let mut all: Vec<CompletionRecord> = records.values().cloned().collect();
        all.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(all)
    }
}

/// File-backed store: one JSON array of completion records.
///
/// A missing file is an empty store. Every write rewrites the whole array;
/// the set is small (one record per quiz) so read-modify-write is fine.
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source: e,
                })
            }
        };
        serde_json::from_str(&content).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })
    }

    fn save(&self, records: &[CompletionRecord]) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(records).map_err(|e| StorageError::Corrupt {
            path: self.path.clone(),
            source: e,
        })?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| StorageError::Write {
                    path: self.path.clone(),
                    source: e,
                })?;
            }
        }
        std::fs::write(&self.path, json).map_err(|e| StorageError::Write {
            path: self.path.clone(),
            source: e,
        })
    }
}

impl CompletionStore for JsonStore {
    fn record(&self, record: CompletionRecord) -> Result<(), StorageError> {
        let mut records = self.load()?;
        records.retain(|r| r.quiz_id != record.quiz_id);
        records.push(record);
        self.save(&records)
    }

    fn get(&self, quiz_id: i64) -> Result<Option<CompletionRecord>, StorageError> {
        Ok(self.load()?.into_iter().find(|r| r.quiz_id == quiz_id))
    }

    fn list(&self) -> Result<Vec<CompletionRecord>, StorageError> {
        let mut records = self.load()?;
        records.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(records)
    }
}
