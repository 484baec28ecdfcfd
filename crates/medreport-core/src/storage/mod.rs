//! Key-value persistence for patient records.
//!
//! Records live in a plain string key-value store, the same shape as browser
//! local storage: one `patients` entry holding every record as a JSON array,
//! plus one `patient_<id>` entry per record. Backends implement
//! [`KeyValueStore`]; [`RecordStore`] layers the record schema on top.

mod memory;
mod records;
mod sqlite;

pub use memory::*;
pub use records::*;
pub use sqlite::*;

use thiserror::Error;

/// Storage errors.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage quota exceeded: need {needed} bytes, limit {limit}")]
    QuotaExceeded { needed: usize, limit: usize },

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Duplicate record id: {0}")]
    DuplicateId(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// A string key-value store.
///
/// Single writer assumed; there is no locking or conflict detection.
pub trait KeyValueStore: Send {
    /// Read a value, `None` if the key is absent.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete a value. Absent keys are not an error. [`RecordStore`] never
    /// deletes records.
    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Write several values. Backends that can should make this all-or-nothing.
    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        (**self).remove(key)
    }

    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        (**self).set_many(entries)
    }
}
