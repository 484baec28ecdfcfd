//! In-memory store.

use std::collections::HashMap;

use super::{KeyValueStore, StorageError, StorageResult};

/// `HashMap`-backed store with an optional byte quota.
///
/// The quota and the disabled switch reproduce the two ways browser storage
/// fails in practice, so callers can be tested against them.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
    disabled: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Limit total key + value bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Make every operation fail with [`StorageError::Unavailable`].
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Bytes currently used.
    pub fn used_bytes(&self) -> usize {
        self.entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    fn check_enabled(&self) -> StorageResult<()> {
        if self.disabled {
            return Err(StorageError::Unavailable("storage is disabled".into()));
        }
        Ok(())
    }

    /// Bytes used after applying `entries`.
    fn projected_bytes(&self, entries: &[(String, String)]) -> usize {
        let mut pending: HashMap<&str, &str> = HashMap::new();
        for (key, value) in entries {
            pending.insert(key, value);
        }
        let kept: usize = self
            .entries
            .iter()
            .filter(|(k, _)| !pending.contains_key(k.as_str()))
            .map(|(k, v)| k.len() + v.len())
            .sum();
        kept + pending.iter().map(|(k, v)| k.len() + v.len()).sum::<usize>()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_enabled()?;
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.set_many(&[(key.to_string(), value.to_string())])
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.check_enabled()?;
        self.entries.remove(key);
        Ok(())
    }

    fn set_many(&mut self, entries: &[(String, String)]) -> StorageResult<()> {
        self.check_enabled()?;
        if let Some(limit) = self.quota {
            let needed = self.projected_bytes(entries);
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }
        for (key, value) in entries {
            self.entries.insert(key.clone(), value.clone());
        }
        Ok(())
    }
}
