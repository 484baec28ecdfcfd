//! Patient record persistence.

use super::{KeyValueStore, StorageError, StorageResult};
use crate::models::PatientRecord;

/// Key holding every record as one JSON array.
pub const ALL_RECORDS_KEY: &str = "patients";

/// Key holding a single record.
pub fn record_key(id: &str) -> String {
    format!("patient_{}", id)
}

/// Patient records on top of a [`KeyValueStore`].
///
/// Records are append-only: there is no update or delete.
pub struct RecordStore<S> {
    backend: S,
}

impl<S: KeyValueStore> RecordStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    /// Append `record` to the all-records list and store it under its own key.
    ///
    /// Both writes go through one `set_many`. Failures are logged and returned.
    pub fn save(&mut self, record: &PatientRecord) -> StorageResult<()> {
        let result = self.try_save(record);
        match &result {
            Ok(()) => tracing::info!(patient_id = %record.id, "Saved patient record"),
            Err(e) => tracing::error!(patient_id = %record.id, "Error saving patient data: {e}"),
        }
        result
    }

    fn try_save(&mut self, record: &PatientRecord) -> StorageResult<()> {
        if self.contains(&record.id)? {
            return Err(StorageError::DuplicateId(record.id.clone()));
        }

        // A corrupt list fails the save instead of being overwritten.
        let mut all = self.load_all()?;
        all.push(record.clone());

        self.backend.set_many(&[
            (ALL_RECORDS_KEY.to_string(), serde_json::to_string(&all)?),
            (record_key(&record.id), serde_json::to_string(record)?),
        ])
    }

    /// Whether a record is stored under `id`.
    pub fn contains(&self, id: &str) -> StorageResult<bool> {
        Ok(self.backend.get(&record_key(id))?.is_some())
    }

    /// Look up a record.
    ///
    /// Absent and unparseable entries are both `Ok(None)`; only backend
    /// failures are errors.
    pub fn get_by_id(&self, id: &str) -> StorageResult<Option<PatientRecord>> {
        let Some(raw) = self.backend.get(&record_key(id))? else {
            tracing::debug!(patient_id = %id, "Patient record not found");
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(record) => Ok(Some(record)),
            Err(e) => {
                tracing::warn!(patient_id = %id, "Error retrieving patient data: {e}");
                Ok(None)
            }
        }
    }

    /// Every saved record in save order. Empty when absent, unreadable or
    /// unparseable.
    pub fn get_all(&self) -> Vec<PatientRecord> {
        self.load_all().unwrap_or_else(|e| {
            tracing::warn!("Error retrieving all patients: {e}");
            Vec::new()
        })
    }

    fn load_all(&self) -> StorageResult<Vec<PatientRecord>> {
        match self.backend.get(ALL_RECORDS_KEY)? {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Attachment, PatientInfo, TestDetail};
    use crate::storage::MemoryStore;

    fn make_record(id: &str) -> PatientRecord {
        PatientRecord::assemble(
            id.to_string(),
            PatientInfo {
                first_name: "Jane".into(),
                last_name: "Doe".into(),
                age: 34,
                gender: "female".into(),
                contact: "5551234567".into(),
                email: "jane@x.com".into(),
                address: "1 Elm St".into(),
            },
            vec![TestDetail {
                test_name: "CBC".into(),
                test_type: "Blood Test".into(),
                test_date: "2024-01-01".into(),
                test_result: "Normal".into(),
                normal_range: Some("4.5-11.0".into()),
                notes: None,
                attachments: Some(vec![Attachment::from_bytes("r.pdf", "application/pdf", b"%PDF")]),
            }],
        )
    }

    #[test]
    fn test_save_then_get() {
        let mut store = RecordStore::new(MemoryStore::new());
        let record = make_record("MR-abcd-AAAAAA");
        store.save(&record).unwrap();

        assert_eq!(store.get_by_id(&record.id).unwrap(), Some(record.clone()));
        assert_eq!(store.get_all(), vec![record]);
        assert!(store.backend().get("patient_MR-abcd-AAAAAA").unwrap().is_some());
    }

    #[test]
    fn test_get_missing() {
        let store = RecordStore::new(MemoryStore::new());
        assert_eq!(store.get_by_id("MR-none-000000").unwrap(), None);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_save_order() {
        let mut store = RecordStore::new(MemoryStore::new());
        for id in ["MR-aaaa-000001", "MR-aaaa-000002", "MR-aaaa-000003"] {
            store.save(&make_record(id)).unwrap();
        }
        let ids: Vec<_> = store.get_all().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["MR-aaaa-000001", "MR-aaaa-000002", "MR-aaaa-000003"]);
    }

    #[test]
    fn test_duplicate_rejected() {
        let mut store = RecordStore::new(MemoryStore::new());
        let record = make_record("MR-abcd-AAAAAA");
        store.save(&record).unwrap();

        let result = store.save(&record);
        assert!(matches!(result, Err(StorageError::DuplicateId(_))));
        assert_eq!(store.get_all().len(), 1);
    }

    #[test]
    fn test_unparseable_is_not_found() {
        let mut backend = MemoryStore::new();
        backend.set("patient_MR-bad0-000000", "{not json").unwrap();
        backend.set(ALL_RECORDS_KEY, "oops").unwrap();
        let store = RecordStore::new(backend);

        assert_eq!(store.get_by_id("MR-bad0-000000").unwrap(), None);
        assert!(store.get_all().is_empty());
    }

    #[test]
    fn test_corrupt_list_fails_save() {
        let mut backend = MemoryStore::new();
        backend.set(ALL_RECORDS_KEY, "oops").unwrap();
        let mut store = RecordStore::new(backend);

        let result = store.save(&make_record("MR-abcd-AAAAAA"));
        assert!(matches!(result, Err(StorageError::Json(_))));
        assert_eq!(store.backend().get(ALL_RECORDS_KEY).unwrap().as_deref(), Some("oops"));
    }

    #[test]
    fn test_quota_failure_surfaces() {
        let mut store = RecordStore::new(MemoryStore::with_quota(64));
        let record = make_record("MR-abcd-AAAAAA");

        let result = store.save(&record);
        assert!(matches!(result, Err(StorageError::QuotaExceeded { .. })));
        assert_eq!(store.get_by_id(&record.id).unwrap(), None);
        assert!(store.backend().is_empty());
    }

    #[test]
    fn test_disabled_storage() {
        let mut backend = MemoryStore::new();
        backend.set_disabled(true);
        let mut store = RecordStore::new(backend);

        assert!(store.save(&make_record("MR-abcd-AAAAAA")).is_err());
        assert!(store.get_by_id("MR-abcd-AAAAAA").is_err());
        assert!(store.get_all().is_empty());
    }
}
