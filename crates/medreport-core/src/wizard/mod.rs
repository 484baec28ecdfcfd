//! Two-step patient form wizard.
//!
//! ```text
//! CollectingPatientInfo ──submit──▶ CollectingTestDetails ──finalize──▶ record saved
//!          ▲                                  │
//!          └──────────────back────────────────┘
//! ```
//!
//! The wizard owns the transient draft; nothing is persisted until
//! [`FormWizard::finalize`] assembles the record and hands it to the store.

mod entries;

pub use entries::*;

use thiserror::Error;

use crate::models::{generate_patient_id, PatientInfo, PatientRecord};
use crate::navigation::Route;
use crate::storage::{KeyValueStore, RecordStore, StorageError};
use crate::validation::{validate_patient_info, ValidationErrors};

/// Default number of identifiers tried before giving up on collisions.
pub const DEFAULT_MAX_ID_ATTEMPTS: u32 = 5;

/// Wizard errors.
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Not available at step {actual:?} (needs {expected:?})")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    #[error("At least one test entry is required")]
    NoTestDetails,

    #[error("No entry at position {0}")]
    InvalidEntryIndex(usize),

    #[error("No entry is being edited")]
    NotEditing,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No unused identifier after {0} attempts")]
    IdExhausted(u32),
}

pub type WizardResult<T> = Result<T, WizardError>;

/// Wizard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    CollectingPatientInfo,
    CollectingTestDetails,
}

/// Outcome of a successful finalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Finalized {
    pub record: PatientRecord,
    /// Where the host should navigate next
    pub next: Route,
}

/// In-memory wizard session.
#[derive(Debug, Clone)]
pub struct FormWizard {
    step: WizardStep,
    patient_info: PatientInfo,
    entries: TestEntries,
    max_id_attempts: u32,
}

impl Default for FormWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl FormWizard {
    pub fn new() -> Self {
        Self::with_max_id_attempts(DEFAULT_MAX_ID_ATTEMPTS)
    }

    pub fn with_max_id_attempts(max_id_attempts: u32) -> Self {
        Self {
            step: WizardStep::CollectingPatientInfo,
            patient_info: PatientInfo::default(),
            entries: TestEntries::new(),
            max_id_attempts: max_id_attempts.max(1),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// The patient-info draft (kept across [`back`](Self::back)).
    pub fn patient_info(&self) -> &PatientInfo {
        &self.patient_info
    }

    /// Submit step one. The values are kept even when validation fails so
    /// the form can be redisplayed with them.
    pub fn submit_patient_info(&mut self, info: PatientInfo) -> WizardResult<()> {
        self.require(WizardStep::CollectingPatientInfo)?;
        self.patient_info = info;
        validate_patient_info(&self.patient_info)?;

        self.step = WizardStep::CollectingTestDetails;
        tracing::info!("Patient information saved, collecting test details");
        Ok(())
    }

    /// Return to step one. Nothing is discarded.
    pub fn back(&mut self) -> WizardResult<()> {
        self.require(WizardStep::CollectingTestDetails)?;
        self.step = WizardStep::CollectingPatientInfo;
        Ok(())
    }

    pub fn entries(&self) -> &TestEntries {
        &self.entries
    }

    /// Step-two entry list; only available during step two.
    pub fn entries_mut(&mut self) -> WizardResult<&mut TestEntries> {
        self.require(WizardStep::CollectingTestDetails)?;
        Ok(&mut self.entries)
    }

    /// Whether [`finalize`](Self::finalize) would be attempted.
    pub fn can_finalize(&self) -> bool {
        self.step == WizardStep::CollectingTestDetails && !self.entries.committed().is_empty()
    }

    /// Assign an identifier, assemble the record and save it.
    ///
    /// Identifiers already present in the store are skipped. On success the
    /// draft is torn down and the wizard starts over; on failure the draft
    /// is left intact for another attempt.
    pub fn finalize<S: KeyValueStore>(
        &mut self,
        store: &mut RecordStore<S>,
    ) -> WizardResult<Finalized> {
        self.require(WizardStep::CollectingTestDetails)?;
        if self.entries.committed().is_empty() {
            return Err(WizardError::NoTestDetails);
        }

        for attempt in 1..=self.max_id_attempts {
            let id = generate_patient_id();
            if store.contains(&id)? {
                tracing::warn!(patient_id = %id, attempt, "Identifier collision, retrying");
                continue;
            }

            let record = PatientRecord::assemble(
                id.clone(),
                self.patient_info.clone(),
                self.entries.committed().to_vec(),
            );
            match store.save(&record) {
                Ok(()) => {}
                Err(StorageError::DuplicateId(_)) => continue,
                Err(e) => return Err(e.into()),
            }

            *self = Self::with_max_id_attempts(self.max_id_attempts);

            tracing::info!(patient_id = %id, tests = record.test_details.len(), "Report generated");
            return Ok(Finalized {
                next: Route::GeneratedReport(id),
                record,
            });
        }

        Err(WizardError::IdExhausted(self.max_id_attempts))
    }

    fn require(&self, expected: WizardStep) -> WizardResult<()> {
        if self.step != expected {
            return Err(WizardError::WrongStep {
                expected,
                actual: self.step,
            });
        }
        Ok(())
    }
}
