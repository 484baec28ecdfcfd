//! MedReport Core Library
//!
//! Patient test-result capture and printable medical reports, persisted in a
//! local key-value store.
//!
//! # Architecture
//!
//! ```text
//!   Form Wizard (patient info → test details)
//!        │ finalize
//!        ▼
//!   Identifier Generator ──▶ Record Store ──▶ KeyValueStore (memory / SQLite)
//!                                 │
//!                                 │ get_by_id
//!                                 ▼
//!                       Report Presentation ──▶ Report Renderer (markup + styles)
//!                                 │
//!                                 └──▶ Code-image panel (external endpoint)
//! ```
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, TestDetail, Attachment) and identifiers
//! - [`storage`]: Key-value backends and the record store
//! - [`report`]: HTML report rendering
//! - [`wizard`]: Two-step form wizard
//! - [`presentation`]: Report screen, code-image panel, session attachments
//! - [`config`], [`logging`]: Ambient setup

pub mod config;
pub mod logging;
pub mod models;
pub mod navigation;
pub mod presentation;
pub mod report;
pub mod storage;
pub mod validation;
pub mod wizard;

// Re-export commonly used types
pub use config::Config;
pub use models::{generate_patient_id, Attachment, PatientInfo, PatientRecord, TestDetail};
pub use navigation::Route;
pub use presentation::{ReportPresentation, ReportView};
pub use report::{render_report_markup, render_report_styles};
pub use storage::{KeyValueStore, MemoryStore, RecordStore, SqliteStore, StorageError};
pub use wizard::{FormWizard, WizardError, WizardStep};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, Mutex};

type DynRecordStore = RecordStore<Box<dyn KeyValueStore>>;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum MedReportError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl From<StorageError> for MedReportError {
    fn from(e: StorageError) -> Self {
        MedReportError::StorageError(e.to_string())
    }
}

impl From<WizardError> for MedReportError {
    fn from(e: WizardError) -> Self {
        match e {
            WizardError::Storage(e) => e.into(),
            other => MedReportError::InvalidInput(other.to_string()),
        }
    }
}

impl From<anyhow::Error> for MedReportError {
    fn from(e: anyhow::Error) -> Self {
        MedReportError::ConfigError(format!("{:#}", e))
    }
}

impl<T> From<std::sync::PoisonError<T>> for MedReportError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        MedReportError::StorageError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open or create a record store at the given path, with default settings.
#[uniffi::export]
pub fn open_store(path: String) -> Result<Arc<MedReportCore>, MedReportError> {
    let backend = SqliteStore::open(&path)?;
    Ok(MedReportCore::build(Box::new(backend), Config::default()))
}

/// Create an in-memory store (for testing).
#[uniffi::export]
pub fn open_store_in_memory() -> Result<Arc<MedReportCore>, MedReportError> {
    Ok(MedReportCore::build(
        Box::new(MemoryStore::new()),
        Config::default(),
    ))
}

/// Load config (JSON file, then `MEDREPORT_*` overrides), start logging and
/// open the configured store.
#[uniffi::export]
pub fn open_with_config(config_path: Option<String>) -> Result<Arc<MedReportCore>, MedReportError> {
    let config = match config_path {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    }
    .apply_env();

    logging::init(&config.log_filter);

    let backend: Box<dyn KeyValueStore> = match &config.storage_path {
        Some(path) => Box::new(SqliteStore::open(path)?),
        None => {
            tracing::warn!("No storage path configured, records will not survive restart");
            Box::new(MemoryStore::new())
        }
    };
    Ok(MedReportCore::build(backend, config))
}

/// Install the log subscriber.
#[uniffi::export]
pub fn init_logging(filter: String) {
    logging::init(&filter);
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe record store wrapper for FFI.
#[derive(uniffi::Object)]
pub struct MedReportCore {
    store: Arc<Mutex<DynRecordStore>>,
    config: Config,
}

impl MedReportCore {
    fn build(backend: Box<dyn KeyValueStore>, config: Config) -> Arc<Self> {
        Arc::new(Self {
            store: Arc::new(Mutex::new(RecordStore::new(backend))),
            config,
        })
    }
}

#[uniffi::export]
impl MedReportCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Get a record by identifier.
    pub fn get_record(&self, patient_id: String) -> Result<Option<FfiPatientRecord>, MedReportError> {
        let store = self.store.lock()?;
        let record = store.get_by_id(&patient_id)?;
        Ok(record.map(|r| r.into()))
    }

    /// All records in save order.
    pub fn list_records(&self) -> Result<Vec<FfiPatientRecord>, MedReportError> {
        let store = self.store.lock()?;
        Ok(store.get_all().into_iter().map(|r| r.into()).collect())
    }

    // =========================================================================
    // Report Operations
    // =========================================================================

    /// Open the report screen for a record.
    pub fn open_report(&self, patient_id: String) -> Result<FfiReport, MedReportError> {
        let store = self.store.lock()?;
        match ReportPresentation::load(&*store, &patient_id, &self.config) {
            ReportPresentation::Loaded(view) => Ok(view.into()),
            ReportPresentation::NotFound { patient_id, .. } => {
                Err(MedReportError::NotFound(patient_id))
            }
        }
    }

    /// Public address of a record's report.
    pub fn report_url(&self, patient_id: String) -> String {
        self.config.report_url(&patient_id)
    }

    // =========================================================================
    // Wizard Operations
    // =========================================================================

    /// Start a new wizard session.
    pub fn new_wizard(&self) -> Arc<FfiWizard> {
        Arc::new(FfiWizard {
            wizard: Mutex::new(FormWizard::with_max_id_attempts(self.config.max_id_attempts)),
        })
    }
}

/// Wizard session handle for FFI.
#[derive(uniffi::Object)]
pub struct FfiWizard {
    wizard: Mutex<FormWizard>,
}

#[uniffi::export]
impl FfiWizard {
    pub fn step(&self) -> Result<FfiWizardStep, MedReportError> {
        Ok(self.wizard.lock()?.step().into())
    }

    /// Current patient-info draft.
    pub fn patient_info(&self) -> Result<FfiPatientInfo, MedReportError> {
        Ok(self.wizard.lock()?.patient_info().clone().into())
    }

    /// Submit step one. Field errors come back as a list (empty on success).
    pub fn submit_patient_info(
        &self,
        info: FfiPatientInfo,
    ) -> Result<Vec<FfiFieldError>, MedReportError> {
        let mut wizard = self.wizard.lock()?;
        field_errors(wizard.submit_patient_info(info.into()))
    }

    pub fn back(&self) -> Result<(), MedReportError> {
        Ok(self.wizard.lock()?.back()?)
    }

    /// Replace the entry form's fields.
    pub fn set_test_draft(&self, detail: FfiTestDetail) -> Result<(), MedReportError> {
        let mut wizard = self.wizard.lock()?;
        wizard.entries_mut()?.set_draft(detail.into());
        Ok(())
    }

    pub fn test_draft(&self) -> Result<FfiTestDetail, MedReportError> {
        Ok(self.wizard.lock()?.entries().draft().clone().into())
    }

    pub fn add_attachment(&self, attachment: FfiAttachment) -> Result<(), MedReportError> {
        let mut wizard = self.wizard.lock()?;
        wizard.entries_mut()?.add_attachment(attachment.into());
        Ok(())
    }

    pub fn remove_attachment(&self, index: u32) -> Result<(), MedReportError> {
        let mut wizard = self.wizard.lock()?;
        wizard.entries_mut()?.remove_attachment(index as usize)?;
        Ok(())
    }

    /// Commit the entry form. Field errors come back as a list.
    pub fn submit_test(&self) -> Result<Vec<FfiFieldError>, MedReportError> {
        let mut wizard = self.wizard.lock()?;
        let result = wizard.entries_mut()?.submit().map(|_| ());
        field_errors(result)
    }

    /// Load a committed entry into the form for editing.
    pub fn edit_test(&self, index: u32) -> Result<FfiTestDetail, MedReportError> {
        let mut wizard = self.wizard.lock()?;
        let detail = wizard.entries_mut()?.begin_edit(index as usize)?;
        Ok(detail.clone().into())
    }

    pub fn cancel_edit(&self) -> Result<(), MedReportError> {
        let mut wizard = self.wizard.lock()?;
        wizard.entries_mut()?.cancel_edit()?;
        Ok(())
    }

    pub fn remove_test(&self, index: u32) -> Result<(), MedReportError> {
        let mut wizard = self.wizard.lock()?;
        wizard.entries_mut()?.remove(index as usize)?;
        Ok(())
    }

    pub fn committed_tests(&self) -> Result<Vec<FfiTestDetail>, MedReportError> {
        let wizard = self.wizard.lock()?;
        Ok(wizard
            .entries()
            .committed()
            .iter()
            .cloned()
            .map(|d| d.into())
            .collect())
    }

    pub fn can_finalize(&self) -> Result<bool, MedReportError> {
        Ok(self.wizard.lock()?.can_finalize())
    }

    /// Save the record and return where to navigate.
    pub fn finalize(&self, core: Arc<MedReportCore>) -> Result<FfiFinalized, MedReportError> {
        let mut wizard = self.wizard.lock()?;
        let mut store = core.store.lock()?;
        let finalized = wizard.finalize(&mut *store)?;
        Ok(FfiFinalized {
            patient_id: finalized.record.id,
            route: finalized.next.path(),
        })
    }
}

fn field_errors(result: Result<(), WizardError>) -> Result<Vec<FfiFieldError>, MedReportError> {
    match result {
        Ok(()) => Ok(Vec::new()),
        Err(WizardError::Validation(errors)) => Ok(errors
            .errors
            .into_iter()
            .map(|e| FfiFieldError {
                field: e.field.to_string(),
                message: e.message,
            })
            .collect()),
        Err(e) => Err(e.into()),
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe wizard step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, uniffi::Enum)]
pub enum FfiWizardStep {
    CollectingPatientInfo,
    CollectingTestDetails,
}

impl From<WizardStep> for FfiWizardStep {
    fn from(step: WizardStep) -> Self {
        match step {
            WizardStep::CollectingPatientInfo => FfiWizardStep::CollectingPatientInfo,
            WizardStep::CollectingTestDetails => FfiWizardStep::CollectingTestDetails,
        }
    }
}

/// FFI-safe field error.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFieldError {
    pub field: String,
    pub message: String,
}

/// FFI-safe patient info.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub email: String,
    pub address: String,
}

impl From<PatientInfo> for FfiPatientInfo {
    fn from(info: PatientInfo) -> Self {
        Self {
            first_name: info.first_name,
            last_name: info.last_name,
            age: info.age,
            gender: info.gender,
            contact: info.contact,
            email: info.email,
            address: info.address,
        }
    }
}

impl From<FfiPatientInfo> for PatientInfo {
    fn from(info: FfiPatientInfo) -> Self {
        PatientInfo {
            first_name: info.first_name,
            last_name: info.last_name,
            age: info.age,
            gender: info.gender,
            contact: info.contact,
            email: info.email,
            address: info.address,
        }
    }
}

/// FFI-safe attachment.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiAttachment {
    pub name: String,
    pub mime_type: String,
    pub data_url: String,
}

impl From<Attachment> for FfiAttachment {
    fn from(a: Attachment) -> Self {
        Self {
            name: a.name,
            mime_type: a.mime_type,
            data_url: a.data_url,
        }
    }
}

impl From<FfiAttachment> for Attachment {
    fn from(a: FfiAttachment) -> Self {
        Attachment {
            name: a.name,
            mime_type: a.mime_type,
            data_url: a.data_url,
        }
    }
}

/// FFI-safe test detail.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiTestDetail {
    pub test_name: String,
    pub test_type: String,
    pub test_date: String,
    pub test_result: String,
    pub normal_range: Option<String>,
    pub notes: Option<String>,
    pub attachments: Vec<FfiAttachment>,
}

impl From<TestDetail> for FfiTestDetail {
    fn from(d: TestDetail) -> Self {
        Self {
            test_name: d.test_name,
            test_type: d.test_type,
            test_date: d.test_date,
            test_result: d.test_result,
            normal_range: d.normal_range,
            notes: d.notes,
            attachments: d
                .attachments
                .unwrap_or_default()
                .into_iter()
                .map(|a| a.into())
                .collect(),
        }
    }
}

impl From<FfiTestDetail> for TestDetail {
    fn from(d: FfiTestDetail) -> Self {
        let attachments: Vec<Attachment> = d.attachments.into_iter().map(|a| a.into()).collect();
        TestDetail {
            test_name: d.test_name,
            test_type: d.test_type,
            test_date: d.test_date,
            test_result: d.test_result,
            normal_range: d.normal_range,
            notes: d.notes,
            attachments: (!attachments.is_empty()).then_some(attachments),
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiPatientRecord {
    pub id: String,
    pub info: FfiPatientInfo,
    pub test_details: Vec<FfiTestDetail>,
    pub created_at: String,
}

impl From<PatientRecord> for FfiPatientRecord {
    fn from(record: PatientRecord) -> Self {
        Self {
            info: record.info().into(),
            id: record.id,
            test_details: record.test_details.into_iter().map(|d| d.into()).collect(),
            created_at: record.created_at,
        }
    }
}

/// FFI-safe rendered report with its actions.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiReport {
    pub patient_id: String,
    pub report_url: String,
    pub markup: String,
    pub styles: String,
    pub inline_html: String,
    pub print_document: String,
    pub download_file_name: String,
    pub download_contents: String,
    pub code_image_url: Option<String>,
    pub code_image_file_name: String,
    pub share_title: String,
    pub share_text: String,
}

impl From<ReportView> for FfiReport {
    fn from(view: ReportView) -> Self {
        let download = view.download();
        let code_image = view.code_image();
        let share = code_image.share_payload();
        Self {
            patient_id: view.record().id.clone(),
            report_url: view.report_url().to_string(),
            markup: view.markup(),
            styles: view.styles().to_string(),
            inline_html: view.inline_html(),
            print_document: view.print_document(),
            download_file_name: download.file_name,
            download_contents: download.contents,
            code_image_url: code_image.image_url(),
            code_image_file_name: code_image.download_file_name(),
            share_title: share.title,
            share_text: share.text,
        }
    }
}

/// FFI-safe finalization result.
#[derive(Debug, Clone, PartialEq, uniffi::Record)]
pub struct FfiFinalized {
    pub patient_id: String,
    pub route: String,
}
