//! Report presentation.
//!
//! Loads a record for the report screen and exposes the actions offered
//! there: inline view, print, download and the code-image panel. A missing
//! record is a terminal not-found state that only offers the way home.

mod code_image;
mod session;

pub use code_image::*;
pub use session::*;

use crate::config::Config;
use crate::models::PatientRecord;
use crate::navigation::Route;
use crate::report::{
    render_inline_report, render_print_document, render_report_markup, render_report_styles,
    ReportDownload,
};
use crate::storage::{KeyValueStore, RecordStore};

/// Result of opening the report screen.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPresentation {
    Loaded(ReportView),
    NotFound { patient_id: String, home: Route },
}

impl ReportPresentation {
    /// Look `patient_id` up. Read failures are logged and shown as not found.
    pub fn load<S: KeyValueStore>(store: &RecordStore<S>, patient_id: &str, config: &Config) -> Self {
        let record = match store.get_by_id(patient_id) {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(patient_id, "Error retrieving patient data: {e}");
                None
            }
        };

        match record {
            Some(record) => {
                let report_url = config.report_url(&record.id);
                ReportPresentation::Loaded(ReportView::new(record, report_url, config))
            }
            None => {
                tracing::warn!(patient_id, "Patient record not found");
                ReportPresentation::NotFound {
                    patient_id: patient_id.to_string(),
                    home: Route::Home,
                }
            }
        }
    }

    pub fn view(&self) -> Option<&ReportView> {
        match self {
            ReportPresentation::Loaded(view) => Some(view),
            ReportPresentation::NotFound { .. } => None,
        }
    }
}

/// Read-only view of one loaded record.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportView {
    record: PatientRecord,
    report_url: String,
    code_image: CodeImagePanel,
}

impl ReportView {
    pub fn new(record: PatientRecord, report_url: String, config: &Config) -> Self {
        let code_image = CodeImagePanel::new(&record.id, &report_url, config.code_image.clone());
        Self {
            record,
            report_url,
            code_image,
        }
    }

    pub fn record(&self) -> &PatientRecord {
        &self.record
    }

    /// Address of this report, encoded into the code image.
    pub fn report_url(&self) -> &str {
        &self.report_url
    }

    pub fn markup(&self) -> String {
        render_report_markup(&self.record)
    }

    pub fn styles(&self) -> &'static str {
        render_report_styles()
    }

    /// Styles and markup for the on-screen view.
    pub fn inline_html(&self) -> String {
        render_inline_report(&self.record)
    }

    /// Document for a new print window.
    pub fn print_document(&self) -> String {
        render_print_document(&self.record)
    }

    pub fn download(&self) -> ReportDownload {
        ReportDownload::for_record(&self.record)
    }

    pub fn code_image(&self) -> &CodeImagePanel {
        &self.code_image
    }

    pub fn code_image_mut(&mut self) -> &mut CodeImagePanel {
        &mut self.code_image
    }
}
