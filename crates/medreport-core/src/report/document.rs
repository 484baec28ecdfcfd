//! Standalone report documents for printing and download.

use super::{escape_html, render_report_markup, render_report_styles, REPORT_TITLE};
use crate::models::PatientRecord;

const PRINT_SCRIPT: &str = r#"<script>
window.onload = function() {
  window.print();
  setTimeout(function() { window.close(); }, 500);
};
</script>"#;

fn document_title(record: &PatientRecord) -> String {
    format!("{} - {}", REPORT_TITLE, escape_html(&record.full_name()))
}

fn build_document(record: &PatientRecord, trailer: &str) -> String {
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta charset=\"utf-8\">\n",
            "<title>{}</title>\n",
            "<style>{}</style>\n",
            "</head>\n",
            "<body>\n",
            "{}",
            "{}",
            "</body>\n",
            "</html>\n",
        ),
        document_title(record),
        render_report_styles(),
        render_report_markup(record),
        trailer,
    )
}

/// Inline view: the stylesheet followed by the markup, for embedding in a page.
pub fn render_inline_report(record: &PatientRecord) -> String {
    format!(
        "<style>{}</style>\n{}",
        render_report_styles(),
        render_report_markup(record)
    )
}

/// Full HTML document with the stylesheet inlined.
pub fn render_report_document(record: &PatientRecord) -> String {
    build_document(record, "")
}

/// Same document, plus a script that prints on load and closes the window.
pub fn render_print_document(record: &PatientRecord) -> String {
    build_document(record, PRINT_SCRIPT)
}

/// A report ready to be saved as a file.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDownload {
    /// `medical-report-<id>.html`
    pub file_name: String,
    pub content_type: &'static str,
    pub contents: String,
}

impl ReportDownload {
    pub fn for_record(record: &PatientRecord) -> Self {
        Self {
            file_name: report_file_name(&record.id),
            content_type: "text/html",
            contents: render_report_document(record),
        }
    }
}

/// Download file name for a report.
pub fn report_file_name(patient_id: &str) -> String {
    format!("medical-report-{}.html", sanitize_file_component(patient_id))
}

/// Keep identifier characters that are safe in a file name.
fn sanitize_file_component(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
