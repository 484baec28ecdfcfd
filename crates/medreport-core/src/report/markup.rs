//! Report body markup.

use crate::models::{Attachment, PatientRecord, TestDetail};

/// Fixed report title.
pub const REPORT_TITLE: &str = "Medical Report";

const FOOTER: &str = "This report is generated automatically. Please consult with a healthcare professional for interpretation.";

/// Escape text for HTML element content and quoted attributes.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// `2024-03-05T10:00:00Z` → `March 5, 2024`. Unparseable input is returned as is.
pub fn format_report_date(created_at: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(created_at)
        .map(|dt| dt.format("%B %-d, %Y").to_string())
        .unwrap_or_else(|_| created_at.to_string())
}

/// `2024-03-05` → `3/5/2024`. Unparseable input is returned as is.
pub fn format_test_date(test_date: &str) -> String {
    chrono::NaiveDate::parse_from_str(test_date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|_| test_date.to_string())
}

/// Render the report body: header, patient information, then one block per
/// test in stored order.
pub fn render_report_markup(record: &PatientRecord) -> String {
    let mut html = String::new();

    html.push_str("<div class=\"report-container\">\n");

    // Header
    html.push_str(&format!(
        concat!(
            "<div class=\"report-header\">\n",
            "<h1>{}</h1>\n",
            "<div class=\"report-meta\">\n",
            "<div>Patient ID: <strong>{}</strong></div>\n",
            "<div>Report Date: {}</div>\n",
            "</div>\n",
            "</div>\n",
        ),
        REPORT_TITLE,
        escape_html(&record.id),
        escape_html(&format_report_date(&record.created_at)),
    ));

    // Patient information
    html.push_str("<div class=\"patient-info\">\n<h2>Patient Information</h2>\n<div class=\"info-grid\">\n");
    let name = record.full_name();
    let age = format!("{} years", record.age);
    let rows = [
        ("Name", name.as_str()),
        ("Age", age.as_str()),
        ("Gender", record.gender.as_str()),
        ("Contact", record.contact.as_str()),
        ("Email", record.email.as_str()),
        ("Address", record.address.as_str()),
    ];
    for (label, value) in rows {
        html.push_str(&format!(
            "<div class=\"info-row\"><div class=\"info-label\">{}:</div><div class=\"info-value\">{}</div></div>\n",
            label,
            escape_html(value)
        ));
    }
    html.push_str("</div>\n</div>\n");

    // Test results
    html.push_str("<div class=\"test-results\">\n<h2>Test Results</h2>\n");
    for test in &record.test_details {
        render_test(&mut html, test);
    }
    html.push_str("</div>\n");

    html.push_str(&format!("<div class=\"report-footer\"><p>{}</p></div>\n", FOOTER));
    html.push_str("</div>\n");

    html
}

fn render_test(html: &mut String, test: &TestDetail) {
    html.push_str(&format!(
        concat!(
            "<div class=\"test-result\">\n",
            "<div class=\"test-header\"><h3>{}</h3><span class=\"test-date\">{}</span></div>\n",
            "<div class=\"test-body\">\n",
        ),
        escape_html(&test.test_name),
        escape_html(&format_test_date(&test.test_date)),
    ));

    test_row(html, "Type", &test.test_type);
    test_row(html, "Result", &test.test_result);
    if let Some(range) = &test.normal_range {
        test_row(html, "Normal Range", range);
    }
    if let Some(notes) = &test.notes {
        test_row(html, "Notes", notes);
    }

    if test.has_attachments() {
        html.push_str("<div class=\"attachments-section\">\n<h4>Attachments</h4>\n<div class=\"attachments-grid\">\n");
        for attachment in test.attachments() {
            render_attachment(html, attachment);
        }
        html.push_str("</div>\n</div>\n");
    }

    html.push_str("</div>\n</div>\n");
}

fn test_row(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "<div class=\"test-row\"><div class=\"test-cell\">{}:</div><div class=\"test-cell\">{}</div></div>\n",
        label,
        escape_html(value)
    ));
}

fn render_attachment(html: &mut String, attachment: &Attachment) {
    let name = escape_html(&attachment.name);
    html.push_str("<div class=\"attachment-item\">\n");

    // Only inline data is allowed as an image source.
    if attachment.is_image() && attachment.has_inline_data() {
        html.push_str(&format!(
            "<div class=\"attachment-preview\"><img src=\"{}\" alt=\"{}\" /></div>\n",
            escape_html(&attachment.data_url),
            name
        ));
    } else {
        let category = attachment.category();
        html.push_str(&format!(
            "<div class=\"attachment-preview file-preview\"><div class=\"file-icon {}\">{}</div></div>\n",
            category.css_class(),
            category.label()
        ));
    }

    html.push_str(&format!(
        concat!(
            "<div class=\"attachment-info\">",
            "<div class=\"attachment-name\" title=\"{}\">{}</div>",
            "<div class=\"attachment-type\">{}</div>",
            "</div>\n",
            "</div>\n",
        ),
        name,
        name,
        escape_html(&attachment.type_label()),
    ));
}
