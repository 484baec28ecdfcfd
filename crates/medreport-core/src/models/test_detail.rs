//! Test result models.

use serde::{Deserialize, Serialize};

use super::Attachment;

/// Test types offered by the entry form. Stored as free text.
pub const TEST_TYPES: &[&str] = &[
    "Blood Test",
    "Urine Test",
    "Imaging",
    "Biopsy",
    "Genetic Test",
    "Other",
];

/// One diagnostic test's metadata and result.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TestDetail {
    pub test_name: String,
    pub test_type: String,
    /// `YYYY-MM-DD`
    pub test_date: String,
    /// Free-form, units embedded
    pub test_result: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub normal_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Never `Some` with an empty list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<Attachment>>,
}

impl TestDetail {
    /// Attachments as a slice (empty when absent).
    pub fn attachments(&self) -> &[Attachment] {
        self.attachments.as_deref().unwrap_or(&[])
    }

    pub fn has_attachments(&self) -> bool {
        !self.attachments().is_empty()
    }

    /// Collapse blank optional text and empty attachment lists to `None`.
    pub fn normalized(mut self) -> Self {
        self.normal_range = non_blank(self.normal_range);
        self.notes = non_blank(self.notes);
        if self.attachments.as_ref().is_some_and(|a| a.is_empty()) {
            self.attachments = None;
        }
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
