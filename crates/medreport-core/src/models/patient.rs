//! Patient models.

use serde::{Deserialize, Serialize};

use super::TestDetail;

/// Gender choices offered by the patient form. Stored as free text.
pub const GENDERS: &[&str] = &["male", "female", "other"];

/// Demographics collected by the first wizard step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientInfo {
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    /// Phone-number-like, format not checked
    pub contact: String,
    pub email: String,
    pub address: String,
}

/// A finalized patient record with its test results.
///
/// Field names serialize in camelCase; this is the persisted layout and has
/// no schema version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PatientRecord {
    /// `MR-xxxx-XXXXXX`, assigned once at finalization
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub age: u32,
    pub gender: String,
    pub contact: String,
    pub email: String,
    pub address: String,
    /// Entry order is display order
    pub test_details: Vec<TestDetail>,
    /// RFC 3339 creation timestamp
    pub created_at: String,
}

impl PatientRecord {
    /// Assemble a record from the wizard's drafts, stamping the creation time.
    pub fn assemble(id: String, info: PatientInfo, test_details: Vec<TestDetail>) -> Self {
        Self {
            id,
            first_name: info.first_name,
            last_name: info.last_name,
            age: info.age,
            gender: info.gender,
            contact: info.contact,
            email: info.email,
            address: info.address,
            test_details,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// The demographic part of the record.
    pub fn info(&self) -> PatientInfo {
        PatientInfo {
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            age: self.age,
            gender: self.gender.clone(),
            contact: self.contact.clone(),
            email: self.email.clone(),
            address: self.address.clone(),
        }
    }
}
