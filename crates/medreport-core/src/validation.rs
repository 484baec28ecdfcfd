//! Field checks for the wizard's two forms.
//!
//! Only presence, length and simple format rules. Errors are collected per
//! field so the host UI can show them inline.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{PatientInfo, TestDetail};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());

/// One rejected field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    /// camelCase field name as used in the form
    pub field: &'static str,
    pub message: String,
}

/// Every rejected field of one submission, in form order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    pub errors: Vec<FieldError>,
}

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: &str) {
        self.errors.push(FieldError {
            field,
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Message for `field`, if it failed.
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

fn min_len(value: &str, min: usize) -> bool {
    value.trim().chars().count() >= min
}

/// Check the patient information step.
pub fn validate_patient_info(info: &PatientInfo) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if !min_len(&info.first_name, 2) {
        errors.push("firstName", "First name must be at least 2 characters");
    }
    if !min_len(&info.last_name, 2) {
        errors.push("lastName", "Last name must be at least 2 characters");
    }
    if !min_len(&info.gender, 1) {
        errors.push("gender", "Please select a gender");
    }
    if !min_len(&info.contact, 10) {
        errors.push("contact", "Contact number must be at least 10 characters");
    }
    if !EMAIL.is_match(info.email.trim()) {
        errors.push("email", "Please enter a valid email address");
    }
    if !min_len(&info.address, 5) {
        errors.push("address", "Address must be at least 5 characters");
    }

    errors.into_result()
}

/// Check one test entry.
pub fn validate_test_detail(detail: &TestDetail) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    if !min_len(&detail.test_name, 2) {
        errors.push("testName", "Test name is required");
    }
    if !min_len(&detail.test_type, 2) {
        errors.push("testType", "Test type is required");
    }
    if !min_len(&detail.test_date, 1) {
        errors.push("testDate", "Test date is required");
    } else if chrono::NaiveDate::parse_from_str(detail.test_date.trim(), "%Y-%m-%d").is_err() {
        errors.push("testDate", "Test date must be YYYY-MM-DD");
    }
    if !min_len(&detail.test_result, 1) {
        errors.push("testResult", "Test result is required");
    }

    errors.into_result()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_info() -> PatientInfo {
        PatientInfo {
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            age: 34,
            gender: "female".into(),
            contact: "5551234567".into(),
            email: "jane@x.com".into(),
            address: "1 Elm St".into(),
        }
    }

    fn valid_detail() -> TestDetail {
        TestDetail {
            test_name: "CBC".into(),
            test_type: "Blood Test".into(),
            test_date: "2024-01-01".into(),
            test_result: "Normal".into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_patient_info() {
        assert!(validate_patient_info(&valid_info()).is_ok());
    }

    #[test]
    fn test_patient_info_errors_in_form_order() {
        let info = PatientInfo {
            first_name: "J".into(),
            contact: "555".into(),
            email: "not-an-email".into(),
            ..valid_info()
        };
        let errors = validate_patient_info(&info).unwrap_err();
        let fields: Vec<_> = errors.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["firstName", "contact", "email"]);
        assert_eq!(
            errors.for_field("email"),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn test_email_pattern() {
        for ok in ["a@b.co", "jane.doe+x@mail.example.org"] {
            assert!(EMAIL.is_match(ok), "{}", ok);
        }
        for bad in ["", "a@b", "a b@c.d", "@c.d", "a@@c.d"] {
            assert!(!EMAIL.is_match(bad), "{}", bad);
        }
    }

    #[test]
    fn test_whitespace_does_not_count() {
        let info = PatientInfo {
            address: "     ".into(),
            ..valid_info()
        };
        assert!(validate_patient_info(&info)
            .unwrap_err()
            .for_field("address")
            .is_some());
    }

    #[test]
    fn test_valid_detail() {
        assert!(validate_test_detail(&valid_detail()).is_ok());
    }

    #[test]
    fn test_detail_errors() {
        let detail = TestDetail {
            test_result: "".into(),
            test_date: "01/02/2024".into(),
            ..valid_detail()
        };
        let errors = validate_test_detail(&detail).unwrap_err();
        assert_eq!(errors.for_field("testDate"), Some("Test date must be YYYY-MM-DD"));
        assert_eq!(errors.for_field("testResult"), Some("Test result is required"));
        assert_eq!(errors.errors.len(), 2);
        assert!(errors.to_string().contains("testDate"));
    }
}
