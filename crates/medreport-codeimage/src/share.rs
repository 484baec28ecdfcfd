//! Share action for the code-image panel.
//!
//! The host platform may or may not offer a native share sheet. When it is
//! missing or the share fails, the report address is copied to the clipboard
//! instead.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Share failures reported by the host.
#[derive(Error, Debug)]
pub enum ShareError {
    #[error("Share cancelled")]
    Cancelled,

    #[error("Share failed: {0}")]
    Failed(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}

/// What gets handed to the share sheet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

impl SharePayload {
    /// Payload for a report's code image.
    pub fn for_report(patient_id: &str, report_url: &str) -> Self {
        Self {
            title: format!("Medical Report QR Code - {}", patient_id),
            text: "Scan this QR code to view your medical report".to_string(),
            url: report_url.to_string(),
        }
    }
}

/// Native share capability of the host.
pub trait ShareTarget {
    fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;
}

/// Clipboard capability of the host.
pub trait Clipboard {
    fn copy_text(&self, text: &str) -> Result<(), ShareError>;
}

/// Result of [`share_or_copy`].
#[derive(Debug, Clone, PartialEq)]
pub enum ShareOutcome {
    /// Shared through the native sheet
    Shared,
    /// Report URL copied to the clipboard
    Copied,
    /// Neither worked; the reason has been logged
    Failed(String),
}

/// Share `payload`, falling back to copying its URL.
pub fn share_or_copy(
    target: Option<&dyn ShareTarget>,
    clipboard: &dyn Clipboard,
    payload: &SharePayload,
) -> ShareOutcome {
    if let Some(target) = target {
        match target.share(payload) {
            Ok(()) => return ShareOutcome::Shared,
            Err(e) => tracing::warn!("Error sharing, falling back to clipboard: {e}"),
        }
    }

    match clipboard.copy_text(&payload.url) {
        Ok(()) => ShareOutcome::Copied,
        Err(e) => {
            tracing::error!("Clipboard copy failed: {e}");
            ShareOutcome::Failed(e.to_string())
        }
    }
}
