//! Requests against the external code-image endpoint.

use serde::{Deserialize, Serialize};

use crate::{CodeImageError, CodeImageResult};

/// Default public endpoint that renders a URL into a code image.
pub const DEFAULT_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";

/// Default square edge length in pixels.
pub const DEFAULT_SIZE: u32 = 200;

/// Default quiet-zone margin in pixels.
pub const DEFAULT_MARGIN: u32 = 20;

/// Endpoint settings, usually read from the application config.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CodeImageSettings {
    /// Base URL of the image service
    pub endpoint: String,
    /// Edge length in pixels (images are square)
    pub size: u32,
    /// Margin in pixels
    pub margin: u32,
}

impl Default for CodeImageSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            size: DEFAULT_SIZE,
            margin: DEFAULT_MARGIN,
        }
    }
}

/// A single code-image request for one report address.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeImageRequest {
    /// The address encoded into the image
    pub data: String,
    pub settings: CodeImageSettings,
}

impl CodeImageRequest {
    /// Build a request for `report_url`. Empty addresses are rejected since
    /// the panel would otherwise encode nothing.
    pub fn new(report_url: &str, settings: CodeImageSettings) -> CodeImageResult<Self> {
        if report_url.trim().is_empty() {
            return Err(CodeImageError::EmptyAddress);
        }
        Ok(Self {
            data: report_url.to_string(),
            settings,
        })
    }

    /// Full GET URL for the image service.
    pub fn url(&self) -> String {
        let endpoint = &self.settings.endpoint;
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        format!(
            "{}{}data={}&size={}x{}&margin={}",
            endpoint,
            separator,
            urlencoding::encode(&self.data),
            self.settings.size,
            self.settings.size,
            self.settings.margin
        )
    }
}
