//! Application configuration.
//!
//! Read from a JSON file; every field has a default so a partial (or empty)
//! file is fine. A few environment variables override the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use medreport_codeimage::CodeImageSettings;
use serde::{Deserialize, Serialize};

use crate::navigation::Route;
use crate::wizard::DEFAULT_MAX_ID_ATTEMPTS;

/// Default tracing filter.
pub const DEFAULT_LOG_FILTER: &str = "medreport_core=info,medreport_codeimage=info";

/// Default public address of the app.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

pub const ENV_STORAGE_PATH: &str = "MEDREPORT_STORAGE_PATH";
pub const ENV_BASE_URL: &str = "MEDREPORT_BASE_URL";
pub const ENV_LOG: &str = "MEDREPORT_LOG";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// SQLite file for records; in-memory when unset
    pub storage_path: Option<PathBuf>,
    /// Public address the report links are built on
    pub base_url: String,
    /// External code-image endpoint
    pub code_image: CodeImageSettings,
    pub log_filter: String,
    /// Identifier collision retries at finalization
    pub max_id_attempts: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_path: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            code_image: CodeImageSettings::default(),
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            max_id_attempts: DEFAULT_MAX_ID_ATTEMPTS,
        }
    }
}

impl Config {
    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(raw: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Apply `MEDREPORT_*` environment overrides.
    pub fn apply_env(self) -> Self {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(path) = lookup(ENV_STORAGE_PATH).filter(|v| !v.is_empty()) {
            self.storage_path = Some(PathBuf::from(path));
        }
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(filter) = lookup(ENV_LOG).filter(|v| !v.is_empty()) {
            self.log_filter = filter;
        }
        self
    }

    /// Public address of a record's report view.
    pub fn report_url(&self, patient_id: &str) -> String {
        Route::GeneratedReport(patient_id.to_string()).url(&self.base_url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::from_json("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.code_image.size, 200);
        assert_eq!(config.max_id_attempts, 5);
    }

    #[test]
    fn test_partial_file() {
        let config = Config::from_json(
            r#"{"base_url": "https://reports.example", "code_image": {"size": 300}}"#,
        )
        .unwrap();
        assert_eq!(config.base_url, "https://reports.example");
        assert_eq!(config.code_image.size, 300);
        assert_eq!(config.code_image.margin, 20);
        assert_eq!(config.storage_path, None);
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("medreport.json");
        std::fs::write(&path, r#"{"storage_path": "/tmp/records.db"}"#).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.storage_path, Some(PathBuf::from("/tmp/records.db")));

        let missing = Config::load(dir.path().join("nope.json"));
        assert!(missing.unwrap_err().to_string().contains("reading config"));
    }

    #[test]
    fn test_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_BASE_URL, "https://override.example"),
            (ENV_LOG, ""),
        ]
        .into_iter()
        .collect();

        let config = Config::default().apply_overrides(|k| env.get(k).map(|v| v.to_string()));
        assert_eq!(config.base_url, "https://override.example");
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_report_url() {
        let config = Config::default();
        assert_eq!(
            config.report_url("MR-abcd-123456"),
            "http://localhost:8080/generated-report/MR-abcd-123456"
        );
    }
}
