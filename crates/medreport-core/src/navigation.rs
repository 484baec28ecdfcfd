//! Screens reachable in the app.

use std::fmt;

/// A navigable screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Landing page
    Home,
    /// The two-step wizard
    PatientForm,
    /// Report view for one record
    GeneratedReport(String),
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::PatientForm => "/patient-form".to_string(),
            Route::GeneratedReport(id) => {
                format!("/generated-report/{}", path_segment(id))
            }
        }
    }

    /// Parse a path (query and fragment ignored). Unknown paths are `None`.
    pub fn parse(path: &str) -> Option<Self> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let trimmed = path.trim_end_matches('/');
        match trimmed {
            "" => Some(Route::Home),
            "/patient-form" => Some(Route::PatientForm),
            _ => trimmed
                .strip_prefix("/generated-report/")
                .filter(|id| !id.is_empty() && !id.contains('/'))
                .map(|id| Route::GeneratedReport(id.to_string())),
        }
    }

    /// Absolute address under `base_url`.
    pub fn url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.path())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}

// Identifiers are `MR-` plus base-36; anything else is replaced.
fn path_segment(id: &str) -> String {
    id.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect()
}
