//! Scannable code images for medical reports.
//!
//! The report view shows a code image that points back at the report's own
//! address. The image itself comes from an external HTTP endpoint that maps a
//! URL string to a PNG; this crate builds those requests, renders an offline
//! SVG fallback, and implements the share-or-copy action offered next to it.

pub mod render;
pub mod request;
pub mod share;

#[cfg(feature = "fetch")]
pub mod fetch;

pub use render::*;
pub use request::*;
pub use share::*;

use thiserror::Error;

/// Code-image errors.
#[derive(Error, Debug)]
pub enum CodeImageError {
    #[error("Code encoding failed: {0}")]
    Encode(String),

    #[error("Code image request failed: {0}")]
    Request(String),

    #[error("Empty report address")]
    EmptyAddress,
}

pub type CodeImageResult<T> = Result<T, CodeImageError>;
