//! Report rendering.
//!
//! Pure functions from a [`PatientRecord`](crate::models::PatientRecord) to
//! HTML. Output depends only on the record, so rendering twice gives
//! byte-identical results. Every user-supplied value is HTML-escaped.

mod document;
mod markup;
mod styles;

pub use document::*;
pub use markup::*;
pub use styles::*;
