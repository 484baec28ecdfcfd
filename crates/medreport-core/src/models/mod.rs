//! Domain models for medical reports.

mod attachment;
mod id;
mod patient;
mod test_detail;

pub use attachment::*;
pub use id::*;
pub use patient::*;
pub use test_detail::*;
