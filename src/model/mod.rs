//! Finding and result model
//!
//! Findings are the user-facing output of a validation run

pub mod finding;
pub mod result;

pub use finding::{Finding, Severity};
pub use result::ValidationResult;
