//! Error handling module
//!
//! Defines the run-level error type and its exit codes

pub mod types;

pub use types::*;
