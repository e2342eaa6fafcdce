//! Operations module
//!
//! Coordinates a check run: chart resolution, values loading, validation and
//! reporting

pub mod check;

pub use check::*;
