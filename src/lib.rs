//! values-checker - validate values files against a chart before deploying
//!
//! This library compares user values files with a chart's defaults and its
//! optional values schema, reporting unknown keys (with suggestions), type
//! mismatches, schema violations and deprecated keys.

pub mod chart;
pub mod cli;
pub mod config;
pub mod document;
pub mod error;
pub mod model;
pub mod operations;
pub mod output;
pub mod system;
pub mod utils;
pub mod validator;

use anyhow::Result;
use cli::Args;
use operations::check::CheckOperation;
use system::System;

/// Main entry point for the values-checker library
///
/// Writes the reports to stdout and returns the process exit code.
///
/// # Errors
///
/// Returns an error if the run fails with a tool error.
pub fn run(args: Args, system: &dyn System) -> Result<i32> {
    let operation = CheckOperation::new(args, system)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    operation.execute(&mut out)
}
