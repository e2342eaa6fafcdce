//! Check operation coordination

use crate::chart::{ResolvedChart, resolve};
use crate::cli::Args;
use crate::config::Settings;
use crate::config::yaml::load_config;
use crate::document::{Node, parse_str};
use crate::error::CheckError;
use crate::model::ValidationResult;
use crate::output::render;
use crate::system::System;
use crate::utils::fs::read_limited;
use crate::validator::validate;
use anyhow::{Context as _, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Values files larger than this are rejected before parsing
pub const MAX_VALUES_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Exit code when no file has findings that fail the run
pub const EXIT_CLEAN: i32 = 0;
/// Exit code when any file has errors
pub const EXIT_ERRORS: i32 = 1;
/// Exit code when only warnings were found and strict mode is on
pub const EXIT_WARNINGS: i32 = 2;

/// Coordinates the complete check run
#[non_exhaustive]
#[expect(clippy::module_name_repetitions, reason = "CheckOperation")]
pub struct CheckOperation<'src> {
    files: Vec<String>,
    chart: String,
    chart_version: Option<String>,
    settings: Settings,
    system: &'src dyn System,
}

impl<'src> CheckOperation<'src> {
    /// Create a new check operation from CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An explicit configuration file is missing
    /// - The configuration file cannot be read or parsed
    #[inline]
    pub fn new(args: Args, system: &'src dyn System) -> Result<Self> {
        let config = load_config(system, args.config.as_deref())?;
        let settings = config.merge(&args.ignore_keys, args.strict, args.output);
        debug!(
            ignore = ?settings.ignore_keys,
            strict = settings.strict,
            output = %settings.output,
            "settings resolved"
        );

        Ok(CheckOperation {
            files: args.files,
            chart: args.chart,
            chart_version: args.chart_version,
            settings,
            system,
        })
    }

    /// Effective settings of this run
    #[must_use]
    #[inline]
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Execute the check, writing one report per values file to `out`
    ///
    /// Returns the process exit code: 0 when clean, 1 when any file has
    /// errors, 2 when only warnings were found in strict mode.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The chart cannot be resolved or loaded
    /// - A values file is oversized, unreadable, unparseable or not a mapping
    /// - The chart schema is malformed or cannot be compiled
    /// - Writing a report fails
    #[inline]
    pub fn execute(&self, out: &mut dyn Write) -> Result<i32> {
        let chart = resolve(self.system, &self.chart, self.chart_version.as_deref())?;
        info!(chart = %chart.name, version = %chart.version, "chart resolved");

        let mut exit_code = EXIT_CLEAN;
        for file in &self.files {
            let result = self.check_file(file, &chart)?;
            render(&result, self.settings.output, out)
                .with_context(|| format!("Failed to write report for {file}"))?;

            if result.has_errors() {
                exit_code = EXIT_ERRORS;
            } else if self.settings.strict && result.has_warnings() && exit_code == EXIT_CLEAN {
                exit_code = EXIT_WARNINGS;
            }
        }
        out.flush().context("Failed to flush output")?;
        Ok(exit_code)
    }

    /// Validate one values file against the resolved chart
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The values file cannot be loaded
    /// - Validation fails with a run-level error
    pub fn check_file(&self, file: &str, chart: &ResolvedChart) -> Result<ValidationResult, CheckError> {
        let user = self.load_values(file)?;
        let result = validate(file, &user, chart, &self.settings.ignore_keys)?;
        debug!(
            file,
            errors = result.errors().len(),
            warnings = result.warnings().len(),
            "values file checked"
        );
        Ok(result)
    }

    fn load_values(&self, file: &str) -> Result<Node, CheckError> {
        let path = self.resolve_path(file)?;
        let content = read_limited(self.system, &path, MAX_VALUES_FILE_SIZE)?;
        let node = parse_str(&content)
            .map_err(|e| CheckError::document(format!("parsing values file {file}: {}", e.message())))?;

        // An empty document has no mapping at its root either.
        let Some(node) = node else {
            return Err(CheckError::document(format!(
                "values file {file}: expected a YAML mapping at top level"
            )));
        };
        if !node.is_mapping() {
            return Err(CheckError::document(format!(
                "values file {file}: expected a YAML mapping at top level, found a {}",
                node.kind_name()
            )));
        }
        Ok(node)
    }

    fn resolve_path(&self, file: &str) -> Result<PathBuf, CheckError> {
        let path = Path::new(file);
        if path.is_absolute() {
            return Ok(path.to_path_buf());
        }
        let cwd = self
            .system
            .current_dir()
            .map_err(|e| CheckError::document(format!("Cannot read current directory: {e}")))?;
        Ok(cwd.join(path))
    }
}
