//! YAML configuration loading and parsing

use crate::config::{CheckerConfig, DEFAULT_CONFIG_FILE};
use crate::error::CheckError;
use crate::system::System;
use std::path::PathBuf;
use tracing::debug;

/// Load the checker config
///
/// With an explicit `path` the file must exist. Without one,
/// `.values-checker.yaml` in the current directory is used when present,
/// and defaults apply otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit config file does not exist
/// - The config file cannot be read or parsed
pub fn load_config(system: &dyn System, path: Option<&str>) -> Result<CheckerConfig, CheckError> {
    let config_path = match path {
        Some(explicit) => {
            let explicit = PathBuf::from(explicit);
            if !system.is_file(&explicit) {
                return Err(CheckError::configuration(format!(
                    "Configuration file not found: {}",
                    explicit.display()
                )));
            }
            explicit
        }
        None => {
            let cwd = system
                .current_dir()
                .map_err(|e| CheckError::configuration(format!("Cannot read current directory: {e}")))?;
            let candidate = cwd.join(DEFAULT_CONFIG_FILE);
            if !system.is_file(&candidate) {
                return Ok(CheckerConfig::default());
            }
            candidate
        }
    };

    debug!(path = %config_path.display(), "loading checker config");
    let content = system.read_to_string(&config_path).map_err(|e| {
        CheckError::configuration(format!(
            "Failed to read configuration file {}: {e}",
            config_path.display()
        ))
    })?;

    if content.trim().is_empty() {
        return Ok(CheckerConfig::default());
    }

    serde_yaml::from_str(&content).map_err(|e| {
        return CheckError::configuration(format!(
            "Failed to parse configuration file {}: {e}",
            config_path.display()
        ));
    })
}
