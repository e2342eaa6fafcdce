//! Checker configuration
//!
//! Handles the optional YAML config file and its merge with command-line
//! arguments.

pub mod yaml;

use crate::output::OutputFormat;
use serde::Deserialize;

/// Default config file looked up in the current directory
pub const DEFAULT_CONFIG_FILE: &str = ".values-checker.yaml";

/// Contents of a checker config file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CheckerConfig {
    /// Glob patterns of key paths to skip
    #[serde(default)]
    pub ignore_keys: Vec<String>,

    /// Treat warnings as failures
    #[serde(default)]
    pub strict: bool,

    #[serde(default)]
    pub output: Option<OutputFormat>,
}

/// Effective settings for one run, after merging config and CLI
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub ignore_keys: Vec<String>,
    pub strict: bool,
    pub output: OutputFormat,
}

impl CheckerConfig {
    /// Merge command-line values over this config
    ///
    /// Ignore patterns are combined (config first), `strict` is enabled if
    /// either side enables it, and an explicit output format wins.
    #[must_use]
    pub fn merge(self, ignore_keys: &[String], strict: bool, output: Option<OutputFormat>) -> Settings {
        let mut merged = self.ignore_keys;
        for key in ignore_keys {
            if !merged.contains(key) {
                merged.push(key.clone());
            }
        }
        Settings {
            ignore_keys: merged,
            strict: self.strict || strict,
            output: output.or(self.output).unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_cli() {
        let config = CheckerConfig {
            ignore_keys: vec!["global.*".to_owned()],
            strict: true,
            output: Some(OutputFormat::Json),
        };
        let settings = config.merge(
            &["global.*".to_owned(), "extra".to_owned()],
            false,
            Some(OutputFormat::Text),
        );
        assert_eq!(settings.ignore_keys, vec!["global.*", "extra"]);
        assert!(settings.strict);
        assert_eq!(settings.output, OutputFormat::Text);
    }

    #[test]
    fn test_merge_defaults() {
        let settings = CheckerConfig::default().merge(&[], false, None);
        assert!(settings.ignore_keys.is_empty());
        assert!(!settings.strict);
        assert_eq!(settings.output, OutputFormat::Text);
    }
}
