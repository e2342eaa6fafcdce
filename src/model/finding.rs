//! A single reported issue

use core::fmt;
use serde::Serialize;

/// Severity of a validation finding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Error => f.write_str("ERROR"),
            Self::Warning => f.write_str("WARNING"),
        }
    }
}

/// A single validation issue found in a values document
///
/// `line` is 1-based; 0 means no source line could be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub line: usize,
    pub key_path: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl Finding {
    /// Create an error finding
    #[must_use]
    #[inline]
    pub fn error<P: Into<String>, M: Into<String>>(line: usize, key_path: P, message: M) -> Self {
        Self {
            severity: Severity::Error,
            line,
            key_path: key_path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Create a warning finding
    #[must_use]
    #[inline]
    pub fn warning<P: Into<String>, M: Into<String>>(line: usize, key_path: P, message: M) -> Self {
        Self {
            severity: Severity::Warning,
            line,
            key_path: key_path.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    /// Attach a "did you mean" suggestion (builder pattern)
    #[must_use]
    #[inline]
    pub fn with_suggestion(mut self, suggestion: Option<String>) -> Self {
        self.suggestion = suggestion;
        self
    }

    #[must_use]
    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    #[must_use]
    #[inline]
    pub fn is_warning(&self) -> bool {
        self.severity == Severity::Warning
    }
}

impl fmt::Display for Finding {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)?;
        if let Some(suggestion) = self.suggestion.as_ref() {
            write!(f, " (did you mean {suggestion:?}?)")?;
        }
        Ok(())
    }
}
