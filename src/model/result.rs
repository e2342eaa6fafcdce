//! Result of validating one values document

use super::{Finding, Severity};

/// Complete result of a validation run
///
/// Derived views are computed on every call; the result is not mutated
/// once the run that produced it has completed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    pub values_file: String,
    pub chart_name: String,
    pub chart_version: String,
    pub findings: Vec<Finding>,
}

impl ValidationResult {
    /// All findings with error severity, in detection order
    #[must_use]
    pub fn errors(&self) -> Vec<&Finding> {
        self.with_severity(Severity::Error)
    }

    /// All findings with warning severity, in detection order
    #[must_use]
    pub fn warnings(&self) -> Vec<&Finding> {
        self.with_severity(Severity::Warning)
    }

    #[must_use]
    #[inline]
    pub fn has_errors(&self) -> bool {
        self.findings.iter().any(Finding::is_error)
    }

    #[must_use]
    #[inline]
    pub fn has_warnings(&self) -> bool {
        self.findings.iter().any(Finding::is_warning)
    }

    fn with_severity(&self, severity: Severity) -> Vec<&Finding> {
        self.findings
            .iter()
            .filter(|finding| finding.severity == severity)
            .collect()
    }
}
