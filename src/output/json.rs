//! JSON report

use crate::model::{Finding, ValidationResult};
use serde::Serialize;
use std::io::{self, Write};

/// Serialized shape of one report
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonReport<'a> {
    pub values_file: &'a str,
    pub chart_name: &'a str,
    pub chart_version: &'a str,
    pub errors: Vec<JsonFinding<'a>>,
    pub warnings: Vec<JsonFinding<'a>>,
    pub error_count: usize,
    pub warning_count: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonFinding<'a> {
    pub line: usize,
    pub key_path: &'a str,
    pub message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<&'a str>,
}

impl<'a> From<&'a Finding> for JsonFinding<'a> {
    #[inline]
    fn from(finding: &'a Finding) -> Self {
        Self {
            line: finding.line,
            key_path: &finding.key_path,
            message: &finding.message,
            suggestion: finding.suggestion.as_deref(),
        }
    }
}

impl<'a> From<&'a ValidationResult> for JsonReport<'a> {
    fn from(result: &'a ValidationResult) -> Self {
        let errors: Vec<JsonFinding<'a>> = result.errors().into_iter().map(JsonFinding::from).collect();
        let warnings: Vec<JsonFinding<'a>> =
            result.warnings().into_iter().map(JsonFinding::from).collect();
        Self {
            values_file: &result.values_file,
            chart_name: &result.chart_name,
            chart_version: &result.chart_version,
            error_count: errors.len(),
            warning_count: warnings.len(),
            errors,
            warnings,
        }
    }
}

/// Write the report as pretty-printed JSON followed by a newline
///
/// # Errors
///
/// Returns an error if:
/// - Serialization or writing fails
pub fn write_report(result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
    let report = JsonReport::from(result);
    serde_json::to_writer_pretty(&mut *out, &report).map_err(io::Error::other)?;
    writeln!(out)
}
