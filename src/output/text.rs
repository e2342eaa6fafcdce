//! Human-readable report

use crate::model::ValidationResult;
use colored::Colorize as _;
use regex::Regex;
use std::io::{self, Write};
use std::sync::LazyLock;

static ANSI_ESCAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\x1b\[[0-9;]*[a-zA-Z]|\x1b\][^\x1b\x07]*\x07").expect("escape pattern is valid")
});

/// Strip terminal escape sequences and control characters
///
/// Newlines and tabs are kept. Values files and charts are untrusted input,
/// so every string they contribute goes through here before printing.
#[must_use]
pub fn sanitize(text: &str) -> String {
    ANSI_ESCAPE
        .replace_all(text, "")
        .chars()
        .filter(|&c| !c.is_control() || c == '\n' || c == '\t')
        .collect()
}

/// Write the text report
///
/// # Errors
///
/// Returns an error if:
/// - Writing to `out` fails
pub fn write_report(result: &ValidationResult, out: &mut dyn Write) -> io::Result<()> {
    let mut header = format!(
        "Validating {} against {}",
        sanitize(&result.values_file),
        sanitize(&result.chart_name)
    );
    if !result.chart_version.is_empty() {
        header.push_str(&format!(" ({})", sanitize(&result.chart_version)));
    }
    writeln!(out, "{}\n", header.bold())?;

    let errors = result.errors();
    let warnings = result.warnings();

    if !errors.is_empty() {
        writeln!(out, "{}", format!("ERRORS ({})", errors.len()).red().bold())?;
        for finding in &errors {
            write!(
                out,
                "  {}: {}",
                format!("line {}", finding.line).red(),
                sanitize(&finding.message)
            )?;
            if let Some(suggestion) = finding.suggestion.as_deref() {
                write!(
                    out,
                    "{}",
                    format!(" (did you mean {:?}?)", sanitize(suggestion)).yellow()
                )?;
            }
            writeln!(out)?;
        }
        writeln!(out)?;
    }

    if !warnings.is_empty() {
        writeln!(out, "{}", format!("WARNINGS ({})", warnings.len()).yellow().bold())?;
        for finding in &warnings {
            writeln!(
                out,
                "  {}: {}",
                format!("line {}", finding.line).yellow(),
                sanitize(&finding.message)
            )?;
        }
        writeln!(out)?;
    }

    if errors.is_empty() && warnings.is_empty() {
        writeln!(out, "{}", "No issues found.".green().bold())
    } else {
        writeln!(
            out,
            "{}",
            format!("Summary: {} error(s), {} warning(s)", errors.len(), warnings.len()).bold()
        )
    }
}
