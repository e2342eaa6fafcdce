//! File system utility functions

use crate::error::CheckError;
use crate::system::System;
use std::path::Path;

/// Read a text file, refusing files larger than `max_bytes`
///
/// # Errors
///
/// Returns an error if:
/// - The file does not exist or cannot be read
/// - The file is larger than `max_bytes`
pub fn read_limited(system: &dyn System, path: &Path, max_bytes: u64) -> Result<String, CheckError> {
    let size = system.file_size(path).map_err(|e| {
        CheckError::document(format!("reading {}: {e}", path.display()))
    })?;
    if size > max_bytes {
        return Err(CheckError::document(format!(
            "{} is too large ({}, max {})",
            path.display(),
            format_file_size(size),
            format_file_size(max_bytes)
        )));
    }
    system
        .read_to_string(path)
        .map_err(|e| CheckError::document(format!("reading {}: {e}", path.display())))
}

/// Get human-readable file size
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "display only")]
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_owned();
    }

    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= THRESHOLD && unit_index < UNITS.len() - 1 {
        size /= THRESHOLD;
        unit_index += 1;
    }

    if unit_index == 0 {
        format!("{} {}", bytes, UNITS[unit_index])
    } else {
        format!("{:.1} {}", size, UNITS[unit_index])
    }
}
