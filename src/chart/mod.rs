//! Chart loading
//!
//! Resolves a chart reference to its name, version, defaults tree, optional
//! values schema and the defaults of every bundled subchart.

pub mod loader;
pub mod metadata;

pub use loader::load_local;
pub use metadata::{ChartMetadata, Dependency};

use crate::document::Node;
use crate::error::CheckError;
use crate::system::System;
use crate::utils::path::{expand_home, is_local_reference};
use crate::validator::SubchartDefaults;
use tracing::warn;

/// A loaded chart, ready for validation
#[derive(Debug, Clone)]
pub struct ResolvedChart {
    pub name: String,
    pub version: String,
    /// Parsed `values.yaml`, an empty mapping when absent
    pub defaults: Node,
    /// Raw `values.schema.json` bytes
    pub schema: Option<Vec<u8>>,
    pub subcharts: SubchartDefaults,
    /// Values keys of `.tgz` subcharts, whose defaults are not loaded
    pub packaged_subcharts: Vec<String>,
}

/// Resolve a chart reference
///
/// Only local chart directories are supported. `version`, when given, is
/// compared with the version the chart declares.
///
/// # Errors
///
/// Returns an error if:
/// - The reference names a repository or OCI chart
/// - The chart directory cannot be loaded
#[inline]
pub fn resolve(
    system: &dyn System,
    reference: &str,
    version: Option<&str>,
) -> Result<ResolvedChart, CheckError> {
    if !is_local_reference(system, reference) {
        return Err(CheckError::chart(format!(
            "Chart {reference:?} is not a local directory; pull or unpack it first"
        )));
    }

    let mut path = expand_home(system, reference)?;
    if path.is_relative() {
        let cwd = system
            .current_dir()
            .map_err(|e| CheckError::chart(format!("Cannot read current directory: {e}")))?;
        path = cwd.join(path);
    }
    let chart = load_local(system, &path)?;

    if let Some(wanted) = version {
        if wanted != chart.version {
            warn!(
                chart = %chart.name,
                declared = %chart.version,
                requested = wanted,
                "local chart version differs from requested version"
            );
        }
    }
    Ok(chart)
}
