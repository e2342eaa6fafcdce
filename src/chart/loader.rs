//! Local chart directory loader

use crate::chart::{ChartMetadata, ResolvedChart};
use crate::document::{Node, parse_mapping};
use crate::error::CheckError;
use crate::system::System;
use crate::validator::SubchartDefaults;
use std::path::Path;
use tracing::{debug, warn};

const CHART_FILE: &str = "Chart.yaml";
const VALUES_FILES: [&str; 2] = ["values.yaml", "values.yml"];
const SCHEMA_FILE: &str = "values.schema.json";
const SUBCHART_DIR: &str = "charts";

/// Load a chart from a directory
///
/// # Errors
///
/// Returns an error if:
/// - The directory or its `Chart.yaml` is missing or unreadable
/// - `Chart.yaml` or the chart's own values file cannot be parsed
pub fn load_local(system: &dyn System, path: &Path) -> Result<ResolvedChart, CheckError> {
    if !system.is_dir(path) {
        return Err(CheckError::chart(format!(
            "Chart directory not found: {}",
            path.display()
        )));
    }

    let metadata = read_metadata(system, path)?;
    let defaults = read_defaults(system, path)?;

    let schema_path = path.join(SCHEMA_FILE);
    let schema = if system.is_file(&schema_path) {
        Some(system.read(&schema_path).map_err(|e| {
            CheckError::chart(format!("reading {}: {e}", schema_path.display()))
        })?)
    } else {
        None
    };

    let (subcharts, packaged_subcharts) = read_subcharts(system, path, &metadata)?;
    debug!(
        chart = %metadata.name,
        version = %metadata.version,
        subcharts = subcharts.len(),
        packaged = packaged_subcharts.len(),
        has_schema = schema.is_some(),
        "chart loaded"
    );

    Ok(ResolvedChart {
        name: metadata.name,
        version: metadata.version,
        defaults,
        schema,
        subcharts,
        packaged_subcharts,
    })
}

fn read_metadata(system: &dyn System, dir: &Path) -> Result<ChartMetadata, CheckError> {
    let chart_file = dir.join(CHART_FILE);
    if !system.is_file(&chart_file) {
        return Err(CheckError::chart(format!(
            "{} has no {CHART_FILE}",
            dir.display()
        )));
    }

    let content = system
        .read_to_string(&chart_file)
        .map_err(|e| CheckError::chart(format!("reading {}: {e}", chart_file.display())))?;
    serde_yaml::from_str(&content)
        .map_err(|e| CheckError::chart(format!("parsing {}: {e}", chart_file.display())))
}

fn read_defaults(system: &dyn System, dir: &Path) -> Result<Node, CheckError> {
    let Some(values_path) = VALUES_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|candidate| system.is_file(candidate))
    else {
        return Ok(Node::empty_mapping());
    };

    let content = system
        .read_to_string(&values_path)
        .map_err(|e| CheckError::chart(format!("reading {}: {e}", values_path.display())))?;
    parse_mapping(&content, &values_path.display().to_string()).map_err(|e| {
        CheckError::chart(format!("parsing {}: {}", values_path.display(), e.message()))
    })
}

/// Load unpacked subcharts, and collect the values keys of packaged ones
fn read_subcharts(
    system: &dyn System,
    dir: &Path,
    metadata: &ChartMetadata,
) -> Result<(SubchartDefaults, Vec<String>), CheckError> {
    let mut subcharts = SubchartDefaults::new();
    let mut packaged = Vec::new();
    let charts_dir = dir.join(SUBCHART_DIR);
    if !system.is_dir(&charts_dir) {
        return Ok((subcharts, packaged));
    }

    let entries = system
        .read_dir(&charts_dir)
        .map_err(|e| CheckError::chart(format!("reading {}: {e}", charts_dir.display())))?;

    for entry in entries {
        if system.is_file(&entry) {
            if let Some(key) = archive_values_key(metadata, &entry) {
                warn!(
                    archive = %entry.display(),
                    key = %key,
                    "packaged subchart not loaded; keys under it will be reported as unknown until it is unpacked"
                );
                packaged.push(key);
            }
            continue;
        }
        if !system.is_file(&entry.join(CHART_FILE)) {
            continue;
        }

        let sub_meta = match read_metadata(system, &entry) {
            Ok(meta) => meta,
            Err(e) => {
                warn!(subchart = %entry.display(), error = %e, "subchart skipped");
                continue;
            }
        };
        match read_defaults(system, &entry) {
            Ok(defaults) => {
                let key = metadata.values_key(&sub_meta.name).to_owned();
                subcharts.insert(key, defaults);
            }
            Err(e) => {
                warn!(subchart = %sub_meta.name, error = %e, "subchart skipped");
            }
        }
    }
    Ok((subcharts, packaged))
}

/// Values key of a `<name>-<version>.tgz` subchart archive
///
/// The name is matched against the declared dependencies first, so that an
/// alias applies. Files with another extension yield `None`.
fn archive_values_key(metadata: &ChartMetadata, archive: &Path) -> Option<String> {
    if archive.extension().is_none_or(|ext| ext != "tgz") {
        return None;
    }
    let stem = archive.file_stem()?.to_str()?;
    let name = metadata
        .dependencies
        .iter()
        .map(|dep| dep.name.as_str())
        .filter(|name| {
            stem.strip_prefix(*name)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
        })
        .max_by_key(|name| name.len())
        .or_else(|| {
            stem.rsplit_once('-')
                .filter(|&(_, version)| version.starts_with(|c: char| c.is_ascii_digit()))
                .map(|(name, _)| name)
        })
        .unwrap_or(stem);
    Some(metadata.values_key(name).to_owned())
}
