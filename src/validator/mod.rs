//! Validation engine
//!
//! Compares a user values tree with chart defaults and the optional schema.
//! The passes run in a fixed order (unknown keys, type mismatches, schema
//! constraints) and their findings are concatenated in that order.

pub mod compat;
pub mod constraints;
pub mod glob;
pub mod mismatch;
pub mod paths;
pub mod schema;
pub mod suggest;
pub mod unknown;

use crate::chart::ResolvedChart;
use crate::document::Node;
use crate::error::CheckError;
use crate::model::ValidationResult;
use constraints::check_schema;
use mismatch::{TypeScope, detect_type_mismatches};
use schema::{Schema, SchemaKeySet, SchemaTypeMap};
use std::collections::BTreeMap;
use tracing::debug;
use unknown::{KeyScope, detect_unknown_keys};

/// Subchart name (or alias) to that subchart's defaults tree
pub type SubchartDefaults = BTreeMap<String, Node>;

/// Run every check on one values tree
///
/// The caller is responsible for rejecting values documents whose root is
/// not a mapping.
///
/// # Errors
///
/// Returns an error if:
/// - The chart's schema is not valid JSON or cannot be compiled
/// - The values tree cannot be converted for schema evaluation
///
/// Malformed schemas only fail the run after the unknown-key and
/// type-mismatch passes have been computed.
pub fn validate(
    source: &str,
    user: &Node,
    chart: &ResolvedChart,
    ignore: &[String],
) -> Result<ValidationResult, CheckError> {
    let schema = Schema::parse(chart.schema.as_deref());
    let (schema_keys, schema_types) = match schema {
        Ok(Some(ref parsed)) => (parsed.keys(), parsed.types()),
        Ok(None) | Err(_) => (SchemaKeySet::new(), SchemaTypeMap::new()),
    };
    let index = paths::flatten(&chart.defaults);

    let key_scope = KeyScope {
        schema_keys: Some(&schema_keys),
        subcharts: Some(&chart.subcharts),
        ignore,
        index: Some(&index),
    };
    let mut findings = detect_unknown_keys(user, &chart.defaults, &key_scope, "");
    debug!(source, count = findings.len(), "unknown key pass complete");

    let type_scope = TypeScope {
        schema_types: Some(&schema_types),
        subcharts: Some(&chart.subcharts),
        ignore,
    };
    let mismatches = detect_type_mismatches(user, &chart.defaults, &type_scope, "");
    debug!(source, count = mismatches.len(), "type mismatch pass complete");
    findings.extend(mismatches);

    let schema = schema?;
    let constraint_findings = check_schema(user, schema.as_ref(), ignore, &schema_types)?;
    debug!(source, count = constraint_findings.len(), "schema pass complete");
    findings.extend(constraint_findings);

    Ok(ValidationResult {
        values_file: source.to_owned(),
        chart_name: chart.name.clone(),
        chart_version: chart.version.clone(),
        findings,
    })
}
