//! `Chart.yaml` metadata

use serde::{Deserialize, Deserializer};

/// The subset of `Chart.yaml` the checker reads
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ChartMetadata {
    pub name: String,
    #[serde(default, deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// One entry of the `dependencies` list
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    #[serde(default)]
    pub alias: Option<String>,
}

impl ChartMetadata {
    /// Key under which a subchart's values live in the parent's values
    ///
    /// This is the alias declared for the subchart in `dependencies`, or its
    /// own name.
    #[must_use]
    pub fn values_key<'a>(&'a self, subchart: &'a str) -> &'a str {
        self.dependencies
            .iter()
            .find(|dep| dep.name == subchart)
            .and_then(|dep| dep.alias.as_deref())
            .filter(|alias| !alias.is_empty())
            .unwrap_or(subchart)
    }
}

/// Accept `version: 1.2` as well as `version: "1.2.0"`
fn scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_yaml::Value::deserialize(deserializer)?;
    match value {
        serde_yaml::Value::String(text) => Ok(text),
        serde_yaml::Value::Number(number) => Ok(number.to_string()),
        serde_yaml::Value::Bool(flag) => Ok(flag.to_string()),
        serde_yaml::Value::Null => Ok(String::new()),
        _ => Err(serde::de::Error::custom("version must be a scalar")),
    }
}
