//! Bridge from document trees to generic JSON values

use crate::document::node::{Node, NodeKind, Tag};
use crate::error::CheckError;
use serde_json::{Map, Number, Value};

impl Node {
    /// Convert this tree to a `serde_json::Value` for schema evaluation
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - An integer does not fit in 64 bits
    /// - A float is not finite (`.inf`, `.nan`), which JSON cannot represent
    /// - A boolean-tagged scalar is neither `true` nor `false`
    pub fn to_json(&self) -> Result<Value, CheckError> {
        match self.kind {
            NodeKind::Mapping(ref entries) => {
                let mut map = Map::new();
                for entry in entries {
                    map.insert(entry.key.clone(), entry.value.to_json()?);
                }
                Ok(Value::Object(map))
            }
            NodeKind::Sequence(ref items) => items
                .iter()
                .map(Self::to_json)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::Array),
            NodeKind::Scalar(ref literal) => scalar_to_json(literal, &self.tag, self.line),
        }
    }
}

fn scalar_to_json(literal: &str, tag: &Tag, line: usize) -> Result<Value, CheckError> {
    match *tag {
        Tag::Null => Ok(Value::Null),
        Tag::Bool => match literal.to_ascii_lowercase().as_str() {
            "true" => Ok(Value::Bool(true)),
            "false" => Ok(Value::Bool(false)),
            _ => Err(CheckError::conversion(format!(
                "line {line}: {literal:?} is not a boolean"
            ))),
        },
        Tag::Int => parse_int(literal)
            .map(Value::Number)
            .ok_or_else(|| {
                CheckError::conversion(format!(
                    "line {line}: integer {literal:?} cannot be represented as JSON"
                ))
            }),
        Tag::Float => parse_float(literal)
            .and_then(Number::from_f64)
            .map(Value::Number)
            .ok_or_else(|| {
                CheckError::conversion(format!(
                    "line {line}: float {literal:?} cannot be represented as JSON"
                ))
            }),
        Tag::Str | Tag::Seq | Tag::Map | Tag::Custom(_) => Ok(Value::String(literal.to_owned())),
    }
}

fn parse_int(literal: &str) -> Option<Number> {
    if let Some(hex) = literal.strip_prefix("0x") {
        return u64::from_str_radix(hex, 16).ok().map(Number::from);
    }
    if let Some(octal) = literal.strip_prefix("0o") {
        return u64::from_str_radix(octal, 8).ok().map(Number::from);
    }
    let digits = literal.strip_prefix('+').unwrap_or(literal);
    if let Ok(value) = digits.parse::<i64>() {
        return Some(Number::from(value));
    }
    digits.parse::<u64>().ok().map(Number::from)
}

fn parse_float(literal: &str) -> Option<f64> {
    let unsigned = literal.trim_start_matches(['-', '+']);
    match unsigned {
        ".inf" | ".Inf" | ".INF" => Some(f64::INFINITY),
        ".nan" | ".NaN" | ".NAN" => Some(f64::NAN),
        _ => literal.parse::<f64>().ok(),
    }
}
