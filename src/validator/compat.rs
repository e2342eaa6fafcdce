//! Type compatibility rules between user values and expected types

use crate::document::Tag;

const STRING_TAGS: &[Tag] = &[Tag::Str];
const INTEGER_TAGS: &[Tag] = &[Tag::Int];
const NUMBER_TAGS: &[Tag] = &[Tag::Int, Tag::Float];
const BOOLEAN_TAGS: &[Tag] = &[Tag::Bool];
const NULL_TAGS: &[Tag] = &[Tag::Null];
const ARRAY_TAGS: &[Tag] = &[Tag::Seq];
const OBJECT_TAGS: &[Tag] = &[Tag::Map];

/// Check whether a user tag is compatible with an expected tag
///
/// Identical tags match, and ints and floats are interchangeable.
#[must_use]
pub fn compatible(user: &Tag, expected: &Tag) -> bool {
    user == expected || (user.is_numeric() && expected.is_numeric())
}

/// Document tags accepted for a JSON Schema type name
#[must_use]
pub fn schema_type_tags(schema_type: &str) -> &'static [Tag] {
    match schema_type {
        "string" => STRING_TAGS,
        "integer" => INTEGER_TAGS,
        "number" => NUMBER_TAGS,
        "boolean" => BOOLEAN_TAGS,
        "null" => NULL_TAGS,
        "array" => ARRAY_TAGS,
        "object" => OBJECT_TAGS,
        _ => &[],
    }
}

/// Check a user tag against a set of schema type names
///
/// Returns whether any allowed tag is compatible, together with the full
/// list of allowed tags for error messages.
#[must_use]
pub fn compatible_with_schema(user: &Tag, schema_types: &[String]) -> (bool, Vec<Tag>) {
    let allowed: Vec<Tag> = schema_types
        .iter()
        .flat_map(|schema_type| schema_type_tags(schema_type).iter().cloned())
        .collect();
    let ok = allowed.iter().any(|tag| compatible(user, tag));
    (ok, allowed)
}

/// Whether `path` names a resource quantity such as `resources.limits.cpu`
///
/// Quantities may be written as strings with units (`500m`, `1Gi`) or as
/// bare numbers.
#[must_use]
pub fn is_quantity_path(path: &str) -> bool {
    let segments: Vec<&str> = path.split('.').collect();
    match segments.as_slice() {
        [.., "resources", "limits" | "requests", _leaf] => true,
        _ => false,
    }
}

/// Whether one tag is a string and the other an int or float
#[must_use]
pub fn is_string_numeric_pair(a: &Tag, b: &Tag) -> bool {
    (*a == Tag::Str && b.is_numeric()) || (*b == Tag::Str && a.is_numeric())
}

/// Format tags as "a", "a or b" or "a, b, or c", without duplicates
#[must_use]
pub fn friendly_types(tags: &[Tag]) -> String {
    let mut unique: Vec<&str> = Vec::new();
    for tag in tags {
        let name = tag.friendly_name();
        if !unique.contains(&name) {
            unique.push(name);
        }
    }

    match unique.as_slice() {
        [] => "unknown".to_owned(),
        [only] => (*only).to_owned(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}
