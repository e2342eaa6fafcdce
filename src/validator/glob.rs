//! Ignore-pattern matching over dot-paths
//!
//! `*` matches exactly one segment and `**` matches zero or more segments,
//! anywhere in the pattern. Literal segments compare case-sensitively.

/// Check whether `path` matches the glob `pattern`
#[must_use]
pub fn matches(pattern: &str, path: &str) -> bool {
    if pattern == path {
        return true;
    }
    let pattern: Vec<&str> = pattern.split('.').collect();
    let path: Vec<&str> = path.split('.').collect();
    match_segments(&pattern, &path)
}

/// Check whether `path` matches any of `patterns`
#[must_use]
pub fn is_ignored<S: AsRef<str>>(path: &str, patterns: &[S]) -> bool {
    patterns
        .iter()
        .any(|pattern| matches(pattern.as_ref(), path))
}

fn match_segments(pattern: &[&str], path: &[&str]) -> bool {
    match pattern.split_first() {
        None => path.is_empty(),
        Some((&"**", rest)) => (0..=path.len()).any(|skip| match_segments(rest, &path[skip..])),
        Some((&segment, rest)) => match path.split_first() {
            Some((&head, tail)) if segment == "*" || segment == head => match_segments(rest, tail),
            _ => false,
        },
    }
}
