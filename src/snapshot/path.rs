//! Slash-separated path lookups into a snapshot document.
//!
//! Paths look like `/hostLevelParams/stack_name`; the leading slash is optional.

use serde_json::{Map, Value};

use super::SnapshotError;

/// Splits a path into its segments, rejecting empty segments.
pub fn parse_path(path: &str) -> Result<Vec<&str>, SnapshotError> {
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let parts: Vec<&str> = trimmed.split('/').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return Err(SnapshotError::InvalidPath(path.to_string()));
    }
    Ok(parts)
}

/// Walks `path` from `root`, returning `None` if any segment is missing or
/// an intermediate value is not an object.
pub fn lookup_path<'a>(
    root: &'a Map<String, Value>,
    path: &str,
) -> Result<Option<&'a Value>, SnapshotError> {
    let parts = parse_path(path)?;

    let Some(mut current) = root.get(parts[0]) else {
        return Ok(None);
    };
    for part in &parts[1..] {
        match current.as_object().and_then(|m| m.get(*part)) {
            Some(next) => current = next,
            None => return Ok(None),
        }
    }

    Ok(Some(current))
}

/// Renders a scalar as text the way the host renders it for scripts.
///
/// Returns `None` for objects, arrays and null.
pub fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}
