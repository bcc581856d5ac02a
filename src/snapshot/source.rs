use serde_json::{Map, Value};

use super::SnapshotError;

/// A value contributed by a source, placed at `path` in the snapshot.
///
/// An empty path means the value is a whole document to merge at the root.
#[derive(Debug, Clone)]
pub struct SnapshotEntry {
    pub path: Vec<String>,
    pub value: Value,
}

impl SnapshotEntry {
    pub fn root(map: Map<String, Value>) -> Self {
        Self {
            path: Vec::new(),
            value: Value::Object(map),
        }
    }

    pub fn at_path(path: Vec<String>, value: Value) -> Self {
        Self { path, value }
    }
}

pub trait SnapshotSource: Send + Sync + std::fmt::Debug {
    fn entries(&self) -> Result<Vec<SnapshotEntry>, SnapshotError>;
}

/// An in-memory document, typically the command already materialized by the host.
#[derive(Debug, Clone)]
pub struct ValueSource {
    value: Value,
}

impl ValueSource {
    pub fn new(value: Value) -> Self {
        Self { value }
    }
}

impl SnapshotSource for ValueSource {
    fn entries(&self) -> Result<Vec<SnapshotEntry>, SnapshotError> {
        match &self.value {
            Value::Object(map) => Ok(vec![SnapshotEntry::root(map.clone())]),
            _ => Err(SnapshotError::NotAnObject("<inline value>".to_string())),
        }
    }
}

pub fn merge_at_path(map: &mut Map<String, Value>, path: &[String], value: Value) {
    let Some((first, rest)) = path.split_first() else {
        if let Value::Object(overlay) = value {
            deep_merge(map, overlay);
        }
        return;
    };

    if rest.is_empty() {
        match (map.get_mut(first), value) {
            (Some(Value::Object(base)), Value::Object(overlay)) => {
                deep_merge(base, overlay);
            }
            (_, value) => {
                map.insert(first.clone(), value);
            }
        }
        return;
    }

    if !matches!(map.get(first), Some(Value::Object(_))) {
        map.insert(first.clone(), Value::Object(Map::new()));
    }

    if let Some(Value::Object(nested)) = map.get_mut(first) {
        merge_at_path(nested, rest, value);
    }
}

/// Objects merge recursively; any other value, arrays included, replaces.
pub fn deep_merge(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        match (base.get_mut(&key), value) {
            (Some(Value::Object(base_map)), Value::Object(overlay_map)) => {
                deep_merge(base_map, overlay_map);
            }
            (_, value) => {
                base.insert(key, value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_deep_merge_nested_objects() {
        let mut base = object(json!({
            "configurations": { "flume-env": { "flume_user": "flume", "content": "x" } }
        }));
        deep_merge(
            &mut base,
            object(json!({ "configurations": { "flume-env": { "flume_user": "svc" } } })),
        );

        assert_eq!(base["configurations"]["flume-env"]["flume_user"], "svc");
        assert_eq!(base["configurations"]["flume-env"]["content"], "x");
    }

    #[test]
    fn test_deep_merge_replaces_arrays() {
        let mut base = object(json!({ "hosts": ["a", "b"] }));
        deep_merge(&mut base, object(json!({ "hosts": ["c"] })));

        assert_eq!(base["hosts"], json!(["c"]));
    }

    #[test]
    fn test_merge_at_path_creates_intermediate_objects() {
        let mut map = Map::new();
        merge_at_path(
            &mut map,
            &["hostLevelParams".to_string(), "stack_version".to_string()],
            json!("2.3"),
        );

        assert_eq!(map["hostLevelParams"]["stack_version"], "2.3");
    }

    #[test]
    fn test_merge_at_path_replaces_scalar_intermediate() {
        let mut map = object(json!({ "commandParams": "oops" }));
        merge_at_path(
            &mut map,
            &["commandParams".to_string(), "flume_handler".to_string()],
            json!("a1"),
        );

        assert_eq!(map["commandParams"]["flume_handler"], "a1");
    }

    #[test]
    fn test_value_source_rejects_non_object() {
        let source = ValueSource::new(json!([1, 2]));
        assert!(matches!(
            source.entries(),
            Err(SnapshotError::NotAnObject(_))
        ));
    }
}
