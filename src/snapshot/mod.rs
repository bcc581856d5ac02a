//! The configuration snapshot supplied by the orchestration host.
//!
//! A snapshot is a read-only nested document, conventionally split into the
//! `configurations`, `hostLevelParams`, `clusterHostInfo` and `commandParams`
//! sections. It is built once per invocation and handed explicitly to
//! whatever needs it.

mod builder;
mod env;
mod error;
mod file;
mod path;
mod source;

pub use builder::SnapshotBuilder;
pub use env::EnvSource;
pub use error::SnapshotError;
pub use file::FileSource;
pub use source::{SnapshotEntry, SnapshotSource, ValueSource};

use serde_json::{Map, Value};

use path::{lookup_path, scalar_to_string};

/// An immutable configuration snapshot.
///
/// Lookups take slash-separated paths such as `/hostLevelParams/stack_name`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    root: Map<String, Value>,
}

impl Snapshot {
    /// Creates a new builder for layering snapshot sources.
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    /// Wraps an in-memory document. The root must be an object.
    pub fn from_value(value: Value) -> Result<Self, SnapshotError> {
        match value {
            Value::Object(map) => Ok(Self::from_map(map)),
            _ => Err(SnapshotError::NotAnObject("<inline value>".to_string())),
        }
    }

    pub(crate) fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    /// Returns the value at `path`, or `None` if any segment is missing.
    ///
    /// Malformed paths are treated as missing; use [`try_get`](Self::try_get)
    /// to have them reported.
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.try_get(path).ok().flatten()
    }

    /// Like [`get`](Self::get), but reports malformed paths.
    pub fn try_get(&self, path: &str) -> Result<Option<&Value>, SnapshotError> {
        lookup_path(&self.root, path)
    }

    /// Whether the snapshot carries the top-level key `name`.
    pub fn has_key(&self, name: &str) -> bool {
        self.root.contains_key(name)
    }

    /// Returns the scalar at `path` as text, or `None` if it is absent or not
    /// a scalar.
    pub fn optional_str(&self, path: &str) -> Option<String> {
        let value = self.get(path)?;
        let text = scalar_to_string(value);
        if text.is_none() {
            tracing::debug!(path, "ignoring non-scalar value");
        }
        text
    }

    /// Returns the scalar at `path` as text, or `fallback` if it is absent.
    pub fn default_str(&self, path: &str, fallback: &str) -> String {
        self.optional_str(path).unwrap_or_else(|| {
            tracing::debug!(path, fallback, "using default");
            fallback.to_string()
        })
    }

    /// Returns the scalar at `path` as text, failing if it is missing.
    pub fn require_str(&self, path: &str) -> Result<String, SnapshotError> {
        let value = self.try_get(path)?.ok_or_else(|| SnapshotError::MissingKey {
            path: path.to_string(),
        })?;
        scalar_to_string(value).ok_or_else(|| SnapshotError::TypeMismatch {
            path: path.to_string(),
            expected: "a scalar",
        })
    }

    /// Returns the list of strings at `path`, empty if it is absent.
    ///
    /// A bare string counts as a one-element list. Non-string entries are skipped.
    pub fn default_list(&self, path: &str) -> Vec<String> {
        match self.get(path) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(|item| item.as_str().map(str::to_string))
                .collect(),
            Some(Value::String(s)) => vec![s.clone()],
            Some(_) => {
                tracing::debug!(path, "ignoring non-list value");
                Vec::new()
            }
            None => Vec::new(),
        }
    }

    /// Returns the first entry of the list at `path`, if any.
    ///
    /// The entry is taken as it stands: a scalar is rendered as text, and a
    /// null or nested first entry selects nothing. Later entries are never
    /// consulted. A bare string counts as a one-element list.
    pub fn first_of(&self, path: &str) -> Option<String> {
        let first = match self.get(path)? {
            Value::Array(items) => items.first()?,
            single @ Value::String(_) => single,
            _ => {
                tracing::debug!(path, "ignoring non-list value");
                return None;
            }
        };
        scalar_to_string(first)
    }

    /// The raw document.
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.root
    }
}

impl TryFrom<Value> for Snapshot {
    type Error = SnapshotError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}
