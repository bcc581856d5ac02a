//! File-based snapshot source.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use super::source::{SnapshotEntry, SnapshotSource};
use super::SnapshotError;

/// A snapshot source that loads a JSON command document or a TOML override file.
///
/// The format is chosen by extension: `.toml` is parsed as TOML, anything else
/// as JSON. Required files that don't exist cause an error; optional files that
/// don't exist are silently skipped.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
    required: bool,
}

impl FileSource {
    /// Creates a new file source.
    ///
    /// If `required` is true, the build will fail if the file doesn't exist.
    pub fn new(path: impl AsRef<Path>, required: bool) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            required,
        }
    }
}

impl SnapshotSource for FileSource {
    fn entries(&self) -> Result<Vec<SnapshotEntry>, SnapshotError> {
        match load_snapshot_file(&self.path, self.required)? {
            Some(map) => {
                tracing::debug!(path = %self.path.display(), keys = map.len(), "loaded snapshot file");
                Ok(vec![SnapshotEntry::root(map)])
            }
            None => {
                tracing::debug!(path = %self.path.display(), "optional snapshot file not found, skipping");
                Ok(vec![])
            }
        }
    }
}

/// Loads and parses a snapshot file.
///
/// Returns `Ok(None)` if the file doesn't exist and `required` is false.
fn load_snapshot_file(
    path: &Path,
    required: bool,
) -> Result<Option<Map<String, Value>>, SnapshotError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return if required {
                Err(SnapshotError::FileNotFound(path.to_path_buf()))
            } else {
                Ok(None)
            };
        }
        Err(e) => {
            return Err(SnapshotError::ReadError {
                path: path.to_path_buf(),
                source: e,
            })
        }
    };

    let value = if is_toml(path) {
        let table: toml::Table =
            toml::from_str(&contents).map_err(|e| SnapshotError::TomlError {
                path: path.to_path_buf(),
                source: e,
            })?;
        serde_json::to_value(table)
    } else {
        serde_json::from_str::<Value>(&contents)
    }
    .map_err(|e| SnapshotError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(SnapshotError::NotAnObject(path.display().to_string())),
    }
}

fn is_toml(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
}
