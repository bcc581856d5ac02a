use serde_json::Value;

use super::source::{SnapshotEntry, SnapshotSource};
use super::SnapshotError;

/// Overrides snapshot values from environment variables.
///
/// `FLUME_PARAMS__hostLevelParams__stack_version=2.3` sets
/// `/hostLevelParams/stack_version`. Segment case is kept as written since
/// snapshot sections are camelCase. Values stay text: the resolver reads
/// strings, so `2.10` or `007` must reach it as written.
#[derive(Debug, Clone)]
pub struct EnvSource {
    prefix: String,
    separator: String,
    vars: Option<Vec<(String, String)>>,
}

impl EnvSource {
    pub fn new(prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        let separator = separator.into();
        assert!(!separator.is_empty(), "separator must not be empty");
        Self {
            prefix: prefix.into(),
            separator,
            vars: None,
        }
    }

    /// Reads from the given variables instead of the process environment.
    pub fn with_vars(mut self, vars: impl IntoIterator<Item = (String, String)>) -> Self {
        self.vars = Some(vars.into_iter().collect());
        self
    }

    fn entries_from(&self, vars: impl Iterator<Item = (String, String)>) -> Vec<SnapshotEntry> {
        let prefix_with_sep = format!("{}{}", self.prefix, self.separator);
        let mut entries = Vec::new();

        for (key, value) in vars {
            let Some(path_str) = key.strip_prefix(&prefix_with_sep) else {
                continue;
            };
            if path_str.is_empty() {
                continue;
            }

            let path: Vec<String> = path_str
                .split(&self.separator)
                .map(str::to_string)
                .collect();
            if path.iter().any(String::is_empty) {
                tracing::warn!(variable = %key, "ignoring override with empty path segment");
                continue;
            }

            tracing::debug!(path = %path.join("/"), "snapshot override from environment");
            entries.push(SnapshotEntry::at_path(path, Value::String(value)));
        }

        entries
    }
}

impl SnapshotSource for EnvSource {
    fn entries(&self) -> Result<Vec<SnapshotEntry>, SnapshotError> {
        let entries = match &self.vars {
            Some(vars) => self.entries_from(vars.iter().cloned()),
            None => self.entries_from(std::env::vars()),
        };
        Ok(entries)
    }
}
