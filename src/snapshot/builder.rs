use std::path::Path;

use serde_json::{Map, Value};

use super::env::EnvSource;
use super::file::FileSource;
use super::source::{merge_at_path, SnapshotSource, ValueSource};
use super::{Snapshot, SnapshotError};

/// Builder for assembling a [`Snapshot`] from layered sources.
///
/// Sources are merged in registration order, with later sources overriding
/// earlier ones. Nested objects are merged recursively; other values
/// (including arrays) are replaced entirely.
///
/// ## Example
///
/// ```no_run
/// use flume_params::Snapshot;
///
/// let snapshot = Snapshot::builder()
///     .with_file("/var/lib/agent/data/command-42.json", true)
///     .with_file("/etc/flume-params/local.toml", false)
///     .with_env("FLUME_PARAMS", "__")
///     .build()?;
/// # Ok::<(), flume_params::SnapshotError>(())
/// ```
#[derive(Debug, Default)]
#[must_use = "builders do nothing until .build() is called"]
pub struct SnapshotBuilder {
    sources: Vec<Box<dyn SnapshotSource>>,
}

impl SnapshotBuilder {
    /// Adds a JSON command file or a `.toml` override file.
    ///
    /// If `required` is `true`, the build will fail if the file doesn't exist.
    /// Optional files that are missing are silently skipped.
    pub fn with_file(self, path: impl AsRef<Path>, required: bool) -> Self {
        self.with_source(FileSource::new(path, required))
    }

    /// Adds an already-materialized document. Its root must be an object.
    pub fn with_value(self, value: Value) -> Self {
        self.with_source(ValueSource::new(value))
    }

    /// Overrides values from environment variables with the given prefix.
    ///
    /// `<prefix><separator>a<separator>b=value` sets `/a/b`. Values are kept as
    /// strings exactly as written.
    pub fn with_env(self, prefix: impl Into<String>, separator: impl Into<String>) -> Self {
        self.with_source(EnvSource::new(prefix, separator))
    }

    /// Adds any other source.
    pub fn with_source(mut self, source: impl SnapshotSource + 'static) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// Loads and merges all sources into an immutable snapshot.
    pub fn build(self) -> Result<Snapshot, SnapshotError> {
        let mut merged = Map::new();

        for source in &self.sources {
            for entry in source.entries()? {
                merge_at_path(&mut merged, &entry.path, entry.value);
            }
        }

        tracing::debug!(
            sources = self.sources.len(),
            sections = merged.len(),
            "built configuration snapshot"
        );
        Ok(Snapshot::from_map(merged))
    }
}
