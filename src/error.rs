use crate::snapshot::SnapshotError;
use thiserror::Error;

/// Top-level error type for the flume-params library.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    #[error("failed to render parameters: {0}")]
    Export(#[source] serde_json::Error),
}
