use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SnapshotError {
    #[error("required snapshot file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("failed to read snapshot file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse snapshot file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("failed to parse override file '{path}': {source}")]
    TomlError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("snapshot root must be an object: {0}")]
    NotAnObject(String),

    #[error("invalid snapshot path: {0}")]
    InvalidPath(String),

    #[error("required key not found: {path}")]
    MissingKey { path: String },

    #[error("value at {path} is not {expected}")]
    TypeMismatch {
        path: String,
        expected: &'static str,
    },
}
