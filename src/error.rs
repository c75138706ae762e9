//! Error types for building a course site.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using BuildError.
pub type Result<T> = std::result::Result<T, BuildError>;

/// Error returned by a [`crate::build::Transform`] implementation.
pub type TransformError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that abort a build.
///
/// Missing manifests and missing home files are not represented here; they
/// resolve to `None` at the node that owns them.
#[derive(Error, Debug)]
pub enum BuildError {
    /// The output root could not be reset or created.
    #[error("failed to prepare output root '{path}': {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest lists an entry that is neither a file nor a directory on disk.
    #[error("manifest entry '{name}' does not resolve to a file or directory: {path}")]
    MissingEntry { path: PathBuf, name: String },

    /// A mirrored output directory already existed.
    #[error("output directory already exists: {path}")]
    OutputCollision { path: PathBuf },

    /// Failed to create a mirrored output directory.
    #[error("failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A manifest line does not have the `name[: title]` shape.
    #[error("{path}:{line}: {reason}: {content:?}")]
    ManifestParse {
        path: PathBuf,
        line: usize,
        content: String,
        reason: &'static str,
    },

    /// Failed to read a source file.
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transform callback failed for a file.
    #[error("transform failed for '{path}': {source}")]
    Transform {
        path: PathBuf,
        #[source]
        source: TransformError,
    },

    /// Failed to write the order index.
    #[error("failed to write order index '{path}': {source}")]
    IndexWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl BuildError {
    /// Create a FileRead error.
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }

    /// Create an OutputRoot error.
    pub fn output_root(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::OutputRoot {
            path: path.into(),
            source,
        }
    }
}
