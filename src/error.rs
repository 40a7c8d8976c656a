//! Error type shared by the fixture generators.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading fonts or persisting fixtures.
///
/// Rendering itself cannot fail; every variant here comes from the file system or from one
/// of the encoders.
#[derive(Debug, Error)]
pub enum FixtureError {
    /// A file or directory could not be read or written.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        /// Path involved in the failed operation.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The rendered page could not be encoded.
    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    /// The sidecar record could not be serialized.
    #[error("record serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A font file exists but could not be parsed.
    #[error("failed to load font {}: {message}", path.display())]
    Font {
        /// Font file that was rejected.
        path: PathBuf,
        /// Human-readable reason.
        message: String,
    },
}

impl FixtureError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FixtureError>;
