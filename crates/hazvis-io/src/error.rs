//! Error types for file I/O.
//!
//! Every reader and writer in this crate returns [`IoResult`]. Raster
//! construction errors from `hazvis-core` pass through unchanged so callers
//! see the underlying cause.

use std::io;
use std::path::Path;

use thiserror::Error;

/// File I/O error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Underlying file system error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Image decoding error.
    #[error("decode error: {0}")]
    Decode(String),

    /// Image encoding error.
    #[error("encode error: {0}")]
    Encode(String),

    /// Malformed text in a geometry or coordinates file.
    #[error("parse error at {path}:{line}: {message}")]
    Parse {
        /// File being parsed.
        path: String,
        /// One-based line number.
        line: usize,
        /// What went wrong.
        message: String,
    },

    /// File stores its data in a layout this crate does not read.
    #[error("unsupported format: {0}")]
    Unsupported(String),

    /// Raster construction or validation failure.
    #[error(transparent)]
    Core(#[from] hazvis_core::Error),
}

impl IoError {
    /// Builds a [`IoError::Parse`] with file and line context.
    #[inline]
    pub fn parse(path: &Path, line: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.display().to_string(),
            line,
            message: message.into(),
        }
    }
}

/// Result type for file I/O.
pub type IoResult<T> = Result<T, IoError>;
