//! Error types for the `.reg` format layer
//!
//! Provides error handling for:
//! - Parse operations (bytes → Snapshot)
//! - Serialize operations (Snapshot → file)

use std::path::PathBuf;

use crate::HEADER;

/// Errors while reading and parsing a `.reg` file
///
/// Every variant is fatal to the whole parse. Malformed value lines are not
/// errors; they are skipped and reported as diagnostics.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// Bytes are neither valid UTF-16 nor valid UTF-8
    #[error("content is neither valid UTF-16 nor UTF-8: {0}")]
    Decode(String),

    /// First line does not carry the format marker
    #[error("invalid .reg header: expected '{}', found '{found}'", HEADER)]
    InvalidHeader {
        /// First line of the input, as decoded
        found: String,
    },

    /// Input exceeds the configured size limit
    #[error("file too large: more than {max} bytes (read {size})")]
    TooLarge {
        /// Bytes read before giving up; at most `max + 1`
        size: u64,
        /// Configured limit
        max: u64,
    },

    /// IO error during file read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File being read
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create header error from the offending first line
    pub fn invalid_header(found: impl Into<String>) -> Self {
        Self::InvalidHeader {
            found: found.into(),
        }
    }
}

/// Errors while writing a `.reg` file
#[derive(Debug, thiserror::Error)]
pub enum SerializeError {
    /// Destination could not be created or written
    #[error("io error writing {path}: {source}")]
    Io {
        /// Destination path
        path: PathBuf,
        /// Underlying failure
        #[source]
        source: std::io::Error,
    },
}

impl SerializeError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Combined format layer error
#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    /// Reading or parsing failed
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// Writing failed
    #[error("serialize error: {0}")]
    Serialize(#[from] SerializeError),
}

/// Result type alias for format operations
pub type FormatResult<T> = Result<T, FormatError>;
