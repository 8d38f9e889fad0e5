//! Error types for regkit core
//!
//! Per-key read failures never surface here; they are folded into the
//! outcome or rollback entry for that key. These errors abort a whole
//! operation:
//! - Rollback with nothing to back up, or an unwritable destination
//! - Configuration that cannot be read or parsed

use std::path::PathBuf;

use regkit_format::{ParseError, SerializeError};

/// Rollback generation failure
#[derive(Debug, thiserror::Error)]
pub enum RollbackError {
    /// Input snapshot has no sections
    #[error("no entries to back up: the input contains no sections")]
    NoEntries,

    /// Destination could not be written
    #[error("failed to write rollback file: {0}")]
    Write(#[from] SerializeError),
}

/// Configuration loading failure
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("failed to read config {path}: {source}")]
    Io {
        /// Config path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config text is not valid TOML for [`crate::RegkitConfig`]
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create IO error with path context
    #[inline]
    #[must_use]
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Top-level regkit error
#[derive(Debug, thiserror::Error)]
pub enum RegkitError {
    /// Input could not be read or parsed
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Rollback failed
    #[error(transparent)]
    Rollback(#[from] RollbackError),

    /// Configuration failed
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl RegkitError {
    /// Whether the input file itself was rejected
    #[inline]
    #[must_use]
    pub fn is_parse_failure(&self) -> bool {
        matches!(self, Self::Parse(_))
    }
}

/// Result type for regkit core operations
pub type Result<T> = std::result::Result<T, RegkitError>;
