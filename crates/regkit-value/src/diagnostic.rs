//! Structured diagnostics returned alongside operation results
//!
//! Operations never print. They hand back a list of [`Diagnostic`]s and the
//! caller decides how to surface them.

use serde::Serialize;
use std::fmt::{self, Display, Formatter};

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note
    Info,
    /// Something was skipped or could not be confirmed
    Warning,
    /// A failure localized to one item
    Error,
}

impl Display for Severity {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

/// Where a diagnostic applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Location {
    /// Whole input
    File,
    /// 1-based line number in the input text
    Line(usize),
    /// A section
    Section(String),
    /// A single value in a section
    Entry {
        /// Section path
        section: String,
        /// Value name
        name: String,
    },
}

impl Display for Location {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => f.write_str("file"),
            Self::Line(line) => write!(f, "line {line}"),
            Self::Section(section) => write!(f, "[{section}]"),
            Self::Entry { section, name } => write!(f, "[{section}] \"{name}\""),
        }
    }
}

/// One diagnostic message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Severity
    pub severity: Severity,
    /// Location
    pub location: Location,
    /// Human-readable message
    pub message: String,
}

impl Diagnostic {
    /// Create new diagnostic
    #[inline]
    #[must_use]
    pub fn new(severity: Severity, location: Location, message: impl Into<String>) -> Self {
        Self {
            severity,
            location,
            message: message.into(),
        }
    }

    /// Informational diagnostic
    #[inline]
    #[must_use]
    pub fn info(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, location, message)
    }

    /// Warning diagnostic
    #[inline]
    #[must_use]
    pub fn warning(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, location, message)
    }

    /// Error diagnostic
    #[inline]
    #[must_use]
    pub fn error(location: Location, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, location, message)
    }

    /// Entry location shorthand
    #[inline]
    #[must_use]
    pub fn entry(section: &str, name: &str) -> Location {
        Location::Entry {
            section: section.to_string(),
            name: name.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.severity, self.location, self.message)
    }
}
