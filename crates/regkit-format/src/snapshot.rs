//! In-memory form of a parsed `.reg` file
//!
//! A [`Snapshot`] maps section paths to value names to raw literal text.
//! Literals are kept exactly as written; they are never decoded.

use indexmap::IndexMap;
use serde::Serialize;

use crate::writer;

/// Ordered section → value-name → literal mapping
///
/// Insertion order of sections and of names within a section is the order
/// they were first seen, and is the order they are written back out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Snapshot {
    sections: IndexMap<String, IndexMap<String, String>>,
}

/// One `(section, name, literal)` triple borrowed from a [`Snapshot`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotEntry<'a> {
    /// Section path
    pub section: &'a str,
    /// Value name
    pub name: &'a str,
    /// Literal text
    pub literal: &'a str,
}

impl Snapshot {
    /// Create empty snapshot
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a section, keeping any values it already holds
    pub fn open_section(&mut self, path: impl Into<String>) {
        self.sections.entry(path.into()).or_default();
    }

    /// Record a literal; a repeated name replaces the earlier literal
    ///
    /// Returns the replaced literal, if any.
    pub fn insert(
        &mut self,
        section: impl Into<String>,
        name: impl Into<String>,
        literal: impl Into<String>,
    ) -> Option<String> {
        self.sections
            .entry(section.into())
            .or_default()
            .insert(name.into(), literal.into())
    }

    /// Builder form of [`Snapshot::insert`]
    #[inline]
    #[must_use]
    pub fn with_entry(
        mut self,
        section: impl Into<String>,
        name: impl Into<String>,
        literal: impl Into<String>,
    ) -> Self {
        self.insert(section, name, literal);
        self
    }

    /// Literal for a value
    #[must_use]
    pub fn get(&self, section: &str, name: &str) -> Option<&str> {
        self.sections
            .get(section)
            .and_then(|values| values.get(name))
            .map(String::as_str)
    }

    /// Values recorded for a section
    #[inline]
    #[must_use]
    pub fn values(&self, section: &str) -> Option<&IndexMap<String, String>> {
        self.sections.get(section)
    }

    /// Sections in capture order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IndexMap<String, String>)> {
        self.sections
            .iter()
            .map(|(path, values)| (path.as_str(), values))
    }

    /// Section paths in capture order
    pub fn section_paths(&self) -> impl Iterator<Item = &str> {
        self.sections.keys().map(String::as_str)
    }

    /// Every entry, section by section, in capture order
    pub fn entries(&self) -> impl Iterator<Item = SnapshotEntry<'_>> {
        self.sections.iter().flat_map(|(section, values)| {
            values.iter().map(move |(name, literal)| SnapshotEntry {
                section,
                name,
                literal,
            })
        })
    }

    /// Number of sections
    #[inline]
    #[must_use]
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    /// Number of values across all sections
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.sections.values().map(IndexMap::len).sum()
    }

    /// Whether no section was captured
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Serialize using the snapshot's own literals
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        writer::write(self, |section, name| {
            self.get(section, name).map(str::to_owned)
        })
    }
}
