//! Rollback generation
//!
//! For every value named in an input snapshot, the live value is captured
//! and encoded. Values that cannot be confirmed present are marked for
//! deletion, so applying the rollback after the input file removes
//! whatever the input added.

use std::fmt::{self, Display, Formatter};
use std::path::Path;

use indexmap::IndexMap;
use regkit_format::{write_file, RegWriter, Snapshot, DELETE_MARKER};
use regkit_store::{ReadOutcome, StoreReader};
use regkit_value::{encode, Diagnostic, KeyPath, Location, RegistryValue};
use serde::Serialize;

use crate::error::RollbackError;

/// What the rollback does with one value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RollbackEntry {
    /// Restore this literal
    Restore(String),
    /// Remove the value
    Delete,
}

impl RollbackEntry {
    /// Literal to restore, `None` for deletion
    #[inline]
    #[must_use]
    pub fn literal(&self) -> Option<&str> {
        match self {
            Self::Restore(literal) => Some(literal),
            Self::Delete => None,
        }
    }

    /// Text written for this entry
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.literal().unwrap_or(DELETE_MARKER)
    }
}

impl Display for RollbackEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of restore/delete entries over exactly the input's key set
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RollbackSnapshot {
    sections: IndexMap<String, IndexMap<String, RollbackEntry>>,
}

impl RollbackSnapshot {
    /// Entry for a value
    #[must_use]
    pub fn get(&self, section: &str, name: &str) -> Option<&RollbackEntry> {
        self.sections.get(section)?.get(name)
    }

    /// Sections in input order
    pub fn sections(&self) -> impl Iterator<Item = (&str, &IndexMap<String, RollbackEntry>)> {
        self.sections
            .iter()
            .map(|(path, entries)| (path.as_str(), entries))
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

    /// Number of values marked for deletion
    #[must_use]
    pub fn deletion_count(&self) -> usize {
        self.sections
            .values()
            .flat_map(IndexMap::values)
            .filter(|entry| **entry == RollbackEntry::Delete)
            .count()
    }

    /// Whether the sections and names equal those of `snapshot`
    #[must_use]
    pub fn covers_exactly(&self, snapshot: &Snapshot) -> bool {
        self.section_count() == snapshot.section_count()
            && snapshot.sections().all(|(path, values)| {
                self.sections.get(path).is_some_and(|entries| {
                    entries.len() == values.len()
                        && values.keys().all(|name| entries.contains_key(name))
                })
            })
    }

    /// Serialize to `.reg` text
    #[must_use]
    pub fn to_text(&self) -> String {
        self.writer().into_text()
    }

    /// Serialize to UTF-16LE `.reg` bytes
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        self.writer().into_bytes()
    }

    /// Write the rollback file to `path`
    ///
    /// # Errors
    /// Returns [`RollbackError::Write`] if the destination cannot be written
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<(), RollbackError> {
        write_file(path, &self.to_bytes())?;
        Ok(())
    }

    fn writer(&self) -> RegWriter {
        let mut writer = RegWriter::new();
        for (path, entries) in &self.sections {
            writer.section(
                path,
                entries
                    .iter()
                    .map(|(name, entry)| (name.as_str(), entry.literal())),
            );
        }
        writer
    }
}

/// Rollback snapshot plus the diagnostics collected while building it
#[derive(Debug, Clone, Default)]
pub struct RollbackOutput {
    /// Generated rollback
    pub snapshot: RollbackSnapshot,
    /// Per-key read failures and notes
    pub diagnostics: Vec<Diagnostic>,
}

/// Builds rollback snapshots from live values
#[derive(Debug, Clone)]
pub struct RollbackGenerator<R> {
    reader: R,
}

impl<R: StoreReader> RollbackGenerator<R> {
    /// Create generator over `reader`
    #[inline]
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    /// Capture the live state of every value in `snapshot`
    ///
    /// # Errors
    /// Returns [`RollbackError::NoEntries`] if `snapshot` has no sections
    pub fn generate(&self, snapshot: &Snapshot) -> Result<RollbackOutput, RollbackError> {
        if snapshot.is_empty() {
            return Err(RollbackError::NoEntries);
        }

        let mut output = RollbackOutput::default();
        let mut unavailable_noted = false;

        for (section, values) in snapshot.sections() {
            let mut entries = IndexMap::with_capacity(values.len());
            for name in values.keys() {
                let read = match KeyPath::for_entry(section, name) {
                    Ok(path) => self.reader.read(&path),
                    Err(e) => ReadOutcome::Error(e.to_string()),
                };
                let entry = match read {
                    ReadOutcome::Found(value) => {
                        let literal = encode(&value);
                        if let RegistryValue::Unknown { tag, .. } = value {
                            tracing::warn!(%section, %name, tag, "live value has no regedit literal");
                            output.diagnostics.push(Diagnostic::warning(
                                Diagnostic::entry(section, name),
                                format!("value type {tag} cannot be restored by regedit: {literal}"),
                            ));
                        }
                        RollbackEntry::Restore(literal)
                    }
                    ReadOutcome::NotFound => RollbackEntry::Delete,
                    ReadOutcome::Error(reason) => {
                        tracing::warn!(%section, %name, %reason, "store read failed, marking for deletion");
                        output.diagnostics.push(Diagnostic::warning(
                            Diagnostic::entry(section, name),
                            format!("read failed, marked for deletion: {reason}"),
                        ));
                        RollbackEntry::Delete
                    }
                    ReadOutcome::Unsupported(reason) => {
                        if !unavailable_noted {
                            unavailable_noted = true;
                            output.diagnostics.push(Diagnostic::info(
                                Location::File,
                                format!("{reason}; rollback contains only deletion markers"),
                            ));
                        }
                        RollbackEntry::Delete
                    }
                };
                entries.insert(name.clone(), entry);
            }
            output.snapshot.sections.insert(section.to_string(), entries);
        }

        tracing::info!(
            sections = output.snapshot.section_count(),
            entries = output.snapshot.entry_count(),
            deletions = output.snapshot.deletion_count(),
            "rollback generated"
        );
        Ok(output)
    }

    /// Generate and write the rollback file to `path`
    ///
    /// # Errors
    /// - [`RollbackError::NoEntries`] if `snapshot` has no sections
    /// - [`RollbackError::Write`] if `path` cannot be written
    pub fn generate_to_file(
        &self,
        snapshot: &Snapshot,
        path: impl AsRef<Path>,
    ) -> Result<RollbackOutput, RollbackError> {
        let output = self.generate(snapshot)?;
        output.snapshot.write_to(path)?;
        Ok(output)
    }
}
