//! Reconciliation of a parsed snapshot against a live store
//!
//! Each `(section, name, literal)` triple is read from the store, the live
//! value is encoded to literal form, and the two trimmed literals are
//! compared as exact, case-sensitive text. A failure on one key never stops
//! the sweep.

use regkit_format::Snapshot;
use regkit_store::{ReadOutcome, StoreReader};
use regkit_value::{encode, Diagnostic, KeyPath};

use crate::config::{DisplayMarkers, RegkitConfig};
use crate::report::{ComparisonOutcome, ComparisonReport, OutcomeKind};

/// Compares declared literals with live values
#[derive(Debug, Clone)]
pub struct Reconciler<R> {
    reader: R,
    markers: DisplayMarkers,
}

impl<R: StoreReader> Reconciler<R> {
    /// Create with default markers
    #[must_use]
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            markers: DisplayMarkers::default(),
        }
    }

    /// Create with the markers from `config`
    #[must_use]
    pub fn from_config(reader: R, config: &RegkitConfig) -> Self {
        Self::new(reader).with_markers(config.markers.clone())
    }

    /// With display markers
    #[inline]
    #[must_use]
    pub fn with_markers(mut self, markers: DisplayMarkers) -> Self {
        self.markers = markers;
        self
    }

    /// Underlying reader
    #[inline]
    pub fn reader(&self) -> &R {
        &self.reader
    }

    /// Compare one declared value
    pub fn compare_entry(&self, section: &str, name: &str, literal: &str) -> ComparisonOutcome {
        let read = match KeyPath::for_entry(section, name) {
            Ok(path) => self.reader.read(&path),
            Err(e) => ReadOutcome::Error(e.to_string()),
        };

        let (kind, file_display, live_display) = match read {
            ReadOutcome::Unsupported(reason) => {
                (OutcomeKind::NotApplicable, literal.to_string(), reason)
            }
            ReadOutcome::Error(reason) => (OutcomeKind::Error, literal.to_string(), reason),
            ReadOutcome::NotFound => (
                OutcomeKind::Missing,
                literal.to_string(),
                self.markers.not_found.clone(),
            ),
            ReadOutcome::Found(value) => {
                let live = encode(&value);
                if literal.trim() == live.trim() {
                    (
                        OutcomeKind::Match,
                        format!("{}{literal}", self.markers.matched),
                        format!("{}{live}", self.markers.matched),
                    )
                } else {
                    (
                        OutcomeKind::Different,
                        format!("{}{literal}", self.markers.file_side),
                        format!("{}{live}", self.markers.live_side),
                    )
                }
            }
        };

        ComparisonOutcome {
            section: section.to_string(),
            value_name: name.to_string(),
            kind,
            file_display,
            live_display,
        }
    }

    /// Outcomes in capture order, computed one key at a time
    ///
    /// Dropping the iterator early stops the sweep between keys.
    pub fn outcomes<'a>(
        &'a self,
        snapshot: &'a Snapshot,
    ) -> impl Iterator<Item = ComparisonOutcome> + 'a {
        snapshot
            .entries()
            .map(move |entry| self.compare_entry(entry.section, entry.name, entry.literal))
    }

    /// Compare every value in `snapshot`
    pub fn reconcile(&self, snapshot: &Snapshot) -> ComparisonReport {
        let mut report = ComparisonReport::default();
        for outcome in self.outcomes(snapshot) {
            if outcome.kind == OutcomeKind::Error {
                tracing::warn!(
                    section = %outcome.section,
                    name = %outcome.value_name,
                    reason = %outcome.live_display,
                    "store read failed"
                );
                report.diagnostics.push(Diagnostic::warning(
                    Diagnostic::entry(&outcome.section, &outcome.value_name),
                    format!("read failed: {}", outcome.live_display),
                ));
            }
            report.push(outcome);
        }

        let summary = &report.summary;
        tracing::info!(
            total = summary.total,
            matches = summary.matches,
            differences = summary.differences,
            missing = summary.missing,
            errors = summary.errors,
            "reconciliation complete"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use mockall::predicate::function;
    use pretty_assertions::assert_eq;
    use regkit_store::MemoryStore;
    use regkit_value::RegistryValue;

    mock! {
        Store {}
        impl StoreReader for Store {
            fn read(&self, path: &KeyPath) -> ReadOutcome;
        }
    }

    const SECTION: &str = r"HKEY_CURRENT_USER\Software\Example";

    fn store() -> MemoryStore {
        MemoryStore::new()
            .with_value(SECTION, "Flag", RegistryValue::Dword(1))
            .with_value(SECTION, "Label", RegistryValue::String("hello".into()))
    }

    #[test]
    fn exact_match_is_decorated() {
        let outcome = Reconciler::new(store()).compare_entry(SECTION, "Flag", "dword:00000001");
        assert_eq!(outcome.kind, OutcomeKind::Match);
        assert_eq!(outcome.file_display, "✅ dword:00000001");
        assert_eq!(outcome.live_display, "✅ dword:00000001");
    }

    #[test]
    fn comparison_trims_both_sides() {
        let outcome = Reconciler::new(store()).compare_entry(SECTION, "Flag", "  dword:00000001 ");
        assert_eq!(outcome.kind, OutcomeKind::Match);
    }

    #[test]
    fn comparison_is_case_sensitive() {
        let outcome = Reconciler::new(store()).compare_entry(SECTION, "Flag", "DWORD:00000001");
        assert_eq!(outcome.kind, OutcomeKind::Different);
        assert_eq!(outcome.file_display, "📄 DWORD:00000001");
        assert_eq!(outcome.live_display, "🖥️ dword:00000001");
    }

    #[test]
    fn absent_value_is_missing() {
        let outcome = Reconciler::new(store()).compare_entry(SECTION, "Other", "\"x\"");
        assert_eq!(outcome.kind, OutcomeKind::Missing);
        assert_eq!(outcome.file_display, "\"x\"");
        assert_eq!(outcome.live_display, "❌ KEY/VALUE NOT FOUND");
    }

    #[test]
    fn unsupported_store_is_not_applicable() {
        let mut mock = MockStore::new();
        mock.expect_read()
            .returning(|_| ReadOutcome::Unsupported("no registry".into()));

        let outcome = Reconciler::new(mock).compare_entry(SECTION, "Flag", "dword:00000001");
        assert_eq!(outcome.kind, OutcomeKind::NotApplicable);
        assert_eq!(outcome.file_display, "dword:00000001");
        assert_eq!(outcome.live_display, "no registry");
    }

    #[test]
    fn one_error_does_not_stop_the_sweep() {
        let mut mock = MockStore::new();
        mock.expect_read()
            .with(function(|p: &KeyPath| p.value_name() == "Locked"))
            .times(1)
            .returning(|_| ReadOutcome::Error("access denied".into()));
        mock.expect_read()
            .with(function(|p: &KeyPath| p.value_name() != "Locked"))
            .times(2)
            .returning(|_| ReadOutcome::Found(RegistryValue::Dword(1)));

        let snapshot = Snapshot::new()
            .with_entry(SECTION, "A", "dword:00000001")
            .with_entry(SECTION, "Locked", "dword:00000001")
            .with_entry(SECTION, "B", "dword:00000002");
        let report = Reconciler::new(mock).reconcile(&snapshot);

        let kinds: Vec<_> = report.outcomes.iter().map(|o| o.kind).collect();
        assert_eq!(
            kinds,
            vec![OutcomeKind::Match, OutcomeKind::Error, OutcomeKind::Different]
        );
        assert_eq!(report.outcomes[1].live_display, "access denied");
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.summary.errors, 1);
    }

    #[test]
    fn invalid_section_is_an_error_outcome() {
        let outcome = Reconciler::new(store()).compare_entry(r"\Software", "x", "\"y\"");
        assert_eq!(outcome.kind, OutcomeKind::Error);
    }

    #[test]
    fn outcomes_are_lazy() {
        let mut mock = MockStore::new();
        mock.expect_read()
            .times(1)
            .returning(|_| ReadOutcome::NotFound);

        let snapshot = Snapshot::new()
            .with_entry(SECTION, "A", "\"a\"")
            .with_entry(SECTION, "B", "\"b\"");
        let reconciler = Reconciler::new(mock);
        let first = reconciler.outcomes(&snapshot).next().unwrap();
        assert_eq!(first.value_name, "A");
    }

    #[test]
    fn custom_markers() {
        let reconciler = Reconciler::from_config(
            store(),
            &RegkitConfig::new().with_markers(DisplayMarkers::plain()),
        );
        let outcome = reconciler.compare_entry(SECTION, "Label", "\"hello\"");
        assert_eq!(outcome.file_display, "\"hello\"");
        assert_eq!(
            reconciler.compare_entry(SECTION, "Nope", "\"x\"").live_display,
            "NOT FOUND"
        );
    }
}
