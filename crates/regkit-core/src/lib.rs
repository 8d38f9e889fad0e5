//! regkit core
//!
//! Reconciles a parsed `.reg` snapshot against a live store and builds
//! rollback files that restore the pre-change state.
//!
//! # Core Operations
//!
//! - **Reconcile**: classify every declared value as match, difference,
//!   missing, error or not applicable ([`Reconciler`])
//! - **Report**: tally, filter and render outcomes ([`ComparisonReport`])
//! - **Rollback**: capture live values for the same key set, marking absent
//!   ones for deletion ([`RollbackGenerator`])
//!
//! # Architecture
//!
//! ```text
//! ┌────────────┐      ┌────────────┐      ┌──────────────────┐
//! │ .reg bytes │ ───▶ │  Snapshot  │ ───▶ │    Reconciler    │ ───▶ ComparisonReport
//! └────────────┘      └────────────┘      ├──────────────────┤
//!                                         │ RollbackGenerator│ ───▶ RollbackSnapshot ───▶ .reg bytes
//!                                         └────────┬─────────┘
//!                                                  │ read only
//!                                            StoreReader
//! ```
//!
//! # Example
//!
//! ```
//! use regkit_core::{OutcomeKind, Reconciler, RollbackGenerator};
//! use regkit_format::Snapshot;
//! use regkit_store::MemoryStore;
//! use regkit_value::RegistryValue;
//!
//! let section = r"HKEY_CURRENT_USER\Software\Example";
//! let snapshot = Snapshot::new()
//!     .with_entry(section, "Flag", "dword:00000001")
//!     .with_entry(section, "Label", "\"hello\"");
//! let store = MemoryStore::new().with_value(section, "Flag", RegistryValue::Dword(1));
//!
//! let report = Reconciler::new(&store).reconcile(&snapshot);
//! assert_eq!(report.outcomes[0].kind, OutcomeKind::Match);
//! assert_eq!(report.outcomes[1].kind, OutcomeKind::Missing);
//!
//! let rollback = RollbackGenerator::new(&store).generate(&snapshot).unwrap();
//! assert_eq!(rollback.snapshot.get(section, "Label").unwrap().as_str(), "-");
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod config;
pub mod error;
pub mod reconcile;
pub mod report;
pub mod rollback;

use std::path::{Path, PathBuf};

use regkit_format::read_file;
use regkit_store::StoreReader;

// Re-exports for convenience
pub use config::{DisplayMarkers, RegkitConfig};
pub use error::{ConfigError, RegkitError, Result, RollbackError};
pub use reconcile::Reconciler;
pub use report::{
    ComparisonOutcome, ComparisonReport, OutcomeKind, RenderedColumns, ReportFilter,
    ReportSummary,
};
pub use rollback::{RollbackEntry, RollbackGenerator, RollbackOutput, RollbackSnapshot};

/// Read `input` and compare it against `reader`
///
/// Parser diagnostics come first in the report, followed by read failures.
///
/// # Errors
/// Returns [`RegkitError::Parse`] if the file cannot be read, decoded or
/// lacks the header
pub fn compare_file<R: StoreReader>(
    input: impl AsRef<Path>,
    reader: R,
    config: &RegkitConfig,
) -> Result<ComparisonReport> {
    let parsed = read_file(input.as_ref(), config.max_file_size)?;
    let mut report = Reconciler::from_config(reader, config).reconcile(&parsed.snapshot);
    report.diagnostics.splice(0..0, parsed.diagnostics);
    Ok(report)
}

/// Read `input` and write its rollback file
///
/// The destination defaults to [`RegkitConfig::backup_path_for`]. Returns the
/// path written and the generator output, with parser diagnostics first.
///
/// # Errors
/// - [`RegkitError::Parse`] if the input is rejected
/// - [`RegkitError::Rollback`] if there is nothing to back up or the
///   destination cannot be written
pub fn backup_file<R: StoreReader>(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    reader: R,
    config: &RegkitConfig,
) -> Result<(PathBuf, RollbackOutput)> {
    let input = input.as_ref();
    let parsed = read_file(input, config.max_file_size)?;
    let destination = output.map_or_else(|| config.backup_path_for(input), Path::to_path_buf);

    let mut rollback = RollbackGenerator::new(reader).generate_to_file(&parsed.snapshot, &destination)?;
    rollback.diagnostics.splice(0..0, parsed.diagnostics);
    Ok((destination, rollback))
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for comparison and rollback
    pub use crate::config::RegkitConfig;
    pub use crate::error::{RegkitError, RollbackError};
    pub use crate::reconcile::Reconciler;
    pub use crate::report::{ComparisonReport, OutcomeKind, ReportFilter};
    pub use crate::rollback::{RollbackEntry, RollbackGenerator};
    pub use crate::{backup_file, compare_file};
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use regkit_format::encode_utf16;
    use regkit_store::MemoryStore;
    use regkit_value::{Location, RegistryValue};

    const SECTION: &str = r"HKEY_CURRENT_USER\Software\Example";
    const TEXT: &str = "Windows Registry Editor Version 5.00\r\n\r\n\
        [HKEY_CURRENT_USER\\Software\\Example]\r\n\
        \"Flag\"=dword:00000001\r\n\
        stray line\r\n\
        \"Label\"=\"hello\"\r\n";

    fn store() -> MemoryStore {
        MemoryStore::new().with_value(SECTION, "Flag", RegistryValue::Dword(1))
    }

    #[test]
    fn compare_file_merges_parse_diagnostics() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tweaks.reg");
        std::fs::write(&input, encode_utf16(TEXT)).unwrap();

        let report = compare_file(&input, store(), &RegkitConfig::new()).unwrap();
        assert_eq!(report.summary.total, 2);
        assert_eq!(report.summary.matches, 1);
        assert_eq!(report.summary.missing, 1);
        assert_eq!(report.diagnostics[0].location, Location::Line(5));
    }

    #[test]
    fn backup_file_uses_default_destination() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tweaks.reg");
        std::fs::write(&input, encode_utf16(TEXT)).unwrap();

        let (written, output) = backup_file(&input, None, store(), &RegkitConfig::new()).unwrap();
        assert_eq!(written, dir.path().join("tweaks_backup.reg"));
        assert!(written.exists());
        assert_eq!(output.snapshot.deletion_count(), 1);
    }

    #[test]
    fn oversized_input_is_a_parse_failure() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("tweaks.reg");
        std::fs::write(&input, TEXT).unwrap();

        let err = compare_file(&input, store(), &RegkitConfig::new().with_max_file_size(4))
            .unwrap_err();
        assert!(err.is_parse_failure());
    }
}
