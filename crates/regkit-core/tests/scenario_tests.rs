//! End-to-end comparison and rollback over the example document

use pretty_assertions::assert_eq;
use regkit_core::{
    backup_file, compare_file, OutcomeKind, Reconciler, RegkitConfig, ReportFilter, RollbackEntry,
    RollbackGenerator,
};
use regkit_format::{parse, read_text, DELETE_MARKER};
use regkit_store::{MemoryStore, UnavailableStore};
use regkit_test_utils::{example_store, example_text, reg_text, write_reg_file, EXAMPLE_SECTION};
use regkit_value::RegistryValue;

#[test]
fn example_reconciles_to_match_and_missing() {
    let snapshot = parse(&example_text()).unwrap();
    let report = Reconciler::new(example_store()).reconcile(&snapshot);

    let kinds: Vec<_> = report
        .outcomes
        .iter()
        .map(|o| (o.value_name.as_str(), o.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![("Flag", OutcomeKind::Match), ("Label", OutcomeKind::Missing)]
    );
    assert_eq!(report.summary.total, 2);
    assert!(report.diagnostics.is_empty());
}

#[test]
fn example_rollback_restores_flag_and_deletes_label() {
    let snapshot = parse(&example_text()).unwrap();
    let output = RollbackGenerator::new(example_store())
        .generate(&snapshot)
        .unwrap();

    assert_eq!(
        output.snapshot.get(EXAMPLE_SECTION, "Flag"),
        Some(&RollbackEntry::Restore("dword:00000001".into()))
    );
    assert_eq!(
        output.snapshot.get(EXAMPLE_SECTION, "Label").map(RollbackEntry::as_str),
        Some(DELETE_MARKER)
    );
    assert!(output.snapshot.covers_exactly(&snapshot));
}

#[test]
fn example_rollback_without_flag_deletes_both() {
    let snapshot = parse(&example_text()).unwrap();
    let output = RollbackGenerator::new(MemoryStore::new())
        .generate(&snapshot)
        .unwrap();
    assert_eq!(output.snapshot.deletion_count(), 2);
}

#[test]
fn rendered_columns_for_example() {
    let (_dir, path) = write_reg_file("example.reg", &example_text());
    let report = compare_file(&path, example_store(), &RegkitConfig::new()).unwrap();

    let all = report.render(ReportFilter::All);
    assert_eq!(
        all.file,
        "[HKEY_CURRENT_USER\\Software\\Example]\n  \"Flag\"=✅ dword:00000001\n  \"Label\"=\"hello\""
    );
    assert_eq!(
        all.live,
        "[HKEY_CURRENT_USER\\Software\\Example]\n  \"Flag\"=✅ dword:00000001\n  \"Label\"=❌ KEY/VALUE NOT FOUND"
    );

    let missing = report.render(ReportFilter::Missing);
    assert!(!missing.file.contains("Flag"));
}

#[test]
fn backup_file_writes_parseable_rollback() {
    let (dir, path) = write_reg_file("example.reg", &example_text());
    let destination = dir.path().join("restore.reg");

    let (written, _) =
        backup_file(&path, Some(&destination), example_store(), &RegkitConfig::new()).unwrap();
    assert_eq!(written, destination);

    let text = read_text(&std::fs::read(&destination).unwrap()).unwrap();
    assert_eq!(
        text,
        "Windows Registry Editor Version 5.00\r\n\r\n\
         [HKEY_CURRENT_USER\\Software\\Example]\r\n\
         \"Flag\"=dword:00000001\r\n\
         \"Label\"=-\r\n\
         \r\n"
    );
}

#[test]
fn rollback_of_rollback_is_stable() {
    let store = example_store().with_value(
        EXAMPLE_SECTION,
        "Label",
        RegistryValue::String("before".into()),
    );
    let snapshot = parse(&example_text()).unwrap();
    let first = RollbackGenerator::new(&store).generate(&snapshot).unwrap();
    let reparsed = parse(&first.snapshot.to_text()).unwrap();
    let second = RollbackGenerator::new(&store).generate(&reparsed).unwrap();
    assert_eq!(first.snapshot, second.snapshot);
}

#[test]
fn header_rejection_stops_before_any_read() {
    let (_dir, path) = write_reg_file("old.reg", "REGEDIT4\r\n\r\n[HKEY_USERS\\X]\r\n\"a\"=\"b\"\r\n");
    let err = compare_file(&path, example_store(), &RegkitConfig::new()).unwrap_err();
    assert!(err.is_parse_failure());
}

#[test]
fn unavailable_store_reports_not_applicable() {
    let text = reg_text(&[
        (EXAMPLE_SECTION, "Flag", "dword:00000001"),
        (r"HKEY_LOCAL_MACHINE\Software\Other", "Size", "hex(b):0000000000000010"),
    ]);
    let report = Reconciler::new(UnavailableStore::default()).reconcile(&parse(&text).unwrap());
    assert_eq!(report.summary.not_applicable, 2);
    assert_eq!(report.summary.total, 2);
}
