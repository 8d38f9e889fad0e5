//! Testing utilities for regkit workspace
//!
//! Shared fixtures: sample `.reg` documents, stores and temp files.

#![allow(missing_docs)]

use std::path::PathBuf;

use regkit_format::{encode_utf16, HEADER};
use regkit_store::MemoryStore;
use regkit_value::RegistryValue;

pub const EXAMPLE_SECTION: &str = r"HKEY_CURRENT_USER\Software\Example";

/// The two-value example document, CRLF line endings
pub fn example_text() -> String {
    reg_text(&[
        (EXAMPLE_SECTION, "Flag", "dword:00000001"),
        (EXAMPLE_SECTION, "Label", "\"hello\""),
    ])
}

/// Build a document from `(section, name, literal)` triples
///
/// Consecutive triples with the same section share one block.
pub fn reg_text(entries: &[(&str, &str, &str)]) -> String {
    let mut text = format!("{HEADER}\r\n\r\n");
    let mut current: Option<&str> = None;
    for (section, name, literal) in entries {
        if current != Some(*section) {
            if current.is_some() {
                text.push_str("\r\n");
            }
            text.push_str(&format!("[{section}]\r\n"));
            current = Some(*section);
        }
        text.push_str(&format!("\"{name}\"={literal}\r\n"));
    }
    if current.is_some() {
        text.push_str("\r\n");
    }
    text
}

/// Store where `Flag` is 1 and `Label` is absent
pub fn example_store() -> MemoryStore {
    MemoryStore::new().with_value(EXAMPLE_SECTION, "Flag", RegistryValue::Dword(1))
}

/// Temp directory holding `name` with `text` encoded as UTF-16LE
pub fn write_reg_file(name: &str, text: &str) -> (tempfile::TempDir, PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(name);
    std::fs::write(&path, encode_utf16(text)).unwrap();
    (dir, path)
}
