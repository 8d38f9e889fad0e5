//! Line parser for the Windows Registry Editor 5.00 text format
//!
//! Parsing is best-effort per line: only a missing header (or, one level up,
//! undecodable bytes) fails the whole parse. Lines that cannot be understood
//! are skipped and reported as [`Diagnostic`]s.

use regkit_value::{Diagnostic, Location, DEFAULT_VALUE_NAME};

use crate::error::ParseError;
use crate::snapshot::Snapshot;
use crate::HEADER;

/// Snapshot plus the diagnostics collected while building it
#[derive(Debug, Clone, Default)]
pub struct ParseOutput {
    /// Parsed snapshot
    pub snapshot: Snapshot,
    /// Skipped lines and other non-fatal findings
    pub diagnostics: Vec<Diagnostic>,
}

/// Check that the first line carries the format marker
///
/// # Errors
/// Returns [`ParseError::InvalidHeader`] when the first line is missing or
/// does not contain the marker
pub fn validate_header(text: &str) -> Result<(), ParseError> {
    let first = text.lines().next().unwrap_or_default();
    if first.contains(HEADER) {
        Ok(())
    } else {
        Err(ParseError::invalid_header(first.trim()))
    }
}

/// Parse text into a [`Snapshot`], discarding diagnostics
///
/// # Errors
/// Returns [`ParseError::InvalidHeader`] if the header is absent
pub fn parse(text: &str) -> Result<Snapshot, ParseError> {
    parse_with_diagnostics(text).map(|output| output.snapshot)
}

/// Parse text into a [`Snapshot`] and report every skipped line
///
/// # Errors
/// Returns [`ParseError::InvalidHeader`] if the header is absent
pub fn parse_with_diagnostics(text: &str) -> Result<ParseOutput, ParseError> {
    validate_header(text)?;

    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let mut output = ParseOutput::default();
    let mut current: Option<String> = None;
    let mut lines = normalized.lines().enumerate().skip(1).peekable();

    while let Some((index, raw)) = lines.next() {
        let line_no = index + 1;
        let line = raw.trim();
        if line.is_empty() || line.starts_with(';') {
            continue;
        }

        if let Some(path) = section_header(line) {
            if path.is_empty() {
                output.diagnostics.push(Diagnostic::warning(
                    Location::Line(line_no),
                    "empty section header ignored",
                ));
                current = None;
            } else {
                output.snapshot.open_section(path);
                current = Some(path.to_string());
            }
            continue;
        }

        let Some(section) = current.as_deref() else {
            output.diagnostics.push(Diagnostic::warning(
                Location::Line(line_no),
                format!("line outside any section skipped: {line}"),
            ));
            continue;
        };

        let Some((name, literal)) = line.split_once('=') else {
            output.diagnostics.push(Diagnostic::warning(
                Location::Line(line_no),
                format!("malformed value line skipped: {line}"),
            ));
            continue;
        };

        let mut literal = literal.trim().to_string();
        // Long hex literals wrap onto following lines with a trailing backslash.
        while literal.starts_with("hex") && literal.ends_with('\\') {
            literal.pop();
            match lines.next() {
                Some((_, next)) => literal.push_str(next.trim()),
                None => break,
            }
        }

        output
            .snapshot
            .insert(section, entry_name(name.trim()), literal);
    }

    tracing::debug!(
        sections = output.snapshot.section_count(),
        entries = output.snapshot.entry_count(),
        skipped = output.diagnostics.len(),
        "parsed .reg text"
    );
    Ok(output)
}

fn section_header(line: &str) -> Option<&str> {
    line.strip_prefix('[')?.strip_suffix(']')
}

/// Bare `@` names the default value, stored under the empty name
fn entry_name(name: &str) -> &str {
    if name == DEFAULT_VALUE_NAME {
        ""
    } else {
        unquote(name)
    }
}

fn unquote(name: &str) -> &str {
    name.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(name)
}
