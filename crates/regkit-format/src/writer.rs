//! Writer for the Windows Registry Editor 5.00 text format
//!
//! Output is the header line, a blank line, then one block per section:
//! a `[path]` line, one line per value, and a terminating blank line.
//! Lines end with CRLF and the text is encoded as UTF-16LE with a BOM.

use std::path::Path;

use regkit_value::DEFAULT_VALUE_NAME;

use crate::encoding::encode_utf16;
use crate::error::SerializeError;
use crate::snapshot::Snapshot;
use crate::HEADER;

/// Literal meaning "remove this value" when the file is applied
pub const DELETE_MARKER: &str = "-";

const LINE_END: &str = "\r\n";

/// Incremental `.reg` text builder
#[derive(Debug, Clone)]
pub struct RegWriter {
    text: String,
}

impl Default for RegWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl RegWriter {
    /// Start a document with the header and its trailing blank line
    #[must_use]
    pub fn new() -> Self {
        let mut text = String::with_capacity(256);
        text.push_str(HEADER);
        text.push_str(LINE_END);
        text.push_str(LINE_END);
        Self { text }
    }

    /// Append one section block
    ///
    /// A value without a literal is written with the deletion marker.
    pub fn section<'a, I>(&mut self, path: &str, values: I) -> &mut Self
    where
        I: IntoIterator<Item = (&'a str, Option<&'a str>)>,
    {
        self.text.push('[');
        self.text.push_str(path);
        self.text.push(']');
        self.text.push_str(LINE_END);
        for (name, literal) in values {
            self.text.push_str(&value_line(name, literal.unwrap_or(DELETE_MARKER)));
            self.text.push_str(LINE_END);
        }
        self.text.push_str(LINE_END);
        self
    }

    /// Text written so far
    #[inline]
    #[must_use]
    pub fn as_text(&self) -> &str {
        &self.text
    }

    /// Finish as text
    #[inline]
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }

    /// Finish as UTF-16LE bytes
    #[inline]
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        encode_utf16(&self.text)
    }
}

/// Format one value line
///
/// The default value (empty name) is written as bare `@`; every other name,
/// including one literally called `@`, is quoted.
#[must_use]
pub fn value_line(name: &str, literal: &str) -> String {
    if name.is_empty() {
        format!("{DEFAULT_VALUE_NAME}={literal}")
    } else {
        format!("\"{name}\"={literal}")
    }
}

/// Serialize the sections and names of `sections` to text
///
/// `literal_for(section, name)` supplies each value's literal; `None` emits
/// the deletion marker for that name.
pub fn write_text<F>(sections: &Snapshot, mut literal_for: F) -> String
where
    F: FnMut(&str, &str) -> Option<String>,
{
    let mut writer = RegWriter::new();
    for (path, values) in sections.sections() {
        let resolved: Vec<(&str, Option<String>)> = values
            .keys()
            .map(|name| (name.as_str(), literal_for(path, name.as_str())))
            .collect();
        writer.section(
            path,
            resolved
                .iter()
                .map(|(name, literal)| (*name, literal.as_deref())),
        );
    }
    writer.into_text()
}

/// Serialize the sections and names of `sections` to UTF-16LE bytes
///
/// See [`write_text`] for how literals are resolved.
pub fn write<F>(sections: &Snapshot, literal_for: F) -> Vec<u8>
where
    F: FnMut(&str, &str) -> Option<String>,
{
    encode_utf16(&write_text(sections, literal_for))
}

/// Write encoded bytes to `path`
///
/// # Errors
/// Returns [`SerializeError::Io`] if the destination cannot be created or written
pub fn write_file(path: impl AsRef<Path>, bytes: &[u8]) -> Result<(), SerializeError> {
    let path = path.as_ref();
    std::fs::write(path, bytes).map_err(|e| SerializeError::io_error(path, e))?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "wrote .reg file");
    Ok(())
}
