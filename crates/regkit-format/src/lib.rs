//! regkit format layer
//!
//! The boundary between `.reg` files and the in-memory [`Snapshot`].
//!
//! # Core Operations
//!
//! - **Decode**: raw bytes → text ([`read_text`], UTF-16 first, then UTF-8)
//! - **Validate**: first line must carry [`HEADER`] ([`validate_header`])
//! - **Parse**: text → [`Snapshot`] ([`parse`], best-effort per line)
//! - **Write**: [`Snapshot`] + literal resolver → UTF-16LE CRLF bytes ([`write`])
//!
//! # Architecture
//!
//! ```text
//! bytes → read_text → validate_header → parse → Snapshot → write → bytes
//! ```
//!
//! # Example
//!
//! ```
//! use regkit_format::{parse, HEADER};
//!
//! let text = format!("{HEADER}\r\n\r\n[HKEY_CURRENT_USER\\Software\\Example]\r\n\"Flag\"=dword:00000001\r\n");
//! let snapshot = parse(&text).unwrap();
//! assert_eq!(snapshot.get(r"HKEY_CURRENT_USER\Software\Example", "Flag"), Some("dword:00000001"));
//! ```

#![warn(unreachable_pub)]

// Core modules
pub mod encoding;
pub mod error;
pub mod parser;
pub mod snapshot;
pub mod writer;

use std::fs::File;
use std::io::Read;
use std::path::Path;

// Re-exports for convenience
pub use encoding::{encode_utf16, read_text};
pub use error::{FormatError, FormatResult, ParseError, SerializeError};
pub use parser::{parse, parse_with_diagnostics, validate_header, ParseOutput};
pub use snapshot::{Snapshot, SnapshotEntry};
pub use writer::{value_line, write, write_file, write_text, RegWriter, DELETE_MARKER};

/// Marker the first line of every file must contain
pub const HEADER: &str = "Windows Registry Editor Version 5.00";

/// Default upper bound on input size (10 MiB)
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Decode, validate and parse raw file bytes
///
/// # Errors
/// - [`ParseError::Decode`] if the bytes are neither UTF-16 nor UTF-8
/// - [`ParseError::InvalidHeader`] if the header marker is absent
pub fn parse_bytes(bytes: &[u8]) -> Result<ParseOutput, ParseError> {
    let text = read_text(bytes)?;
    parse_with_diagnostics(&text)
}

/// Read and parse a `.reg` file from disk
///
/// # Errors
/// - [`ParseError::Io`] if the file cannot be read
/// - [`ParseError::TooLarge`] if it holds more than `max_size` bytes
/// - any error from [`parse_bytes`]
pub fn read_file(path: impl AsRef<Path>, max_size: u64) -> Result<ParseOutput, ParseError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| ParseError::io_error(path, e))?;

    // Never buffer more than one byte past the limit, whatever the file grows to.
    let mut bytes = Vec::new();
    file.take(max_size.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| ParseError::io_error(path, e))?;
    let size = bytes.len() as u64;
    if size > max_size {
        return Err(ParseError::TooLarge {
            size,
            max: max_size,
        });
    }

    tracing::debug!(path = %path.display(), size, "read .reg file");
    parse_bytes(&bytes)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with `.reg` files
    pub use crate::error::{ParseError, SerializeError};
    pub use crate::{parse, parse_bytes, read_file, write, Snapshot, DELETE_MARKER, HEADER};
}
