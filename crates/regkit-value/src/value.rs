//! Registry value types and their `.reg` literal encoding
//!
//! Each [`RegistryValue`] variant has exactly one literal form:
//!
//! | Variant        | Literal                                           |
//! |----------------|---------------------------------------------------|
//! | `String`       | `"text"`                                          |
//! | `ExpandString` | `hex(2):` UTF-16LE bytes + `,00,00`               |
//! | `Dword`        | `dword:` 8 lowercase hex digits                   |
//! | `Qword`        | `hex(b):` 16 lowercase hex digits                 |
//! | `Binary`       | `hex:` comma-separated bytes                      |
//! | `MultiString`  | `hex(7):` concatenated UTF-16LE bytes + `,00,00`  |
//! | `Unknown`      | `literal (Type: tag)`                             |
//!
//! Literals read from files are never decoded back into values; comparison
//! happens on the encoded text.

use std::fmt::{self, Display, Formatter, Write as _};

/// Registry type tags as reported by the live store
pub mod type_tag {
    /// No value type
    pub const REG_NONE: u32 = 0;
    /// Plain string
    pub const REG_SZ: u32 = 1;
    /// String with unexpanded environment references
    pub const REG_EXPAND_SZ: u32 = 2;
    /// Raw bytes
    pub const REG_BINARY: u32 = 3;
    /// 32-bit little-endian integer
    pub const REG_DWORD: u32 = 4;
    /// Sequence of strings
    pub const REG_MULTI_SZ: u32 = 7;
    /// 64-bit little-endian integer
    pub const REG_QWORD: u32 = 11;
}

/// A decoded value read from the live store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistryValue {
    /// `REG_SZ`
    String(String),
    /// `REG_EXPAND_SZ`
    ExpandString(String),
    /// `REG_DWORD`
    Dword(u32),
    /// `REG_QWORD`
    Qword(u64),
    /// `REG_BINARY`
    Binary(Vec<u8>),
    /// `REG_MULTI_SZ`
    MultiString(Vec<String>),
    /// Any other type tag, kept for display only
    Unknown {
        /// Raw type tag
        tag: u32,
        /// Printable form of the raw data
        literal: String,
    },
}

impl RegistryValue {
    /// Type tag of this value
    #[must_use]
    pub fn type_tag(&self) -> u32 {
        match self {
            Self::String(_) => type_tag::REG_SZ,
            Self::ExpandString(_) => type_tag::REG_EXPAND_SZ,
            Self::Dword(_) => type_tag::REG_DWORD,
            Self::Qword(_) => type_tag::REG_QWORD,
            Self::Binary(_) => type_tag::REG_BINARY,
            Self::MultiString(_) => type_tag::REG_MULTI_SZ,
            Self::Unknown { tag, .. } => *tag,
        }
    }

    /// Encode into `.reg` literal text
    #[inline]
    #[must_use]
    pub fn to_literal(&self) -> String {
        encode(self)
    }

    /// Build a value from a store's raw `(type, bytes)` pair
    ///
    /// String data is UTF-16LE; trailing NULs are dropped. Integer types with
    /// short data and unrecognized tags become [`RegistryValue::Unknown`] with
    /// the bytes rendered as comma-separated hex.
    #[must_use]
    pub fn from_raw(tag: u32, data: &[u8]) -> Self {
        match tag {
            type_tag::REG_SZ => Self::String(decode_utf16_string(data)),
            type_tag::REG_EXPAND_SZ => Self::ExpandString(decode_utf16_string(data)),
            type_tag::REG_BINARY => Self::Binary(data.to_vec()),
            type_tag::REG_DWORD => match data.get(..4).and_then(|b| <[u8; 4]>::try_from(b).ok()) {
                Some(bytes) => Self::Dword(u32::from_le_bytes(bytes)),
                None => Self::unknown_raw(tag, data),
            },
            type_tag::REG_QWORD => match data.get(..8).and_then(|b| <[u8; 8]>::try_from(b).ok()) {
                Some(bytes) => Self::Qword(u64::from_le_bytes(bytes)),
                None => Self::unknown_raw(tag, data),
            },
            type_tag::REG_MULTI_SZ => Self::MultiString(decode_multi_string(data)),
            _ => Self::unknown_raw(tag, data),
        }
    }

    fn unknown_raw(tag: u32, data: &[u8]) -> Self {
        Self::Unknown {
            tag,
            literal: hex_list(data),
        }
    }
}

impl Display for RegistryValue {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&encode(self))
    }
}

/// Encode a value into its `.reg` literal
///
/// Total over every variant. String values are quoted without escaping, so
/// embedded `"` characters yield an ambiguous literal.
#[must_use]
pub fn encode(value: &RegistryValue) -> String {
    match value {
        RegistryValue::String(text) => format!("\"{text}\""),
        RegistryValue::ExpandString(text) => {
            format!("hex(2):{}", hex_with_terminator(&utf16le_bytes(text)))
        }
        RegistryValue::Dword(n) => format!("dword:{n:08x}"),
        // Zero-padded big-endian text, not the byte list regedit itself writes.
        RegistryValue::Qword(n) => format!("hex(b):{n:016x}"),
        RegistryValue::Binary(bytes) => format!("hex:{}", hex_list(bytes)),
        RegistryValue::MultiString(items) => {
            // One terminator pair for the whole sequence.
            let bytes: Vec<u8> = items.iter().flat_map(|s| utf16le_bytes(s)).collect();
            format!("hex(7):{}", hex_with_terminator(&bytes))
        }
        RegistryValue::Unknown { tag, literal } => format!("{literal} (Type: {tag})"),
    }
}

/// Render bytes as two-digit lowercase hex joined by commas
#[must_use]
pub fn hex_list(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 3);
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{byte:02x}");
    }
    out
}

fn hex_with_terminator(bytes: &[u8]) -> String {
    // An empty payload still gets the leading comma.
    format!("{},00,00", hex_list(bytes))
}

fn utf16le_bytes(text: &str) -> Vec<u8> {
    text.encode_utf16().flat_map(u16::to_le_bytes).collect()
}

fn utf16_units(data: &[u8]) -> Vec<u16> {
    data.chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect()
}

fn decode_utf16_string(data: &[u8]) -> String {
    let mut units = utf16_units(data);
    while units.last() == Some(&0) {
        units.pop();
    }
    String::from_utf16_lossy(&units)
}

fn decode_multi_string(data: &[u8]) -> Vec<String> {
    let units = utf16_units(data);
    let mut items: Vec<String> = units
        .split(|&unit| unit == 0)
        .map(String::from_utf16_lossy)
        .collect();
    while items.last().is_some_and(String::is_empty) {
        items.pop();
    }
    items
}
