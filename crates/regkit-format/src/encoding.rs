//! Byte-level text encoding
//!
//! Files are read as UTF-16 first and UTF-8 second; they are always written as
//! UTF-16LE with a byte order mark.

use std::borrow::Cow;

use encoding_rs::{Encoding, UTF_16LE, UTF_8};

use crate::error::ParseError;

const UTF16_LE_BOM: [u8; 2] = [0xFF, 0xFE];

/// Decode raw file bytes into text
///
/// A byte order mark selects the encoding. Without one, bytes that look like
/// UTF-16LE (even length, NUL high byte in the first unit) are tried as
/// UTF-16LE. Anything else, or UTF-16 that fails to decode, is read as UTF-8.
///
/// # Errors
/// Returns [`ParseError::Decode`] if neither interpretation succeeds
pub fn read_text(bytes: &[u8]) -> Result<String, ParseError> {
    match Encoding::for_bom(bytes) {
        Some((encoding, bom_len)) if encoding == UTF_8 => decode(UTF_8, &bytes[bom_len..]),
        Some((encoding, bom_len)) => {
            decode(encoding, &bytes[bom_len..]).or_else(|_| decode(UTF_8, bytes))
        }
        None if looks_like_utf16le(bytes) => {
            decode(UTF_16LE, bytes).or_else(|_| decode(UTF_8, bytes))
        }
        None => decode(UTF_8, bytes),
    }
}

/// Encode text as UTF-16LE with a byte order mark
///
/// `encoding_rs` only decodes UTF-16 (its encoders emit UTF-8 for it), so the
/// code units come from `str::encode_utf16`.
#[must_use]
pub fn encode_utf16(text: &str) -> Vec<u8> {
    let mut out = Vec::with_capacity(2 + text.len() * 2);
    out.extend_from_slice(&UTF16_LE_BOM);
    out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
    out
}

fn looks_like_utf16le(bytes: &[u8]) -> bool {
    bytes.len() >= 2 && bytes.len() % 2 == 0 && bytes[1] == 0
}

fn decode(encoding: &'static Encoding, body: &[u8]) -> Result<String, ParseError> {
    encoding
        .decode_without_bom_handling_and_without_replacement(body)
        .map(Cow::into_owned)
        .ok_or_else(|| ParseError::Decode(format!("invalid {} content", encoding.name())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf16le(text: &str, bom: bool) -> Vec<u8> {
        let mut out = Vec::new();
        if bom {
            out.extend_from_slice(&UTF16_LE_BOM);
        }
        out.extend(text.encode_utf16().flat_map(u16::to_le_bytes));
        out
    }

    #[test]
    fn utf16_with_bom() {
        let bytes = utf16le("Windows Registry", true);
        assert_eq!(read_text(&bytes).unwrap(), "Windows Registry");
    }

    #[test]
    fn utf16_without_bom() {
        let bytes = utf16le("Windows", false);
        assert_eq!(read_text(&bytes).unwrap(), "Windows");
    }

    #[test]
    fn utf16_big_endian() {
        let mut bytes = vec![0xFE, 0xFF];
        bytes.extend("ab".encode_utf16().flat_map(u16::to_be_bytes));
        assert_eq!(read_text(&bytes).unwrap(), "ab");
    }

    #[test]
    fn utf8_fallback() {
        assert_eq!(read_text("héllo".as_bytes()).unwrap(), "héllo");
    }

    #[test]
    fn utf8_bom_is_stripped() {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(b"abc");
        assert_eq!(read_text(&bytes).unwrap(), "abc");
    }

    #[test]
    fn unpaired_surrogate_falls_back_to_utf8_and_fails() {
        // BOM, then a lone high surrogate: invalid UTF-16 and invalid UTF-8.
        let bytes = [0xFF, 0xFE, 0x00, 0xD8];
        assert!(matches!(read_text(&bytes), Err(ParseError::Decode(_))));
    }

    #[test]
    fn odd_length_utf16_falls_back_to_utf8() {
        // NUL high byte but odd length.
        assert_eq!(read_text(b"a\0b").unwrap(), "a\0b");
    }

    #[test]
    fn decode_error_names_the_encoding() {
        let err = read_text(&[0xC3, 0x28]).unwrap_err();
        assert_eq!(err.to_string(), "content is neither valid UTF-16 nor UTF-8: invalid UTF-8 content");
    }

    #[test]
    fn invalid_utf8_is_decode_error() {
        assert!(matches!(
            read_text(&[0xC3, 0x28, 0x41]),
            Err(ParseError::Decode(_))
        ));
    }

    #[test]
    fn encode_writes_bom_and_le_units() {
        assert_eq!(encode_utf16("A\r\n"), vec![0xFF, 0xFE, 0x41, 0, 0x0D, 0, 0x0A, 0]);
    }

    #[test]
    fn encode_then_read() {
        let text = "Windows Registry Editor Version 5.00\r\n";
        assert_eq!(read_text(&encode_utf16(text)).unwrap(), text);
    }
}
