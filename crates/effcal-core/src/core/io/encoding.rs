//! The fixed single-byte codepage of calibration files.
//!
//! Files are decoded and encoded here and nowhere else, so the codec itself only
//! ever sees `str` and behaves the same regardless of the runtime locale.

use super::error::CodecError;
use encoding_rs::{Encoding, WINDOWS_1251};

pub const LEGACY_ENCODING: &Encoding = WINDOWS_1251;

pub fn decode(bytes: &[u8]) -> Result<String, CodecError> {
    LEGACY_ENCODING
        .decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| {
            CodecError::Encoding(format!(
                "input is not valid {} text",
                LEGACY_ENCODING.name()
            ))
        })
}

pub fn encode(text: &str) -> Result<Vec<u8>, CodecError> {
    let (bytes, _, had_unmappable) = LEGACY_ENCODING.encode(text);
    if had_unmappable {
        let mut buf = [0u8; 4];
        let offending = text
            .chars()
            .find(|c| LEGACY_ENCODING.encode(c.encode_utf8(&mut buf)).2)
            .unwrap_or(char::REPLACEMENT_CHARACTER);
        return Err(CodecError::Encoding(format!(
            "character '{}' (U+{:04X}) has no {} representation",
            offending,
            offending as u32,
            LEGACY_ENCODING.name()
        )));
    }
    Ok(bytes.into_owned())
}
