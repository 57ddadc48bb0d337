//! Record Decoding
//!
//! Inverse of the logger encoders: 8 hex digits back to a 32-bit word, and
//! 8 base64 characters back to `(data, id)`.

use crate::error::DecodeError;
use microtags::encoding::RECORD_LEN;

fn check_len(record: &str) -> Result<(), DecodeError> {
    if record.len() != RECORD_LEN {
        return Err(DecodeError::InvalidLength {
            expected: RECORD_LEN,
            actual: record.len(),
        });
    }
    Ok(())
}

/// Decode one hex record (case-insensitive)
pub fn decode_hex_record(record: &str) -> Result<u32, DecodeError> {
    check_len(record)?;
    let mut bytes = [0u8; 4];
    hex::decode_to_slice(record, &mut bytes).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { c, index } => DecodeError::InvalidCharacter {
            ch: c,
            position: index,
        },
        // Length was checked above
        _ => DecodeError::InvalidLength {
            expected: RECORD_LEN,
            actual: record.len(),
        },
    })?;
    Ok(u32::from_be_bytes(bytes))
}

/// Decode one base64 record into `(data, id)`
pub fn decode_base64_record(record: &str) -> Result<(u32, u16), DecodeError> {
    check_len(record)?;
    let mut word = 0u64;
    for (position, ch) in record.chars().enumerate() {
        let value = base64_value(ch).ok_or(DecodeError::InvalidCharacter { ch, position })?;
        word = (word << 6) | u64::from(value);
    }
    Ok(((word >> 16) as u32, (word & 0xFFFF) as u16))
}

fn base64_value(ch: char) -> Option<u8> {
    match ch {
        'A'..='Z' => Some(ch as u8 - b'A'),
        'a'..='z' => Some(ch as u8 - b'a' + 26),
        '0'..='9' => Some(ch as u8 - b'0' + 52),
        '+' => Some(62),
        '/' => Some(63),
        _ => None,
    }
}
