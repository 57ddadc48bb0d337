//! Text Record Encoding
//!
//! Fixed-width, allocation-free encoders for log records. A hex record is a
//! 32-bit word as 8 uppercase hex digits; a base64 record is a 48-bit word
//! (32-bit data followed by a 16-bit id) as 8 characters of the standard
//! base64 alphabet. Both are most-significant first and every record on the
//! wire is terminated by CR/LF.

use crate::sink::ByteSink;

/// Characters per encoded record, excluding the line terminator
pub const RECORD_LEN: usize = 8;

/// Record terminator
pub const LINE_END: &[u8; 2] = b"\r\n";

pub const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

pub const BASE64_ALPHABET: &[u8; 64] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789+/";

/// Encode `word` as 8 hex digits
pub fn encode_hex_record(word: u32) -> [u8; RECORD_LEN] {
    let mut out = [0u8; RECORD_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        let shift = 28 - 4 * i;
        *slot = HEX_DIGITS[((word >> shift) & 0xF) as usize];
    }
    out
}

/// Encode `data` and `id` as one 48-bit base64 record
pub fn encode_base64_record(data: u32, id: u16) -> [u8; RECORD_LEN] {
    let word = (u64::from(data) << 16) | u64::from(id);
    let mut out = [0u8; RECORD_LEN];
    for (i, slot) in out.iter_mut().enumerate() {
        let shift = 42 - 6 * i;
        *slot = BASE64_ALPHABET[((word >> shift) & 0x3F) as usize];
    }
    out
}

/// Emit one encoded record followed by CR/LF
pub fn emit_record<K: ByteSink + ?Sized>(sink: &mut K, record: &[u8; RECORD_LEN]) {
    sink.emit_all(record);
    sink.emit_all(LINE_END);
}
