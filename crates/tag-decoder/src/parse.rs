//! Log Text Parsing
//!
//! Turns captured logger output back into entries. Only lines that can be
//! records are considered: after trimming they must be exactly 8 characters
//! and not start with `#`, so comments, blank lines and console noise are
//! ignored.

use crate::codec::{decode_base64_record, decode_hex_record};
use microtags::encoding::RECORD_LEN;
use microtags::{Microtag, HEX_TICK_MASK};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Entries decoded from a log, plus the number of candidate lines rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parsed<T> {
    pub entries: Vec<T>,
    pub skipped: usize,
}

/// Lines that look like records
pub fn record_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| line.len() == RECORD_LEN && !line.starts_with('#'))
}

/// Decode base64 microtag records
pub fn parse_microtags(text: &str) -> Parsed<Microtag> {
    let mut entries = Vec::new();
    let mut skipped = 0;
    for line in record_lines(text) {
        match decode_base64_record(line) {
            Ok((data, id)) => entries.push(Microtag::new(id, data)),
            Err(err) => {
                debug!(line, %err, "skipping invalid microtag record");
                skipped += 1;
            }
        }
    }
    Parsed { entries, skipped }
}

/// A decoded hex timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timestamp {
    /// 8-bit tag
    pub tag: u8,
    /// Tick counter with 24-bit rollovers unwrapped
    pub counter: u64,
}

impl fmt::Display for Timestamp {
    /// Re-encode as the 8-digit record the logger emitted
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02X}{:06X}", self.tag, self.counter & u64::from(HEX_TICK_MASK))
    }
}

/// Decode hex timestamp records, unwrapping the 24-bit tick counter
///
/// A counter lower than its predecessor is taken as one rollover.
pub fn parse_timestamps(text: &str) -> Parsed<Timestamp> {
    let mut unwrap = Unwrapper::new(u64::from(HEX_TICK_MASK) + 1);
    let mut entries = Vec::new();
    let mut skipped = 0;
    for line in record_lines(text) {
        match decode_hex_record(line) {
            Ok(word) => entries.push(Timestamp {
                tag: (word >> 24) as u8,
                counter: unwrap.next(u64::from(word & HEX_TICK_MASK)),
            }),
            Err(err) => {
                debug!(line, %err, "skipping invalid timestamp record");
                skipped += 1;
            }
        }
    }
    Parsed { entries, skipped }
}

/// Extends a wrapping counter into a monotonic one
#[derive(Debug, Clone)]
pub(crate) struct Unwrapper {
    modulus: u64,
    offset: u64,
    last: Option<u64>,
}

impl Unwrapper {
    pub(crate) fn new(modulus: u64) -> Self {
        Self {
            modulus,
            offset: 0,
            last: None,
        }
    }

    pub(crate) fn next(&mut self, raw: u64) -> u64 {
        if let Some(last) = self.last {
            if raw + self.offset < last {
                self.offset += self.modulus;
            }
        }
        let value = raw + self.offset;
        self.last = Some(value);
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_lines_filter() {
        let text = "# capture\r\n  EjRWeJq8  \nshort\n#AAAAAAA\n\nAAAAAAAA\r\n";
        let lines: Vec<&str> = record_lines(text).collect();
        assert_eq!(lines, vec!["EjRWeJq8", "AAAAAAAA"]);
    }

    #[test]
    fn test_parse_microtags_skips_invalid() {
        let parsed = parse_microtags("EjRWeJq8\r\nAAAA=AAA\r\nAAAAB8AB\r\n");
        assert_eq!(
            parsed.entries,
            vec![Microtag::new(0x9ABC, 0x1234_5678), Microtag::new(0xC001, 7)]
        );
        assert_eq!(parsed.skipped, 1);
    }

    #[test]
    fn test_parse_timestamps_unwraps_rollover() {
        let parsed = parse_timestamps("01FFFFF0\n02000010\n03000020\n04000005\n");
        let counters: Vec<u64> = parsed.entries.iter().map(|ts| ts.counter).collect();
        assert_eq!(
            counters,
            vec![0xFF_FFF0, 0x100_0010, 0x100_0020, 0x200_0005]
        );
        assert_eq!(parsed.entries[1].tag, 0x02);
        assert_eq!(parsed.skipped, 0);
    }

    #[test]
    fn test_timestamp_display_round_trips() {
        let parsed = parse_timestamps("2A345678\n2A000001\n");
        assert_eq!(parsed.entries[1].counter, 0x100_0001);
        assert_eq!(parsed.entries[1].to_string(), "2A000001");
        assert_eq!(parsed.entries[0].to_string(), "2A345678");
    }

    #[test]
    fn test_unwrapper_equal_values_do_not_wrap() {
        let mut unwrap = Unwrapper::new(16);
        assert_eq!(unwrap.next(5), 5);
        assert_eq!(unwrap.next(5), 5);
        assert_eq!(unwrap.next(2), 18);
        assert_eq!(unwrap.next(3), 19);
    }
}
