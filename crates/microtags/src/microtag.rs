//! Microtag Logger
//!
//! Records `(id, data)` pairs, where data is either a tick count or an
//! arbitrary 32-bit value, and flushes them as base64 text lines.

use crate::encoding::{emit_record, encode_base64_record};
use crate::error::LogError;
use crate::log::Entries;
use crate::sink::ByteSink;
use crate::ticks::TickSource;
use serde::{Deserialize, Serialize};

/// Default number of entries held between flushes
pub const DEFAULT_CAPACITY: usize = 128;

/// A single microtag
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Microtag {
    /// 16-bit tag id
    pub id: u16,
    /// 32-bit payload (ticks or data)
    pub data: u32,
}

impl Microtag {
    pub fn new(id: u16, data: u32) -> Self {
        Self { id, data }
    }

    /// 8-character base64 text form
    pub fn encode(&self) -> [u8; crate::encoding::RECORD_LEN] {
        encode_base64_record(self.data, self.id)
    }
}

/// Fixed-capacity microtag log
#[derive(Debug, Clone)]
pub struct MicrotagLog<const N: usize = DEFAULT_CAPACITY> {
    entries: Entries<Microtag, N>,
}

impl<const N: usize> MicrotagLog<N> {
    /// Create an empty log
    pub fn new() -> Self {
        Self {
            entries: Entries::new(),
        }
    }

    /// Record the current tick count under `id`
    pub fn set_ticks<T: TickSource + ?Sized>(
        &mut self,
        id: u16,
        clock: &mut T,
    ) -> Result<(), LogError> {
        let ticks = clock.ticks();
        self.set_data(id, ticks)
    }

    /// Record an arbitrary 32-bit value under `id`
    pub fn set_data(&mut self, id: u16, data: u32) -> Result<(), LogError> {
        self.entries.push(Microtag::new(id, data))
    }

    /// Emit every entry as a base64 line, then clear the log
    pub fn flush_text<K: ByteSink + ?Sized>(&mut self, sink: &mut K) {
        for tag in self.entries.as_slice() {
            emit_record(sink, &tag.encode());
        }
        self.entries.clear();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        N
    }

    pub fn iter(&self) -> impl Iterator<Item = &Microtag> {
        self.entries.as_slice().iter()
    }
}

impl<const N: usize> Default for MicrotagLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ring_buffer::RingBuffer;

    #[test]
    fn test_set_and_flush() {
        let mut log = MicrotagLog::<4>::new();
        let mut clock = || 0x1234_5678u32;

        log.set_ticks(0x9ABC, &mut clock).unwrap();
        log.set_data(0xC001, 7).unwrap();
        assert_eq!(log.len(), 2);

        let mut out: Vec<u8> = Vec::new();
        log.flush_text(&mut out);
        assert_eq!(out, b"EjRWeJq8\r\nAAAAB8AB\r\n");
        assert!(log.is_empty());
    }

    #[test]
    fn test_full_log_rejects_entry() {
        let mut log = MicrotagLog::<2>::new();
        log.set_data(1, 1).unwrap();
        log.set_data(2, 2).unwrap();

        assert_eq!(log.set_data(3, 3), Err(LogError::Full { capacity: 2 }));
        let ids: Vec<u16> = log.iter().map(|tag| tag.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_flush_into_ring_buffer() {
        let mut log: MicrotagLog = MicrotagLog::new();
        assert_eq!(log.capacity(), DEFAULT_CAPACITY);
        log.set_data(0, 0).unwrap();

        let mut buffer = RingBuffer::new([0u8; 32]);
        log.flush_text(&mut buffer);

        let mut out = [0u8; 10];
        assert_eq!(buffer.read(&mut out), 10);
        assert_eq!(&out, b"AAAAAAAA\r\n");
    }

    #[test]
    fn test_clear_drops_entries() {
        let mut log = MicrotagLog::<2>::new();
        log.set_data(5, 5).unwrap();
        log.clear();

        let mut out: Vec<u8> = Vec::new();
        log.flush_text(&mut out);
        assert!(out.is_empty());
    }
}
