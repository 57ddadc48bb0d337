//! Timestamp Loggers
//!
//! Two wire flavors of the same idea: stamp the tick counter at a tagged
//! point in the code, flush the stamps as text later.
//!
//! - [`HexTimestampLog`] packs an 8-bit tag and the low 24 tick bits into one
//!   word and emits it as 8 hex digits.
//! - [`Base64TimestampLog`] keeps the full 32-bit tick count and a 16-bit tag
//!   and emits them as one 48-bit base64 record.

use crate::encoding::{emit_record, encode_base64_record, encode_hex_record};
use crate::error::LogError;
use crate::log::Entries;
use crate::microtag::DEFAULT_CAPACITY;
use crate::sink::ByteSink;
use crate::ticks::TickSource;

/// Tick bits kept by the hex flavor
pub const HEX_TICK_MASK: u32 = 0x00FF_FFFF;

/// Pack an 8-bit tag and the low 24 tick bits into one word
pub fn pack_hex_stamp(tag: u8, ticks: u32) -> u32 {
    (u32::from(tag) << 24) | (ticks & HEX_TICK_MASK)
}

/// Fixed-capacity log of 8-bit tagged, 24-bit tick stamps
#[derive(Debug, Clone)]
pub struct HexTimestampLog<const N: usize = DEFAULT_CAPACITY> {
    stamps: Entries<u32, N>,
}

impl<const N: usize> HexTimestampLog<N> {
    pub fn new() -> Self {
        Self {
            stamps: Entries::new(),
        }
    }

    /// Stamp the current tick count with `tag`
    pub fn set<T: TickSource + ?Sized>(
        &mut self,
        tag: u8,
        clock: &mut T,
    ) -> Result<(), LogError> {
        let ticks = clock.ticks();
        self.set_at(tag, ticks)
    }

    /// Stamp the current tick count with tag 0
    pub fn set_untagged<T: TickSource + ?Sized>(
        &mut self,
        clock: &mut T,
    ) -> Result<(), LogError> {
        self.set(0, clock)
    }

    /// Stamp an explicit tick count
    pub fn set_at(&mut self, tag: u8, ticks: u32) -> Result<(), LogError> {
        self.stamps.push(pack_hex_stamp(tag, ticks))
    }

    /// Emit every stamp as a hex line, then clear the log
    pub fn flush<K: ByteSink + ?Sized>(&mut self, sink: &mut K) {
        for &stamp in self.stamps.as_slice() {
            emit_record(sink, &encode_hex_record(stamp));
        }
        self.stamps.clear();
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    pub fn len(&self) -> usize {
        self.stamps.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Packed stamps in recording order
    pub fn stamps(&self) -> &[u32] {
        self.stamps.as_slice()
    }
}

impl<const N: usize> Default for HexTimestampLog<N> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct TaggedTicks {
    tag: u16,
    ticks: u32,
}

/// Fixed-capacity log of 16-bit tagged, full 32-bit tick stamps
#[derive(Debug, Clone)]
pub struct Base64TimestampLog<const N: usize = DEFAULT_CAPACITY> {
    stamps: Entries<TaggedTicks, N>,
}

impl<const N: usize> Base64TimestampLog<N> {
    pub fn new() -> Self {
        Self {
            stamps: Entries::new(),
        }
    }

    /// Stamp the current tick count with `tag`
    pub fn set<T: TickSource + ?Sized>(
        &mut self,
        tag: u16,
        clock: &mut T,
    ) -> Result<(), LogError> {
        let ticks = clock.ticks();
        self.set_at(tag, ticks)
    }

    /// Stamp an explicit tick count
    pub fn set_at(&mut self, tag: u16, ticks: u32) -> Result<(), LogError> {
        self.stamps.push(TaggedTicks { tag, ticks })
    }

    /// Emit every stamp as a base64 line, then clear the log
    pub fn flush<K: ByteSink + ?Sized>(&mut self, sink: &mut K) {
        for stamp in self.stamps.as_slice() {
            emit_record(sink, &encode_base64_record(stamp.ticks, stamp.tag));
        }
        self.stamps.clear();
    }

    pub fn clear(&mut self) {
        self.stamps.clear();
    }

    pub fn len(&self) -> usize {
        self.stamps.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const N: usize> Default for Base64TimestampLog<N> {
    fn default() -> Self {
        Self::new()
    }
}
