//! Tag Classification
//!
//! The 16-bit tag space is split into ranges that say how an entry's value
//! is to be read.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meaning of a tag, derived from its id range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagClass {
    /// `0x0000..=0x3FFF`: opens a measured span (time-based)
    Start,
    /// `0x4000..=0x7FFF`: closes a measured span (time-based)
    Stop,
    /// `0x8000..=0xBFFF`: single point in time
    Single,
    /// `0xC000..=0xEFFF`: carries a data word instead of ticks
    Data,
    /// `0xF000..=0xFFFF`
    Reserved,
}

impl TagClass {
    pub fn of(id: u16) -> Self {
        match id {
            0x0000..=0x3FFF => TagClass::Start,
            0x4000..=0x7FFF => TagClass::Stop,
            0x8000..=0xBFFF => TagClass::Single,
            0xC000..=0xEFFF => TagClass::Data,
            0xF000..=0xFFFF => TagClass::Reserved,
        }
    }

    /// Whether the entry value is a tick count
    pub fn is_time_based(&self) -> bool {
        matches!(self, TagClass::Start | TagClass::Stop | TagClass::Single)
    }
}

impl fmt::Display for TagClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TagClass::Start => "start",
            TagClass::Stop => "stop",
            TagClass::Single => "single",
            TagClass::Data => "data",
            TagClass::Reserved => "reserved",
        };
        f.write_str(name)
    }
}
