//! Microtags
//!
//! Fixed-capacity loggers for instrumenting embedded code: record a tag and a
//! tick count (or a data word) at interesting points, then stream the whole
//! batch as text lines through a [`ByteSink`] when there is time to do so.
//!
//! Each logger is an explicit value with its own storage, so several can
//! coexist and their lifetime is controlled by the caller.

pub mod encoding;
mod error;
mod log;
mod microtag;
mod sink;
mod ticks;
mod timestamp;

pub use error::LogError;
pub use microtag::{Microtag, MicrotagLog, DEFAULT_CAPACITY};
pub use sink::ByteSink;
pub use ticks::{InstantTicks, TickSource};
pub use timestamp::{pack_hex_stamp, Base64TimestampLog, HexTimestampLog, HEX_TICK_MASK};
