//! Fixed-Capacity Byte Ring Buffer
//!
//! A single-producer/single-consumer byte queue over caller-provided memory,
//! with a length-prefixed framing protocol layered on top. Nothing allocates,
//! blocks or fails loudly: raw operations truncate to what fits, and frame
//! operations are all-or-nothing.
//!
//! ```
//! use ring_buffer::RingBuffer;
//!
//! let mut buffer = RingBuffer::new([0u8; 64]);
//! buffer.write_frame(b"ping");
//!
//! let mut out = [0u8; 16];
//! let n = buffer.read_frame(&mut out);
//! assert_eq!(&out[..n], b"ping");
//! ```
//!
//! There is no internal locking. A producer and a consumer running in
//! different contexts must either restrict themselves to write-class and
//! read-class operations respectively, on a platform with atomic `usize`
//! loads and stores, or wrap every call in a critical section.

mod buffer;
mod error;
mod frame;
mod message;
pub mod wire;

pub use buffer::RingBuffer;
pub use error::{FrameError, MessageError};
pub use wire::{LengthPrefix, PREFIX_WIDTH};
