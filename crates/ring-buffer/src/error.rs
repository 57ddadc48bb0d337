//! Ring Buffer Error Types

use thiserror::Error;

/// Reasons a frame operation was refused
///
/// Every variant implies the buffer was left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Not enough free space for prefix and body
    #[error("frame needs {required} bytes but only {available} are free")]
    InsufficientSpace { required: usize, available: usize },

    /// Prefix or body has not fully arrived (or the prefix is corrupt)
    #[error("frame needs {required} queued bytes but only {queued} are queued")]
    Incomplete { queued: usize, required: usize },

    /// Caller buffers cannot hold the declared body
    #[error("frame body of {declared} bytes does not fit into {capacity} bytes")]
    OutputTooSmall { declared: usize, capacity: usize },

    /// Declared body is shorter than the expected header
    #[error("frame body of {declared} bytes is shorter than the {header}-byte header")]
    HeaderExceedsFrame { declared: usize, header: usize },

    /// Body length cannot be encoded in the length prefix
    #[error("frame body of {len} bytes exceeds the length prefix range")]
    TooLarge { len: usize },
}

/// Errors while moving typed messages through the buffer
#[derive(Debug, Error)]
pub enum MessageError {
    /// Framing failed
    #[error("framing error: {0}")]
    Frame(#[from] FrameError),

    /// Message could not be serialized into the scratch buffer
    #[error("failed to encode message: {0}")]
    Encode(postcard::Error),

    /// Frame body is not a valid encoding of the requested type
    #[error("failed to decode message: {0}")]
    Decode(postcard::Error),
}
