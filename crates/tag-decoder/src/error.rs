//! Decoder Error Types

use thiserror::Error;

/// Errors decoding a single text record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Record is not exactly 8 characters
    #[error("record must be {expected} characters, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    /// Character outside the record alphabet
    #[error("invalid character {ch:?} at position {position}")]
    InvalidCharacter { ch: char, position: usize },
}

/// Errors from the decoding tools
#[derive(Debug, Error)]
pub enum DecoderError {
    /// Input file could not be read
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration could not be loaded
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Logs disagree on how many synchronization rounds they contain
    #[error("mismatching number of synchronization points: {counts:?}")]
    SyncMismatch { counts: [usize; 4] },
}
