//! Logger Error Types

use thiserror::Error;

/// Errors while recording log entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LogError {
    /// Log already holds `capacity` entries; flush or clear it first
    #[error("log is full ({capacity} entries)")]
    Full { capacity: usize },
}
