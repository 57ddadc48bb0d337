//! Tag Decoder
//!
//! Host-side tooling for logs captured from the microtag and timestamp
//! loggers: decode the text records, classify tags, rebuild timelines with
//! begin/end spans and estimate the counter offset between two nodes.

mod classify;
pub mod codec;
mod error;
mod parse;
mod settings;
mod sync;
mod timeline;

pub use classify::TagClass;
pub use error::{DecodeError, DecoderError};
pub use parse::{parse_microtags, parse_timestamps, record_lines, Parsed, Timestamp};
pub use settings::{DecoderConfig, SyncTags, TagName, ENV_PREFIX};
pub use sync::estimate_clock_offsets;
pub use timeline::{RowValue, Span, Timeline, TimelineRow};

use std::path::Path;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Read a captured log file
pub fn read_capture(path: &Path) -> Result<String, DecoderError> {
    std::fs::read_to_string(path).map_err(|source| DecoderError::Io {
        path: path.display().to_string(),
        source,
    })
}

/// Initialize logging to stderr at `level`
///
/// An unrecognized level name is an error and installs nothing.
pub fn init_logging(level: &str) -> Result<(), Box<dyn std::error::Error>> {
    let level: Level = level.parse()?;
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_capture_missing_file() {
        let err = read_capture(Path::new("/nonexistent/capture.txt")).unwrap_err();
        assert!(matches!(err, DecoderError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/capture.txt"));
    }

    #[test]
    fn test_unknown_log_level_is_an_error() {
        let err = init_logging("loud").unwrap_err();
        assert!(!err.to_string().is_empty());
    }

    #[test]
    fn test_capture_to_timeline() {
        let capture = "# node A\r\nAAAAZAAQ\r\nAAAAbgAQ\r\n";
        let parsed = parse_microtags(capture);
        assert_eq!(parsed.entries.len(), 2);

        let timeline = Timeline::from_microtags(&parsed.entries, &DecoderConfig::default());
        assert_eq!(timeline.rows[0].class, TagClass::Start);
        match timeline.rows[1].value {
            RowValue::Time { seconds } => assert!((seconds - 0.1).abs() < 1e-9),
            ref other => panic!("unexpected value {other:?}"),
        }
    }
}
