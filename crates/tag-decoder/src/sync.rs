//! Two-Node Clock Offset Estimation
//!
//! Node A sends a request (tag 1a), node B receives it (2b) and replies (3b),
//! node A receives the reply (4a). Assuming symmetric link latency, the
//! offset of B's counter relative to A's is
//! `c2b - ((c4a - c1a) - (c3b - c2b)) / 2 - c1a`.

use crate::error::DecoderError;
use crate::parse::Timestamp;
use crate::settings::SyncTags;
use microtags::HEX_TICK_MASK;
use tracing::debug;

/// Counter offset B - A for each synchronization round, modulo 2^24
pub fn estimate_clock_offsets(
    a: &[Timestamp],
    b: &[Timestamp],
    tags: &SyncTags,
) -> Result<Vec<u32>, DecoderError> {
    let counters = |stamps: &[Timestamp], tag: u8| -> Vec<u64> {
        stamps
            .iter()
            .filter(|stamp| stamp.tag == tag)
            .map(|stamp| stamp.counter)
            .collect()
    };
    let sent = counters(a, tags.request_sent);
    let received = counters(b, tags.request_received);
    let replied = counters(b, tags.reply_sent);
    let acknowledged = counters(a, tags.reply_received);

    let counts = [sent.len(), received.len(), replied.len(), acknowledged.len()];
    if counts.iter().any(|&count| count != counts[0]) {
        return Err(DecoderError::SyncMismatch { counts });
    }
    debug!(rounds = counts[0], "estimating clock offset");

    let modulus = i64::from(HEX_TICK_MASK) + 1;
    let offsets = (0..counts[0])
        .map(|i| {
            let (c1a, c2b) = (sent[i] as f64, received[i] as f64);
            let (c3b, c4a) = (replied[i] as f64, acknowledged[i] as f64);
            let delta = c2b - 0.5 * (c4a - c1a - c3b + c2b) - c1a;
            (delta as i64).rem_euclid(modulus) as u32
        })
        .collect();
    Ok(offsets)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stamp(tag: u8, counter: u64) -> Timestamp {
        Timestamp { tag, counter }
    }

    #[test]
    fn test_offset_with_symmetric_latency() {
        let tags = SyncTags::default();
        // B runs 100 ticks ahead, 5 ticks each way, B takes 10 ticks to reply
        let a = [stamp(0x02, 1000), stamp(0x09, 1010), stamp(0x05, 1020)];
        let b = [stamp(0x03, 1105), stamp(0x04, 1115)];

        assert_eq!(estimate_clock_offsets(&a, &b, &tags).unwrap(), vec![100]);
    }

    #[test]
    fn test_negative_offset_wraps() {
        let tags = SyncTags::default();
        let a = [stamp(0x02, 1000), stamp(0x05, 1020)];
        let b = [stamp(0x03, 955), stamp(0x04, 965)];

        assert_eq!(
            estimate_clock_offsets(&a, &b, &tags).unwrap(),
            vec![(1 << 24) - 50]
        );
    }

    #[test]
    fn test_multiple_rounds() {
        let tags = SyncTags::default();
        let a = [
            stamp(0x02, 0),
            stamp(0x05, 20),
            stamp(0x02, 100),
            stamp(0x05, 120),
        ];
        let b = [
            stamp(0x03, 10),
            stamp(0x04, 10),
            stamp(0x03, 112),
            stamp(0x04, 112),
        ];

        assert_eq!(estimate_clock_offsets(&a, &b, &tags).unwrap(), vec![0, 2]);
    }

    #[test]
    fn test_mismatched_rounds() {
        let tags = SyncTags::default();
        let a = [stamp(0x02, 0), stamp(0x05, 20), stamp(0x02, 40)];
        let b = [stamp(0x03, 10), stamp(0x04, 10)];

        assert!(matches!(
            estimate_clock_offsets(&a, &b, &tags),
            Err(DecoderError::SyncMismatch { counts: [2, 1, 1, 1] })
        ));
    }
}
