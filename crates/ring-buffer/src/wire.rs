//! Frame Wire Format
//!
//! A frame is stored as `[length prefix][header][payload]` with no padding.
//! The prefix is a 4-byte little-endian unsigned integer holding the body
//! length (header + payload), independent of the host word size.

/// Width of the length prefix in bytes
pub const PREFIX_WIDTH: usize = 4;

/// Largest body length the prefix can encode
pub const MAX_BODY_LEN: usize = u32::MAX as usize;

/// Length prefix preceding every frame body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LengthPrefix(u32);

impl LengthPrefix {
    /// Prefix for a body of `body_len` bytes, if it fits in 32 bits
    pub fn new(body_len: usize) -> Option<Self> {
        u32::try_from(body_len).ok().map(Self)
    }

    /// Declared body length
    pub fn body_len(self) -> usize {
        usize::try_from(self.0).unwrap_or(usize::MAX)
    }

    /// Total on-wire size of the frame this prefix announces
    pub fn frame_len(self) -> usize {
        self.body_len().saturating_add(PREFIX_WIDTH)
    }

    pub fn encode(self) -> [u8; PREFIX_WIDTH] {
        self.0.to_le_bytes()
    }

    pub fn decode(raw: [u8; PREFIX_WIDTH]) -> Self {
        Self(u32::from_le_bytes(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_is_little_endian() {
        let prefix = LengthPrefix::new(0x0102_0304).unwrap();
        assert_eq!(prefix.encode(), [0x04, 0x03, 0x02, 0x01]);
        assert_eq!(LengthPrefix::decode([0x04, 0x03, 0x02, 0x01]), prefix);
    }

    #[test]
    fn test_frame_len_includes_prefix() {
        let prefix = LengthPrefix::new(3).unwrap();
        assert_eq!(prefix.body_len(), 3);
        assert_eq!(prefix.frame_len(), 3 + PREFIX_WIDTH);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_oversized_body_rejected() {
        assert!(LengthPrefix::new(MAX_BODY_LEN).is_some());
        assert!(LengthPrefix::new(MAX_BODY_LEN + 1).is_none());
    }
}
