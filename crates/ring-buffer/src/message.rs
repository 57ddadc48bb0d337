//! Typed Messages
//!
//! Serde types carried as single frames, encoded with postcard into
//! caller-provided scratch memory so no allocation happens on either side.

use crate::buffer::RingBuffer;
use crate::error::MessageError;
use serde::{Deserialize, Serialize};

impl<S: AsRef<[u8]>> RingBuffer<S> {
    /// Dequeue the front frame into `scratch` and decode it as `T`
    ///
    /// A frame that is complete but does not decode is still consumed.
    pub fn read_message<'a, T: Deserialize<'a>>(
        &mut self,
        scratch: &'a mut [u8],
    ) -> Result<T, MessageError> {
        let n = self.try_read_frame(scratch)?;
        let scratch: &'a [u8] = scratch;
        postcard::from_bytes(&scratch[..n]).map_err(MessageError::Decode)
    }

    /// Decode the front frame as `T` without consuming it
    pub fn sniff_message<'a, T: Deserialize<'a>>(
        &self,
        scratch: &'a mut [u8],
    ) -> Result<T, MessageError> {
        let n = self.try_sniff_frame(scratch)?;
        let scratch: &'a [u8] = scratch;
        postcard::from_bytes(&scratch[..n]).map_err(MessageError::Decode)
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> RingBuffer<S> {
    /// Encode `msg` into `scratch` and enqueue it as one frame
    ///
    /// Returns the encoded body length. Nothing is enqueued on error.
    pub fn write_message<T: Serialize + ?Sized>(
        &mut self,
        msg: &T,
        scratch: &mut [u8],
    ) -> Result<usize, MessageError> {
        let encoded = postcard::to_slice(msg, scratch).map_err(MessageError::Encode)?;
        Ok(self.try_write_frame(encoded)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FrameError;
    use crate::wire::PREFIX_WIDTH;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Reading {
        channel: u8,
        value: i32,
    }

    #[test]
    fn test_message_round_trip() {
        let mut buffer = RingBuffer::new([0u8; 64]);
        let mut scratch = [0u8; 16];

        let written = buffer
            .write_message(&Reading { channel: 3, value: -42 }, &mut scratch)
            .unwrap();
        assert_eq!(buffer.len(), PREFIX_WIDTH + written);

        let peeked: Reading = buffer.sniff_message(&mut scratch).unwrap();
        assert_eq!(peeked, Reading { channel: 3, value: -42 });

        let read: Reading = buffer.read_message(&mut scratch).unwrap();
        assert_eq!(read, peeked);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_borrowed_message() {
        let mut buffer = RingBuffer::new(vec![0u8; 64]);
        let mut scratch = [0u8; 32];

        buffer.write_message("sensor-7", &mut scratch).unwrap();
        let name: &str = buffer.read_message(&mut scratch).unwrap();
        assert_eq!(name, "sensor-7");
    }

    #[test]
    fn test_scratch_too_small_to_encode() {
        let mut buffer = RingBuffer::new([0u8; 64]);
        let mut scratch = [0u8; 2];

        let result = buffer.write_message(&Reading { channel: 1, value: 1 << 20 }, &mut scratch);
        assert!(matches!(result, Err(MessageError::Encode(_))));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_no_space_for_message() {
        let mut buffer = RingBuffer::new([0u8; 6]);
        let mut scratch = [0u8; 16];

        let result = buffer.write_message(&Reading { channel: 1, value: 1 << 20 }, &mut scratch);
        assert!(matches!(
            result,
            Err(MessageError::Frame(FrameError::InsufficientSpace { .. }))
        ));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_undecodable_frame_is_consumed() {
        let mut buffer = RingBuffer::new([0u8; 32]);
        buffer.write_frame(&[]);
        let mut scratch = [0u8; 16];

        let result: Result<Reading, _> = buffer.read_message(&mut scratch);
        assert!(matches!(result, Err(MessageError::Decode(_))));
        assert!(buffer.is_empty());
    }
}
