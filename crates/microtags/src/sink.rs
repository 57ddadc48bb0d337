//! Byte Sink Interface
//!
//! The single "emit one byte" capability the loggers stream their text
//! through. A UART driver, a memory-mapped log or a ring buffer can all sit
//! behind it.

use ring_buffer::RingBuffer;

/// Destination for encoded output, one byte at a time
pub trait ByteSink {
    fn emit(&mut self, byte: u8);

    fn emit_all(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.emit(byte);
        }
    }
}

impl<F: FnMut(u8)> ByteSink for F {
    fn emit(&mut self, byte: u8) {
        self(byte)
    }
}

impl ByteSink for Vec<u8> {
    fn emit(&mut self, byte: u8) {
        self.push(byte);
    }

    fn emit_all(&mut self, bytes: &[u8]) {
        self.extend_from_slice(bytes);
    }
}

/// Bytes that do not fit are dropped, as with [`RingBuffer::write`]
impl<S: AsRef<[u8]> + AsMut<[u8]>> ByteSink for RingBuffer<S> {
    fn emit(&mut self, byte: u8) {
        self.write(&[byte]);
    }

    fn emit_all(&mut self, bytes: &[u8]) {
        self.write(bytes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        let mut sink = |byte: u8| seen.push(byte);
        sink.emit_all(b"ok");
        assert_eq!(seen, b"ok");
    }

    #[test]
    fn test_ring_buffer_sink_drops_overflow() {
        let mut buffer = RingBuffer::new([0u8; 3]);
        buffer.emit_all(b"abcd");
        buffer.emit(b'e');

        let mut out = [0u8; 4];
        assert_eq!(buffer.read(&mut out), 3);
        assert_eq!(&out[..3], b"abc");
    }
}
