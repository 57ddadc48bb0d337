//! Frame Protocol
//!
//! Length-prefixed message framing built only on the raw stream API. A frame
//! is reported as present only once its prefix and full body are queued, and
//! every refused operation leaves the buffer exactly as it was, so callers can
//! simply poll again once more bytes arrive.
//!
//! The `usize`-returning operations collapse every refusal to 0. The `try_*`
//! variants run the same logic and report why.

use crate::buffer::RingBuffer;
use crate::error::FrameError;
use crate::wire::{LengthPrefix, PREFIX_WIDTH};
use tracing::{debug, trace};

impl<S: AsRef<[u8]>> RingBuffer<S> {
    /// Body length of the complete frame starting `offset` bytes past the front
    fn frame_at(&self, offset: usize) -> Result<usize, FrameError> {
        let queued = self.len().saturating_sub(offset);
        let mut raw = [0u8; PREFIX_WIDTH];
        if self.sniff_offset(offset, &mut raw) != PREFIX_WIDTH {
            return Err(FrameError::Incomplete {
                queued,
                required: PREFIX_WIDTH,
            });
        }

        let prefix = LengthPrefix::decode(raw);
        if prefix.frame_len() > queued {
            return Err(FrameError::Incomplete {
                queued,
                required: prefix.frame_len(),
            });
        }
        Ok(prefix.body_len())
    }

    /// Body length of the frame at the front, or 0 if no complete frame is queued
    pub fn sniff_frame_length(&self) -> usize {
        self.frame_at(0).unwrap_or(0)
    }

    /// Copy the front frame into `out` without consuming it
    pub fn sniff_frame(&self, out: &mut [u8]) -> usize {
        refused_as_zero(self.try_sniff_frame(out))
    }

    /// Like [`RingBuffer::sniff_frame`]; `Incomplete` or `OutputTooSmall` on refusal
    pub fn try_sniff_frame(&self, out: &mut [u8]) -> Result<usize, FrameError> {
        let declared = self.frame_at(0)?;
        if out.len() < declared {
            return Err(FrameError::OutputTooSmall {
                declared,
                capacity: out.len(),
            });
        }
        Ok(self.sniff_offset(PREFIX_WIDTH, &mut out[..declared]))
    }

    /// Move the front frame into `out`
    ///
    /// Returns the body length, or 0 without consuming anything if no complete
    /// frame is queued or `out` is too small.
    pub fn read_frame(&mut self, out: &mut [u8]) -> usize {
        refused_as_zero(self.try_read_frame(out))
    }

    /// Like [`RingBuffer::read_frame`]; `Incomplete` or `OutputTooSmall` on refusal
    pub fn try_read_frame(&mut self, out: &mut [u8]) -> Result<usize, FrameError> {
        let declared = self.frame_at(0)?;
        if out.len() < declared {
            return Err(FrameError::OutputTooSmall {
                declared,
                capacity: out.len(),
            });
        }
        self.discard(PREFIX_WIDTH);
        Ok(self.read(&mut out[..declared]))
    }

    /// Drop the front frame; returns prefix + body bytes discarded, or 0
    pub fn discard_frame(&mut self) -> usize {
        refused_as_zero(self.try_discard_frame())
    }

    /// Like [`RingBuffer::discard_frame`]; `Incomplete` if no complete frame is queued
    pub fn try_discard_frame(&mut self) -> Result<usize, FrameError> {
        let declared = self.frame_at(0)?;
        Ok(self.discard(PREFIX_WIDTH + declared))
    }

    /// Number of complete frames queued
    ///
    /// Returns 0 for the whole queue as soon as one prefix is unreadable or
    /// overruns the queued bytes: a misaligned length-prefixed stream cannot
    /// be resynchronized.
    pub fn count_frames(&self) -> usize {
        let mut offset = 0;
        let mut frames = 0;
        while offset < self.len() {
            match self.frame_at(offset) {
                Ok(declared) => {
                    offset += PREFIX_WIDTH + declared;
                    frames += 1;
                }
                Err(err) => {
                    debug!(offset, frames, %err, "frame scan aborted");
                    return 0;
                }
            }
        }
        frames
    }

    /// Copy the front frame into separate header and payload buffers without
    /// consuming it; returns the payload length
    pub fn sniff_frame_with_header(&self, header: &mut [u8], payload: &mut [u8]) -> usize {
        refused_as_zero(self.try_sniff_frame_with_header(header, payload))
    }

    /// Like [`RingBuffer::sniff_frame_with_header`]
    ///
    /// Refused with `Incomplete`, `HeaderExceedsFrame` or `OutputTooSmall`.
    pub fn try_sniff_frame_with_header(
        &self,
        header: &mut [u8],
        payload: &mut [u8],
    ) -> Result<usize, FrameError> {
        let payload_len = self.split_frame(header.len(), payload.len())?;
        self.sniff_offset(PREFIX_WIDTH, header);
        Ok(self.sniff_offset(PREFIX_WIDTH + header.len(), &mut payload[..payload_len]))
    }

    /// Move the front frame into separate header and payload buffers;
    /// returns the payload length
    pub fn read_frame_with_header(&mut self, header: &mut [u8], payload: &mut [u8]) -> usize {
        refused_as_zero(self.try_read_frame_with_header(header, payload))
    }

    /// Like [`RingBuffer::read_frame_with_header`]; nothing is consumed on `Err`
    pub fn try_read_frame_with_header(
        &mut self,
        header: &mut [u8],
        payload: &mut [u8],
    ) -> Result<usize, FrameError> {
        let payload_len = self.split_frame(header.len(), payload.len())?;
        self.discard(PREFIX_WIDTH);
        self.read(header);
        Ok(self.read(&mut payload[..payload_len]))
    }

    /// Payload length of the front frame once `header_len` bytes of its body
    /// are taken as header
    fn split_frame(
        &self,
        header_len: usize,
        payload_capacity: usize,
    ) -> Result<usize, FrameError> {
        let declared = self.frame_at(0)?;
        let payload_len = declared
            .checked_sub(header_len)
            .ok_or(FrameError::HeaderExceedsFrame {
                declared,
                header: header_len,
            })?;
        if payload_len > payload_capacity {
            return Err(FrameError::OutputTooSmall {
                declared,
                capacity: header_len.saturating_add(payload_capacity),
            });
        }
        Ok(payload_len)
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> RingBuffer<S> {
    /// Enqueue `payload` as one frame, all-or-nothing
    ///
    /// Returns the payload length, or 0 if the whole frame does not fit.
    pub fn write_frame(&mut self, payload: &[u8]) -> usize {
        refused_as_zero(self.try_write_frame(payload))
    }

    /// Like [`RingBuffer::write_frame`]; `InsufficientSpace` or `TooLarge` on refusal
    pub fn try_write_frame(&mut self, payload: &[u8]) -> Result<usize, FrameError> {
        self.try_write_frame_with_header(&[], payload)
    }

    /// Enqueue `header` followed by `payload` as one frame whose prefix
    /// covers both; same wire format as [`RingBuffer::write_frame`]
    pub fn write_frame_with_header(&mut self, header: &[u8], payload: &[u8]) -> usize {
        refused_as_zero(self.try_write_frame_with_header(header, payload))
    }

    /// Like [`RingBuffer::write_frame_with_header`]; nothing is enqueued on `Err`
    pub fn try_write_frame_with_header(
        &mut self,
        header: &[u8],
        payload: &[u8],
    ) -> Result<usize, FrameError> {
        let body_len = header.len().saturating_add(payload.len());
        let prefix = LengthPrefix::new(body_len).ok_or(FrameError::TooLarge { len: body_len })?;
        if prefix.frame_len() > self.space() {
            return Err(FrameError::InsufficientSpace {
                required: prefix.frame_len(),
                available: self.space(),
            });
        }

        self.write(&prefix.encode());
        self.write(header);
        Ok(self.write(payload))
    }
}

fn refused_as_zero(result: Result<usize, FrameError>) -> usize {
    result.unwrap_or_else(|err| {
        trace!(%err, "frame operation refused");
        0
    })
}
