//! Byte Ring Buffer Implementation
//!
//! Byte store and raw stream API. Every operation truncates to what fits or
//! what is queued and reports the number of bytes actually moved.

use std::fmt;
use std::io;
use tracing::trace;

/// Fixed-capacity SPSC byte ring buffer over caller-provided storage
pub struct RingBuffer<S> {
    /// Caller-provided storage, never resized
    storage: S,
    /// Capacity in bytes (storage length at construction)
    capacity: usize,
    /// Number of unread bytes
    len: usize,
    /// Next byte to write
    write_index: usize,
    /// Next byte to read
    read_index: usize,
}

impl<S: AsRef<[u8]>> RingBuffer<S> {
    /// Bind a ring buffer to `storage`; all indices start at zero
    pub fn new(storage: S) -> Self {
        let capacity = storage.as_ref().len();
        Self {
            storage,
            capacity,
            len: 0,
            write_index: 0,
            read_index: 0,
        }
    }

    /// Release the storage; queued bytes are not preserved
    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Number of readable bytes
    pub fn len(&self) -> usize {
        self.len
    }

    /// Bytes available for writing
    pub fn space(&self) -> usize {
        self.capacity - self.len
    }

    /// Get the buffer capacity
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if buffer is full
    pub fn is_full(&self) -> bool {
        self.len == self.capacity
    }

    /// Reset to the empty state without scrubbing the storage
    pub fn clear(&mut self) {
        self.len = 0;
        self.write_index = 0;
        self.read_index = 0;
    }

    /// Copy up to `out.len()` bytes from the front without consuming them
    pub fn sniff(&self, out: &mut [u8]) -> usize {
        self.sniff_offset(0, out)
    }

    /// Copy up to `out.len()` bytes starting `offset` bytes past the front
    /// of the queued data, without consuming anything
    pub fn sniff_offset(&self, offset: usize, out: &mut [u8]) -> usize {
        let available = self.len.saturating_sub(offset);
        let n = out.len().min(available);
        if n == 0 {
            return 0;
        }
        // offset < len <= capacity, so a single wrap is enough
        let start = self.wrap(self.read_index + offset);
        self.copy_out(start, &mut out[..n]);
        n
    }

    /// Move up to `out.len()` bytes from the front into `out`
    pub fn read(&mut self, out: &mut [u8]) -> usize {
        let n = self.sniff(out);
        self.discard(n)
    }

    /// Consume up to `n` bytes without copying them
    pub fn discard(&mut self, n: usize) -> usize {
        let n = n.min(self.len);
        self.read_index = self.wrap(self.read_index + n);
        self.len -= n;
        n
    }

    /// Queued bytes as up to two slices in logical order
    ///
    /// The second slice holds the wrapped remainder and is empty when the
    /// queued data is contiguous.
    pub fn as_slices(&self) -> (&[u8], &[u8]) {
        let storage = self.storage.as_ref();
        let first = (self.capacity - self.read_index).min(self.len);
        (
            &storage[self.read_index..self.read_index + first],
            &storage[..self.len - first],
        )
    }

    /// Bring an index in `[0, 2 * capacity)` back into `[0, capacity)`
    fn wrap(&self, index: usize) -> usize {
        if index >= self.capacity {
            index - self.capacity
        } else {
            index
        }
    }

    /// Two-span copy out of storage starting at physical index `start`
    fn copy_out(&self, start: usize, out: &mut [u8]) {
        let storage = self.storage.as_ref();
        let first = (self.capacity - start).min(out.len());
        let (head, tail) = out.split_at_mut(first);
        head.copy_from_slice(&storage[start..start + first]);
        tail.copy_from_slice(&storage[..tail.len()]);
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> RingBuffer<S> {
    /// Append up to `data.len()` bytes, truncating silently to the free space
    pub fn write(&mut self, data: &[u8]) -> usize {
        let n = data.len().min(self.space());
        if n < data.len() {
            trace!(requested = data.len(), accepted = n, "ring buffer write truncated");
        }
        if n == 0 {
            return 0;
        }
        let start = self.write_index;
        self.copy_in(start, &data[..n]);
        self.write_index = self.wrap(start + n);
        self.len += n;
        n
    }

    /// Two-span copy into storage starting at physical index `start`
    fn copy_in(&mut self, start: usize, data: &[u8]) {
        let first = (self.capacity - start).min(data.len());
        let (head, tail) = data.split_at(first);
        let storage = self.storage.as_mut();
        storage[start..start + first].copy_from_slice(head);
        storage[..tail.len()].copy_from_slice(tail);
    }

    #[cfg(test)]
    pub(crate) fn storage_mut(&mut self) -> &mut [u8] {
        self.storage.as_mut()
    }
}

impl<S> fmt::Debug for RingBuffer<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RingBuffer")
            .field("capacity", &self.capacity)
            .field("len", &self.len)
            .field("write_index", &self.write_index)
            .field("read_index", &self.read_index)
            .finish()
    }
}

impl<S: AsRef<[u8]>> io::Read for RingBuffer<S> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        Ok(RingBuffer::read(self, buf))
    }
}

impl<S: AsRef<[u8]> + AsMut<[u8]>> io::Write for RingBuffer<S> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(RingBuffer::write(self, buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
