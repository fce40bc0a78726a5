//! Read cursor entity - the buffer being drained by the read adapter.

use super::HeldBuffer;
use filebuf_spi::Buffer;

/// A held buffer plus the position of the next unread byte.
///
/// Invariant: `0 <= position <= buffer.limit()`. When the position reaches
/// the limit the buffer is released on the spot, so a cursor never holds an
/// exhausted buffer after a read returns.
pub struct ReadCursor<B: Buffer> {
    held: HeldBuffer<B>,
    position: usize,
}

impl<B: Buffer> ReadCursor<B> {
    /// Create a cursor with no buffer.
    pub const fn new() -> Self {
        Self {
            held: HeldBuffer::empty(),
            position: 0,
        }
    }

    /// Unread bytes in the current buffer.
    #[inline]
    pub fn remaining(&self) -> usize {
        self.held.get().limit().saturating_sub(self.position)
    }

    /// Whether the current buffer has no unread bytes (or there is none).
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.position >= self.held.get().limit()
    }

    /// Position of the next unread byte.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Whether a real buffer is held.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held.is_held()
    }

    /// Start draining `buffer`, releasing any buffer held before.
    pub fn load(&mut self, buffer: B) {
        self.held.replace(buffer);
        self.position = 0;
    }

    /// Release the current buffer, discarding its unread bytes.
    pub fn release(&mut self) {
        self.held.release();
        self.position = 0;
    }

    /// Take the next byte, releasing the buffer if it was the last one.
    pub fn next_byte(&mut self) -> Option<u8> {
        if self.is_exhausted() {
            return None;
        }
        let mut byte = [0u8; 1];
        self.held.get().get_bytes(self.position, &mut byte);
        self.position += 1;
        if self.is_exhausted() {
            self.release();
        }
        Some(byte[0])
    }

    /// Consume up to `len` bytes from the current buffer.
    ///
    /// Bytes are copied into `dest` when given; with `None` they are
    /// discarded. Returns the number of bytes consumed, which is less than
    /// `len` when the buffer runs out first. A buffer that ends up fully
    /// consumed is released before returning.
    ///
    /// # Panics
    ///
    /// Panics if `dest` is shorter than the number of bytes consumed.
    pub fn consume(&mut self, dest: Option<&mut [u8]>, len: usize) -> usize {
        let remaining = self.remaining();
        let n = remaining.min(len);
        if let Some(dest) = dest {
            self.held.get().get_bytes(self.position, &mut dest[..n]);
        }
        if n == remaining {
            self.release();
        } else {
            self.position += n;
        }
        n
    }
}

impl<B: Buffer> Default for ReadCursor<B> {
    fn default() -> Self {
        Self::new()
    }
}
