//! Write cursor entity - the buffer being filled by the write adapter.

use super::HeldBuffer;
use filebuf_spi::Buffer;

/// A held buffer plus the number of bytes written into it so far.
///
/// Outside of a write in progress the held buffer always has spare capacity:
/// a buffer that becomes full is taken out with
/// [`take_filled`](WriteCursor::take_filled) and handed to the sink.
pub struct WriteCursor<B: Buffer> {
    held: HeldBuffer<B>,
    position: usize,
}

impl<B: Buffer> WriteCursor<B> {
    /// Create a cursor with no buffer.
    pub const fn new() -> Self {
        Self {
            held: HeldBuffer::empty(),
            position: 0,
        }
    }

    /// Create a cursor writing into `buffer` from index 0.
    pub const fn holding(buffer: B) -> Self {
        Self {
            held: HeldBuffer::holding(buffer),
            position: 0,
        }
    }

    /// Whether a real buffer is held.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.held.is_held()
    }

    /// Bytes written into the current buffer and not handed off yet.
    #[inline]
    pub const fn pending(&self) -> usize {
        self.position
    }

    /// Room left in the current buffer.
    #[inline]
    pub fn spare(&self) -> usize {
        self.held.get().capacity().saturating_sub(self.position)
    }

    /// Whether the current buffer exists and has no room left.
    #[inline]
    pub fn is_full(&self) -> bool {
        self.is_held() && self.spare() == 0
    }

    /// Start filling `buffer`, releasing any buffer held before.
    pub fn load(&mut self, buffer: B) {
        self.held.replace(buffer);
        self.position = 0;
    }

    /// Copy as much of `source` as fits. Returns the number of bytes copied.
    pub fn copy_in(&mut self, source: &[u8]) -> usize {
        let n = self.spare().min(source.len());
        if n == 0 {
            return 0;
        }
        if let Some(buffer) = self.held.get_mut() {
            buffer.set_bytes(self.position, &source[..n]);
        }
        self.position += n;
        n
    }

    /// Take the buffer out if it has pending bytes, with its limit set to
    /// the pending length. The cursor is left without a buffer.
    pub fn take_filled(&mut self) -> Option<B> {
        if self.position == 0 {
            return None;
        }
        let mut buffer = self.held.take()?;
        buffer.set_limit(self.position);
        self.position = 0;
        Some(buffer)
    }

    /// Release the current buffer, discarding its pending bytes.
    pub fn release(&mut self) {
        self.held.release();
        self.position = 0;
    }
}

impl<B: Buffer> Default for WriteCursor<B> {
    fn default() -> Self {
        Self::new()
    }
}
