//! The buffer slot owned by an adapter.

use crate::domain::EmptyBuffer;
use filebuf_spi::Buffer;

/// Holds at most one buffer, falling back to [`EmptyBuffer`] when empty.
///
/// [`get`](HeldBuffer::get) always returns a buffer: the held one, or the
/// shared empty buffer with capacity and limit zero. Releasing always leaves
/// the slot empty, so releasing twice is harmless. Dropping the slot releases
/// the held buffer.
pub struct HeldBuffer<B: Buffer> {
    buffer: Option<B>,
}

impl<B: Buffer> HeldBuffer<B> {
    /// Create an empty slot.
    pub const fn empty() -> Self {
        Self { buffer: None }
    }

    /// Create a slot holding `buffer`.
    pub const fn holding(buffer: B) -> Self {
        Self {
            buffer: Some(buffer),
        }
    }

    /// The held buffer, or the empty buffer.
    #[inline]
    pub fn get(&self) -> &dyn Buffer {
        match &self.buffer {
            Some(buffer) => buffer as &dyn Buffer,
            None => EmptyBuffer::instance(),
        }
    }

    /// Mutable access to the held buffer, if any.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut B> {
        self.buffer.as_mut()
    }

    /// Whether a real buffer is held.
    #[inline]
    pub fn is_held(&self) -> bool {
        self.buffer.is_some()
    }

    /// Hold `buffer`, releasing whatever was held before.
    pub fn replace(&mut self, buffer: B) {
        self.release();
        self.buffer = Some(buffer);
    }

    /// Give up ownership of the held buffer without releasing it.
    pub fn take(&mut self) -> Option<B> {
        self.buffer.take()
    }

    /// Release the held buffer and become empty.
    pub fn release(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            buffer.release();
        }
    }
}

impl<B: Buffer> Default for HeldBuffer<B> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<B: Buffer> Drop for HeldBuffer<B> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::HeapAllocator;
    use filebuf_spi::BufferAllocator;

    #[test]
    fn test_empty_slot_reads_as_empty_buffer() {
        let slot = HeldBuffer::<crate::adapters::HeapBuffer>::empty();
        assert!(!slot.is_held());
        assert_eq!(slot.get().capacity(), 0);
        assert_eq!(slot.get().limit(), 0);
    }

    #[test]
    fn test_release_is_idempotent() {
        let allocator = HeapAllocator::with_capacity(8).unwrap();
        let mut slot = HeldBuffer::holding(allocator.allocate());
        assert_eq!(slot.get().capacity(), 8);

        slot.release();
        slot.release();

        assert!(!slot.is_held());
        assert_eq!(allocator.stats().released(), 1);
    }

    #[test]
    fn test_replace_releases_previous() {
        let allocator = HeapAllocator::with_capacity(8).unwrap();
        let mut slot = HeldBuffer::holding(allocator.allocate());
        slot.replace(allocator.allocate());

        assert_eq!(allocator.stats().allocated(), 2);
        assert_eq!(allocator.stats().released(), 1);

        let taken = slot.take().unwrap();
        assert!(!slot.is_held());
        taken.release();
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_drop_releases_held_buffer() {
        let allocator = HeapAllocator::with_capacity(8).unwrap();
        {
            let _slot = HeldBuffer::holding(allocator.allocate());
        }
        assert_eq!(allocator.stats().outstanding(), 0);
    }
}
