//! Buffer and allocator contracts.

/// A fixed-capacity byte region handed between a file sequence and its users.
///
/// A buffer has exactly one owner at a time. Ownership moves with the value:
/// a source gives a buffer away from `poll`, a sink takes it in `add`. The
/// final owner calls [`release`](Buffer::release), which consumes the buffer
/// so it cannot be touched again.
///
/// Access is copy-based. Bytes go in through [`set_bytes`](Buffer::set_bytes)
/// and come out through [`get_bytes`](Buffer::get_bytes); indices are
/// relative to the start of the buffer.
pub trait Buffer {
    /// Total number of bytes the buffer can hold.
    fn capacity(&self) -> usize;

    /// Number of valid bytes, starting at index 0.
    fn limit(&self) -> usize;

    /// Set the number of valid bytes.
    ///
    /// # Panics
    ///
    /// Implementations panic if `limit > capacity()`.
    fn set_limit(&mut self, limit: usize);

    /// Copy `dest.len()` bytes starting at `index` into `dest`.
    ///
    /// # Panics
    ///
    /// Implementations panic if `index + dest.len()` exceeds the capacity.
    fn get_bytes(&self, index: usize, dest: &mut [u8]);

    /// Copy `source` into the buffer starting at `index`.
    ///
    /// # Panics
    ///
    /// Implementations panic if `index + source.len()` exceeds the capacity.
    fn set_bytes(&mut self, index: usize, source: &[u8]);

    /// Give the buffer back to whatever produced it.
    fn release(self)
    where
        Self: Sized;
}

/// Produces fresh, empty buffers.
pub trait BufferAllocator {
    /// The buffer type this allocator hands out.
    type Buffer: Buffer;

    /// Allocate a buffer with `limit() == 0`.
    fn allocate(&self) -> Self::Buffer;
}

impl<A: BufferAllocator + ?Sized> BufferAllocator for &A {
    type Buffer = A::Buffer;

    fn allocate(&self) -> Self::Buffer {
        (**self).allocate()
    }
}
