//! Heap-allocated buffers and their allocator.

use crate::domain::{BufferConfig, ConfigError};
use core::fmt;
use core::sync::atomic::{AtomicUsize, Ordering};
use filebuf_spi::{Buffer, BufferAllocator};
use std::sync::Arc;

/// Counters shared by an allocator and every buffer it handed out.
///
/// `outstanding()` is the number of buffers allocated and not released yet.
/// It drops back to zero once every buffer made its way back through
/// [`Buffer::release`].
#[derive(Debug, Default)]
pub struct AllocatorStats {
    allocated: AtomicUsize,
    released: AtomicUsize,
}

impl AllocatorStats {
    /// Buffers allocated so far.
    pub fn allocated(&self) -> usize {
        self.allocated.load(Ordering::Relaxed)
    }

    /// Buffers released so far.
    pub fn released(&self) -> usize {
        self.released.load(Ordering::Relaxed)
    }

    /// Buffers allocated and not released yet.
    pub fn outstanding(&self) -> usize {
        self.allocated().saturating_sub(self.released())
    }
}

/// A buffer backed by a heap slice.
///
/// Buffers made by a [`HeapAllocator`] report their release back to the
/// allocator's [`AllocatorStats`]; buffers made with [`HeapBuffer::new`] are
/// untracked.
pub struct HeapBuffer {
    data: Box<[u8]>,
    limit: usize,
    stats: Option<Arc<AllocatorStats>>,
}

impl HeapBuffer {
    /// Create an untracked, empty buffer of the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            data: vec![0u8; capacity].into_boxed_slice(),
            limit: 0,
            stats: None,
        }
    }

    /// Create an untracked buffer holding exactly `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self {
            data: bytes.into(),
            limit: bytes.len(),
            stats: None,
        }
    }

    /// The valid bytes, `[0, limit)`.
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.limit]
    }
}

impl Buffer for HeapBuffer {
    #[inline]
    fn capacity(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn limit(&self) -> usize {
        self.limit
    }

    fn set_limit(&mut self, limit: usize) {
        assert!(
            limit <= self.data.len(),
            "limit {} exceeds capacity {}",
            limit,
            self.data.len()
        );
        self.limit = limit;
    }

    fn get_bytes(&self, index: usize, dest: &mut [u8]) {
        dest.copy_from_slice(&self.data[index..index + dest.len()]);
    }

    fn set_bytes(&mut self, index: usize, source: &[u8]) {
        self.data[index..index + source.len()].copy_from_slice(source);
    }

    fn release(self) {
        if let Some(stats) = &self.stats {
            stats.released.fetch_add(1, Ordering::Relaxed);
        }
    }
}

impl fmt::Debug for HeapBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeapBuffer")
            .field("capacity", &self.data.len())
            .field("limit", &self.limit)
            .field("tracked", &self.stats.is_some())
            .finish()
    }
}

/// Allocates [`HeapBuffer`]s of a configured capacity.
///
/// Cloning the allocator shares its statistics.
///
/// # Examples
///
/// ```
/// use filebuf_adapters::adapters::HeapAllocator;
/// use filebuf_adapters::domain::presets;
/// use filebuf_spi::{Buffer, BufferAllocator};
///
/// let allocator = HeapAllocator::with_capacity(presets::BUFFER_4K).unwrap();
/// let buffer = allocator.allocate();
/// assert_eq!(buffer.capacity(), 4096);
/// buffer.release();
/// assert_eq!(allocator.stats().outstanding(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HeapAllocator {
    config: BufferConfig,
    stats: Arc<AllocatorStats>,
}

impl HeapAllocator {
    /// Create an allocator for the given configuration.
    pub fn new(config: BufferConfig) -> Self {
        Self {
            config,
            stats: Arc::new(AllocatorStats::default()),
        }
    }

    /// Create an allocator handing out buffers of `capacity` bytes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Result<Self, ConfigError> {
        Ok(Self::new(BufferConfig::new(capacity)?))
    }

    /// The configuration buffers are allocated with.
    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    /// Allocation counters of this allocator and its clones.
    pub fn stats(&self) -> &AllocatorStats {
        &self.stats
    }

    /// Allocate a tracked buffer holding exactly `bytes`, whatever the
    /// configured capacity.
    pub fn allocate_from(&self, bytes: &[u8]) -> HeapBuffer {
        self.stats.allocated.fetch_add(1, Ordering::Relaxed);
        HeapBuffer {
            data: bytes.into(),
            limit: bytes.len(),
            stats: Some(Arc::clone(&self.stats)),
        }
    }
}

impl BufferAllocator for HeapAllocator {
    type Buffer = HeapBuffer;

    fn allocate(&self) -> HeapBuffer {
        self.stats.allocated.fetch_add(1, Ordering::Relaxed);
        HeapBuffer {
            data: vec![0u8; self.config.capacity()].into_boxed_slice(),
            limit: 0,
            stats: Some(Arc::clone(&self.stats)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_uses_configured_capacity() {
        let allocator = HeapAllocator::with_capacity(16).unwrap();
        let buffer = allocator.allocate();
        assert_eq!(buffer.capacity(), 16);
        assert_eq!(buffer.limit(), 0);
        buffer.release();
    }

    #[test]
    fn test_invalid_capacity() {
        assert!(HeapAllocator::with_capacity(0).is_err());
    }

    #[test]
    fn test_set_and_get_bytes() {
        let mut buffer = HeapBuffer::new(8);
        buffer.set_bytes(2, b"xyz");
        buffer.set_limit(5);

        let mut dest = [0u8; 3];
        buffer.get_bytes(2, &mut dest);
        assert_eq!(&dest, b"xyz");
        assert_eq!(buffer.as_slice(), &[0, 0, b'x', b'y', b'z']);
    }

    #[test]
    #[should_panic(expected = "exceeds capacity")]
    fn test_limit_beyond_capacity_panics() {
        HeapBuffer::new(2).set_limit(3);
    }

    #[test]
    fn test_stats_shared_between_clones() {
        let allocator = HeapAllocator::with_capacity(4).unwrap();
        let clone = allocator.clone();

        let a = allocator.allocate();
        let b = clone.allocate_from(b"abc");
        assert_eq!(allocator.stats().allocated(), 2);
        assert_eq!(clone.stats().outstanding(), 2);

        a.release();
        b.release();
        assert_eq!(allocator.stats().released(), 2);
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_untracked_buffer_release() {
        let buffer = HeapBuffer::from_bytes(b"abc");
        assert_eq!(buffer.capacity(), 3);
        assert_eq!(buffer.as_slice(), b"abc");
        buffer.release();
    }
}
