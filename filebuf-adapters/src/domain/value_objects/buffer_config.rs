//! Buffer configuration value object.

use crate::domain::error::ConfigError;

/// Configuration of the buffers handed out by an allocator.
///
/// Holds the capacity every allocated buffer gets. The capacity is validated
/// once, here, so adapters never have to deal with zero-capacity buffers
/// coming from a misconfigured allocator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferConfig {
    capacity: usize,
}

impl BufferConfig {
    /// Capacity used by [`BufferConfig::default`].
    pub const DEFAULT_CAPACITY: usize = presets::BUFFER_32K;

    /// Create a configuration with the given buffer capacity.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use filebuf_adapters::domain::BufferConfig;
    ///
    /// let config = BufferConfig::new(4096).unwrap();
    /// assert_eq!(config.capacity(), 4096);
    /// assert!(BufferConfig::new(0).is_err());
    /// ```
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self { capacity })
    }

    /// Get the buffer capacity in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of buffers needed to hold `len` bytes.
    #[inline]
    pub const fn buffers_for(&self, len: u64) -> u64 {
        len.div_ceil(self.capacity as u64)
    }
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            capacity: Self::DEFAULT_CAPACITY,
        }
    }
}

/// Common buffer capacities.
pub mod presets {
    /// 4KB buffers.
    pub const BUFFER_4K: usize = 4 * 1024;

    /// 8KB buffers.
    pub const BUFFER_8K: usize = 8 * 1024;

    /// 32KB buffers (the default).
    pub const BUFFER_32K: usize = 32 * 1024;

    /// 64KB buffers.
    pub const BUFFER_64K: usize = 64 * 1024;

    /// 128KB buffers.
    pub const BUFFER_128K: usize = 128 * 1024;

    /// 1MB buffers, for large sequential transfers.
    pub const BUFFER_1M: usize = 1024 * 1024;
}
