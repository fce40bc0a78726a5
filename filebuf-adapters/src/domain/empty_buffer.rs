//! The shared zero-capacity buffer.

use filebuf_spi::Buffer;

/// A zero-capacity buffer that ignores every operation.
///
/// Adapters use it as the "no buffer held" sentinel, so every access site can
/// ask the current buffer for its limit or capacity without checking for
/// absence first. Releasing it does nothing.
///
/// There is a single shared instance, [`EmptyBuffer::instance`]. It holds no
/// state, so sharing it between adapters and threads is free.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyBuffer {
    _private: (),
}

static INSTANCE: EmptyBuffer = EmptyBuffer { _private: () };

impl EmptyBuffer {
    /// The process-wide instance.
    #[inline]
    pub fn instance() -> &'static EmptyBuffer {
        &INSTANCE
    }
}

impl Buffer for EmptyBuffer {
    #[inline]
    fn capacity(&self) -> usize {
        0
    }

    #[inline]
    fn limit(&self) -> usize {
        0
    }

    fn set_limit(&mut self, _limit: usize) {}

    fn get_bytes(&self, _index: usize, _dest: &mut [u8]) {}

    fn set_bytes(&mut self, _index: usize, _source: &[u8]) {}

    fn release(self) {}
}
