//! Byte streams: resumable reading and wrappers for plain readers.
//!
//! [`ResumableReader`] is written against [`ByteStream`], so the streams a
//! reopener returns must implement it. Slices, cursors, files and
//! `BufReader` already do; any other reader can be wrapped in
//! [`PlainStream`], or in [`Markable`] when it can seek and mark/reset
//! should work.

mod resumable;

#[cfg(feature = "embedded-io")]
mod embedded_io_impl;

pub use crate::domain::ByteStream;
pub use resumable::{Reopener, ResumableConfig, ResumableReader};

use std::io::{self, Read, Seek, SeekFrom};

/// Gives any reader the default [`ByteStream`] behavior: skip by reading,
/// nothing reported available, no mark support.
#[derive(Debug, Default)]
pub struct PlainStream<R> {
    inner: R,
}

impl<R: Read> PlainStream<R> {
    /// Wrap `inner`.
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for PlainStream<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read> ByteStream for PlainStream<R> {}

/// Adds mark/reset to a seekable reader.
///
/// The mark is a stream position, so the read limit passed to `mark` is
/// ignored and a reset is always possible.
#[derive(Debug)]
pub struct Markable<R> {
    inner: R,
    mark: Option<u64>,
}

impl<R: Read + Seek> Markable<R> {
    /// Wrap `inner`. Until the first mark, a reset fails.
    pub fn new(inner: R) -> Self {
        Self { inner, mark: None }
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> Read for Markable<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl<R: Read + Seek> ByteStream for Markable<R> {
    fn mark_supported(&mut self) -> io::Result<bool> {
        Ok(true)
    }

    fn mark(&mut self, _read_limit: usize) -> io::Result<()> {
        self.mark = Some(self.inner.stream_position()?);
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        match self.mark {
            Some(position) => {
                self.inner.seek(SeekFrom::Start(position))?;
                Ok(())
            }
            None => Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "reset without a mark",
            )),
        }
    }
}
