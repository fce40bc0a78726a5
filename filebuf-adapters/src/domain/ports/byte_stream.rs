//! ByteStream port - a readable byte source with skip and mark/reset.
//!
//! [`std::io::Read`] covers pulling bytes. Streams that get resumed after a
//! failure also need to skip ahead, report how much can be read without
//! blocking, and optionally rewind to a mark. Those operations live here so
//! the resumable reader can forward them to whatever stream it wraps.

use std::io::{self, Read};

/// Scratch size used by the default [`ByteStream::skip`].
const SKIP_CHUNK: usize = 2048;

/// A readable byte stream.
///
/// Every method has a default, so plain readers only need an empty impl.
/// The defaults skip by reading and discarding, report nothing available,
/// and do not support marks.
pub trait ByteStream: Read {
    /// Skip up to `n` bytes. Returns the number skipped, which is less than
    /// `n` only at end of stream.
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let mut scratch = [0u8; SKIP_CHUNK];
        let mut skipped = 0u64;
        while skipped < n {
            let want = (n - skipped).min(SKIP_CHUNK as u64) as usize;
            match self.read(&mut scratch[..want]) {
                Ok(0) => break,
                Ok(read) => skipped += read as u64,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        }
        Ok(skipped)
    }

    /// Bytes readable without blocking, as an estimate.
    fn available(&mut self) -> io::Result<usize> {
        Ok(0)
    }

    /// Whether [`mark`](ByteStream::mark) and [`reset`](ByteStream::reset)
    /// work on this stream. Streams that open lazily may have to open first,
    /// which can fail.
    fn mark_supported(&mut self) -> io::Result<bool> {
        Ok(false)
    }

    /// Remember the current position. `read_limit` is how many bytes may be
    /// read before the mark is allowed to become invalid. Does nothing on
    /// streams without mark support.
    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        let _ = read_limit;
        Ok(())
    }

    /// Go back to the last mark.
    fn reset(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "mark/reset not supported",
        ))
    }
}

impl<'a> ByteStream for &'a [u8] {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let rest: &'a [u8] = *self;
        let n = n.min(rest.len() as u64) as usize;
        *self = &rest[n..];
        Ok(n as u64)
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(self.len())
    }
}

impl<T: AsRef<[u8]>> ByteStream for io::Cursor<T> {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let len = self.get_ref().as_ref().len() as u64;
        let position = self.position().min(len);
        let n = n.min(len - position);
        self.set_position(position + n);
        Ok(n)
    }

    fn available(&mut self) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len() as u64;
        Ok(len.saturating_sub(self.position()) as usize)
    }
}

impl ByteStream for io::Empty {}

impl ByteStream for std::fs::File {}

impl<R: Read> ByteStream for io::BufReader<R> {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.buffer().len())
    }
}

impl<S: ByteStream + ?Sized> ByteStream for &mut S {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }

    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }

    fn mark_supported(&mut self) -> io::Result<bool> {
        (**self).mark_supported()
    }

    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        (**self).mark(read_limit)
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}

impl<S: ByteStream + ?Sized> ByteStream for Box<S> {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        (**self).skip(n)
    }

    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }

    fn mark_supported(&mut self) -> io::Result<bool> {
        (**self).mark_supported()
    }

    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        (**self).mark(read_limit)
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }
}
