//! Read adapter - presents a [`FileInput`] as a byte stream.

use crate::domain::ports::ByteStream;
use crate::domain::ReadCursor;
use filebuf_spi::{FileInput, Result};
use log::{debug, trace};
use std::io;

/// Reads the bytes of a [`FileInput`], one file at a time.
///
/// Call [`next_file`](Self::next_file) to advance to a file, then read until
/// end of file. Reads never cross into the next file. The adapter holds at
/// most one buffer at a time and releases it as soon as its last byte is
/// consumed, when moving to the next file, and on close or drop.
///
/// # Examples
///
/// ```
/// use filebuf_adapters::adapters::{FileInputReader, HeapAllocator, ListFileInput};
///
/// let allocator = HeapAllocator::with_capacity(8).unwrap();
/// let input = ListFileInput::new([vec![
///     allocator.allocate_from(b"hello "),
///     allocator.allocate_from(b"world"),
/// ]]);
///
/// let mut reader = FileInputReader::new(input);
/// assert!(reader.next_file().unwrap());
///
/// let mut dest = [0u8; 16];
/// assert_eq!(reader.read(&mut dest).unwrap(), 6);
/// assert_eq!(reader.read(&mut dest).unwrap(), 5);
/// assert_eq!(reader.read(&mut dest).unwrap(), 0);
/// assert!(!reader.next_file().unwrap());
/// ```
pub struct FileInputReader<I: FileInput> {
    input: I,
    cursor: ReadCursor<I::Buffer>,
}

impl<I: FileInput> FileInputReader<I> {
    /// Wrap a file input. No file is selected until [`next_file`](Self::next_file).
    pub fn new(input: I) -> Self {
        Self {
            input,
            cursor: ReadCursor::new(),
        }
    }

    /// Move to the next file, dropping whatever is left of the current one.
    ///
    /// Returns `false` when the input has no more files.
    pub fn next_file(&mut self) -> Result<bool> {
        self.cursor.release();
        let more = self.input.next_file()?;
        match self.input.current_file_hint() {
            Some(hint) if more => debug!("next_file: {}", hint),
            _ => debug!("next_file: {}", more),
        }
        Ok(more)
    }

    /// Bytes readable from the current buffer without polling the input.
    #[inline]
    pub fn available(&self) -> usize {
        self.cursor.remaining()
    }

    /// Read one byte. Returns `None` at end of the current file.
    pub fn read_byte(&mut self) -> Result<Option<u8>> {
        if !self.fill()? {
            return Ok(None);
        }
        Ok(self.cursor.next_byte())
    }

    /// Read up to `dest.len()` bytes from the current file.
    ///
    /// Returns `0` at end of file, or right away when `dest` is empty. A
    /// non-empty read returns at least one byte and at most what is left in
    /// the current buffer.
    pub fn read(&mut self, dest: &mut [u8]) -> Result<usize> {
        if dest.is_empty() || !self.fill()? {
            return Ok(0);
        }
        let len = dest.len();
        Ok(self.cursor.consume(Some(dest), len))
    }

    /// Skip up to `n` bytes of the current file, never past the current
    /// buffer. Returns the number skipped, `0` at end of file.
    pub fn skip(&mut self, n: u64) -> Result<u64> {
        if n == 0 || !self.fill()? {
            return Ok(0);
        }
        let len = usize::try_from(n).unwrap_or(usize::MAX);
        Ok(self.cursor.consume(None, len) as u64)
    }

    /// Release the held buffer and close the input.
    pub fn close(&mut self) -> Result<()> {
        self.cursor.release();
        debug!("closing file input");
        self.input.close()
    }

    /// Description of the file being read, if the input provides one.
    pub fn current_file_hint(&self) -> Option<&str> {
        self.input.current_file_hint()
    }

    /// Gets a reference to the wrapped input.
    pub fn get_ref(&self) -> &I {
        &self.input
    }

    /// Gets a mutable reference to the wrapped input.
    pub fn get_mut(&mut self) -> &mut I {
        &mut self.input
    }

    /// Make sure the cursor has unread bytes, polling the input as needed.
    /// Returns `false` at end of file.
    fn fill(&mut self) -> Result<bool> {
        while self.cursor.is_exhausted() {
            self.cursor.release();
            match self.input.poll()? {
                Some(buffer) => {
                    trace!("polled buffer");
                    self.cursor.load(buffer);
                }
                None => return Ok(false),
            }
        }
        Ok(true)
    }
}

impl<I: FileInput> io::Read for FileInputReader<I> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        FileInputReader::read(self, buf).map_err(Into::into)
    }
}

impl<I: FileInput> ByteStream for FileInputReader<I> {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        FileInputReader::skip(self, n).map_err(Into::into)
    }

    fn available(&mut self) -> io::Result<usize> {
        Ok(FileInputReader::available(self))
    }
}
