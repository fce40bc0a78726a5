//! Write adapter - presents a [`FileOutput`] as a byte sink.

use crate::domain::{CloseMode, WriteCursor};
use filebuf_spi::{Buffer, BufferAllocator, Error, FileOutput, Result};
use log::{debug, trace, warn};
use std::io;

/// Writes bytes into buffers from an allocator and hands every filled buffer
/// to a [`FileOutput`].
///
/// A buffer goes to the sink as soon as it is full, so the adapter never
/// holds a full buffer after a write returns. [`flush`](Self::flush) hands
/// over a partly filled buffer; [`finish`](Self::finish) does the same and
/// then finishes the sink. What [`close`](Self::close) does to the sink is
/// chosen with a [`CloseMode`].
///
/// # Examples
///
/// ```
/// use filebuf_adapters::adapters::{FileOutputWriter, HeapAllocator, ListFileOutput};
/// use filebuf_adapters::domain::CloseMode;
///
/// let allocator = HeapAllocator::with_capacity(4).unwrap();
/// let mut writer =
///     FileOutputWriter::new(ListFileOutput::new(), &allocator, CloseMode::FlushFinishClose);
///
/// writer.next_file().unwrap();
/// writer.write(b"hello world").unwrap();
/// writer.close().unwrap();
///
/// let output = writer.get_ref();
/// assert_eq!(output.file_bytes(0), b"hello world");
/// assert_eq!(output.close_count(), 1);
/// ```
pub struct FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    output: O,
    allocator: A,
    close_mode: CloseMode,
    cursor: WriteCursor<O::Buffer>,
    closed: bool,
}

impl<O, A> FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    /// Wrap a file output. One buffer is allocated right away.
    pub fn new(output: O, allocator: A, close_mode: CloseMode) -> Self {
        let cursor = WriteCursor::holding(allocator.allocate());
        Self {
            output,
            allocator,
            close_mode,
            cursor,
            closed: false,
        }
    }

    /// What [`close`](Self::close) does to the sink.
    pub fn close_mode(&self) -> CloseMode {
        self.close_mode
    }

    /// Bytes written and not handed to the sink yet.
    pub fn pending(&self) -> usize {
        self.cursor.pending()
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Start a new file in the sink.
    ///
    /// Pending bytes are not flushed first; they end up in the new file.
    pub fn next_file(&mut self) -> Result<()> {
        self.ensure_open()?;
        debug!("next_file");
        self.output.next_file()
    }

    /// Write one byte.
    pub fn write_byte(&mut self, byte: u8) -> Result<()> {
        self.write(&[byte])
    }

    /// Write all of `source`, handing each buffer that fills up to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Closed`] after [`close`](Self::close), or whatever the
    /// sink fails with while taking a full buffer.
    pub fn write(&mut self, mut source: &[u8]) -> Result<()> {
        self.ensure_open()?;
        while !source.is_empty() {
            if !self.cursor.is_held() {
                self.cursor.load(self.allocator.allocate());
                if self.cursor.spare() == 0 {
                    self.cursor.release();
                    return Err(Error::IllegalState(
                        "allocator returned a buffer without capacity",
                    ));
                }
            }
            let copied = self.cursor.copy_in(source);
            source = &source[copied..];
            if self.cursor.is_full() {
                self.flush()?;
            }
        }
        Ok(())
    }

    /// Hand pending bytes to the sink and continue in a fresh buffer.
    ///
    /// Does nothing when there are no pending bytes.
    pub fn flush(&mut self) -> Result<()> {
        if self.hand_off()? {
            self.cursor.load(self.allocator.allocate());
        }
        Ok(())
    }

    /// Hand pending bytes to the sink, then finish the sink.
    ///
    /// The next buffer is only allocated when more bytes are written.
    pub fn finish(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.hand_off()?;
        debug!("finishing file");
        self.output.finish()
    }

    /// Run the close mode against the sink and release the held buffer.
    ///
    /// The held buffer is released even if the sink fails. Closing twice is
    /// a no-op; writing after close fails with [`Error::Closed`].
    pub fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        debug!("closing writer ({})", self.close_mode);
        let result = self.run_close_mode();
        self.cursor.release();
        result
    }

    /// Gets a reference to the wrapped output.
    pub fn get_ref(&self) -> &O {
        &self.output
    }

    /// Gets a mutable reference to the wrapped output.
    pub fn get_mut(&mut self) -> &mut O {
        &mut self.output
    }

    fn run_close_mode(&mut self) -> Result<()> {
        let mode = self.close_mode;
        if mode.flushes() {
            self.hand_off()?;
        }
        if mode.finishes() {
            self.output.finish()?;
        }
        if mode.closes() {
            self.output.close()?;
        }
        Ok(())
    }

    /// Give the held buffer to the sink if it has pending bytes. Returns
    /// whether a buffer was handed off; the cursor is then left empty.
    fn hand_off(&mut self) -> Result<bool> {
        match self.cursor.take_filled() {
            Some(buffer) => {
                trace!("handing off buffer of {} bytes", buffer.limit());
                self.output.add(buffer)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::Closed("FileOutputWriter"))
        } else {
            Ok(())
        }
    }
}

impl<O, A> Drop for FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    fn drop(&mut self) {
        if !self.closed && self.cursor.pending() > 0 {
            warn!(
                "FileOutputWriter dropped with {} unflushed bytes",
                self.cursor.pending()
            );
        }
    }
}

impl<O, A> io::Write for FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        FileOutputWriter::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        FileOutputWriter::flush(self).map_err(Into::into)
    }
}
