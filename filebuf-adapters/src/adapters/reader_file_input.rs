//! File input over a sequence of [`Read`] streams.

use filebuf_spi::{Buffer, BufferAllocator, Error, FileInput, Result};
use log::debug;
use std::io::{self, Read};

/// A reader plus an optional human-readable description, such as a path.
#[derive(Debug)]
pub struct ReaderWithHint<R> {
    reader: R,
    hint: Option<String>,
}

impl<R> ReaderWithHint<R> {
    /// A reader without a hint.
    pub fn new(reader: R) -> Self {
        Self { reader, hint: None }
    }

    /// A reader described by `hint`.
    pub fn with_hint(reader: R, hint: impl Into<String>) -> Self {
        Self {
            reader,
            hint: Some(hint.into()),
        }
    }

    /// The description, if any.
    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    /// Mutable access to the reader.
    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    /// Unwrap the reader.
    pub fn into_inner(self) -> R {
        self.reader
    }
}

/// Hands out the readers behind a [`ReaderFileInput`], one per file.
pub trait ReaderProvider {
    /// The reader type of every file.
    type Reader: Read;

    /// Open the next file. `Ok(None)` means there are no more files.
    fn open_next(&mut self) -> io::Result<Option<ReaderWithHint<Self::Reader>>>;

    /// Called once from [`FileInput::close`] after the current reader has
    /// been dropped.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Provides the readers of an iterator, in order.
#[derive(Debug)]
pub struct IterReaderProvider<I> {
    readers: I,
}

impl<I> IterReaderProvider<I> {
    /// Provide the readers yielded by `readers`.
    pub fn new<T: IntoIterator<IntoIter = I>>(readers: T) -> Self {
        Self {
            readers: readers.into_iter(),
        }
    }
}

impl<I, R> ReaderProvider for IterReaderProvider<I>
where
    I: Iterator<Item = R>,
    R: Read,
{
    type Reader = R;

    fn open_next(&mut self) -> io::Result<Option<ReaderWithHint<R>>> {
        Ok(self.readers.next().map(ReaderWithHint::new))
    }

    fn close(&mut self) -> io::Result<()> {
        let unread = self.readers.by_ref().count();
        if unread > 0 {
            debug!("dropping {} unopened readers", unread);
        }
        Ok(())
    }
}

/// Provides a single reader as the only file.
#[derive(Debug)]
pub struct SingleReaderProvider<R> {
    reader: Option<ReaderWithHint<R>>,
}

impl<R> SingleReaderProvider<R> {
    /// Provide `reader` as the one file.
    pub fn new(reader: R) -> Self {
        Self::with_hint(ReaderWithHint::new(reader))
    }

    /// Provide a described reader as the one file.
    pub fn with_hint(reader: ReaderWithHint<R>) -> Self {
        Self {
            reader: Some(reader),
        }
    }
}

impl<R: Read> ReaderProvider for SingleReaderProvider<R> {
    type Reader = R;

    fn open_next(&mut self) -> io::Result<Option<ReaderWithHint<R>>> {
        Ok(self.reader.take())
    }

    fn close(&mut self) -> io::Result<()> {
        self.reader = None;
        Ok(())
    }
}

/// Opens a single file on demand.
///
/// The opener runs on the first [`FileInput::next_file`] call; an opener
/// that fails is not retried.
pub struct OpenerProvider<F> {
    opener: Option<F>,
}

impl<F> OpenerProvider<F> {
    /// Provide the reader `opener` returns as the one file.
    pub fn new(opener: F) -> Self {
        Self {
            opener: Some(opener),
        }
    }
}

impl<F, R> ReaderProvider for OpenerProvider<F>
where
    F: FnOnce() -> io::Result<R>,
    R: Read,
{
    type Reader = R;

    fn open_next(&mut self) -> io::Result<Option<ReaderWithHint<R>>> {
        match self.opener.take() {
            Some(open) => open().map(|reader| Some(ReaderWithHint::new(reader))),
            None => Ok(None),
        }
    }
}

/// A [`FileInput`] whose files are [`Read`] streams.
///
/// Each [`poll`](FileInput::poll) allocates a buffer and fills it with at
/// most one read of the current stream, so a short read gives a short
/// buffer. A read of zero bytes is end of file. Moving to the next file or
/// closing drops the current stream.
///
/// # Examples
///
/// ```
/// use filebuf_adapters::adapters::{FileInputReader, HeapAllocator, ReaderFileInput};
/// use std::io::Read;
///
/// let allocator = HeapAllocator::with_capacity(4).unwrap();
/// let files: [&[u8]; 2] = [b"first", b"second"];
/// let mut reader = FileInputReader::new(ReaderFileInput::from_readers(&allocator, files));
///
/// let mut text = String::new();
/// while reader.next_file().unwrap() {
///     reader.read_to_string(&mut text).unwrap();
///     text.push('|');
/// }
/// assert_eq!(text, "first|second|");
/// ```
pub struct ReaderFileInput<A, P: ReaderProvider> {
    allocator: A,
    provider: P,
    current: Option<ReaderWithHint<P::Reader>>,
    scratch: Vec<u8>,
}

impl<A, P> ReaderFileInput<A, P>
where
    A: BufferAllocator,
    P: ReaderProvider,
{
    /// Read the files `provider` opens into buffers from `allocator`.
    pub fn new(allocator: A, provider: P) -> Self {
        Self {
            allocator,
            provider,
            current: None,
            scratch: Vec::new(),
        }
    }

    /// The allocator buffers come from.
    pub fn allocator(&self) -> &A {
        &self.allocator
    }

    /// Whether a stream is open.
    pub fn has_current(&self) -> bool {
        self.current.is_some()
    }

    fn drop_current(&mut self) {
        if let Some(current) = self.current.take() {
            debug!("closing stream {}", current.hint().unwrap_or("<unnamed>"));
        }
    }
}

impl<A, R> ReaderFileInput<A, SingleReaderProvider<R>>
where
    A: BufferAllocator,
    R: Read,
{
    /// A single-file input reading `reader`.
    pub fn from_reader(allocator: A, reader: R) -> Self {
        Self::new(allocator, SingleReaderProvider::new(reader))
    }

    /// A single-file input reading `reader`, described by `hint`.
    pub fn from_reader_with_hint(allocator: A, reader: R, hint: impl Into<String>) -> Self {
        Self::new(
            allocator,
            SingleReaderProvider::with_hint(ReaderWithHint::with_hint(reader, hint)),
        )
    }
}

impl<A, I> ReaderFileInput<A, IterReaderProvider<I>>
where
    A: BufferAllocator,
    I: Iterator,
    I::Item: Read,
{
    /// An input with one file per reader.
    pub fn from_readers<T: IntoIterator<IntoIter = I>>(allocator: A, readers: T) -> Self {
        Self::new(allocator, IterReaderProvider::new(readers))
    }
}

impl<A, F, R> ReaderFileInput<A, OpenerProvider<F>>
where
    A: BufferAllocator,
    F: FnOnce() -> io::Result<R>,
    R: Read,
{
    /// A single-file input whose reader is opened by the first
    /// [`next_file`](FileInput::next_file).
    pub fn from_opener(allocator: A, opener: F) -> Self {
        Self::new(allocator, OpenerProvider::new(opener))
    }
}

impl<A, P> FileInput for ReaderFileInput<A, P>
where
    A: BufferAllocator,
    P: ReaderProvider,
{
    type Buffer = A::Buffer;

    fn next_file(&mut self) -> Result<bool> {
        self.drop_current();
        self.current = self.provider.open_next()?;
        Ok(self.current.is_some())
    }

    fn poll(&mut self) -> Result<Option<A::Buffer>> {
        let Some(current) = self.current.as_mut() else {
            return Err(Error::IllegalState(
                "ReaderFileInput has no current file; poll() needs a successful next_file()",
            ));
        };

        let mut buffer = self.allocator.allocate();
        let capacity = buffer.capacity();
        if self.scratch.len() < capacity {
            self.scratch.resize(capacity, 0);
        }

        let read = loop {
            match current.reader_mut().read(&mut self.scratch[..capacity]) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    buffer.release();
                    return Err(e.into());
                }
            }
        };

        if read == 0 {
            buffer.release();
            return Ok(None);
        }
        buffer.set_bytes(0, &self.scratch[..read]);
        buffer.set_limit(read);
        Ok(Some(buffer))
    }

    fn close(&mut self) -> Result<()> {
        self.drop_current();
        self.provider.close()?;
        Ok(())
    }

    fn current_file_hint(&self) -> Option<&str> {
        self.current.as_ref().and_then(ReaderWithHint::hint)
    }
}
