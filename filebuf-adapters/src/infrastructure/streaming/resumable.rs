//! Resumable reader - reopens a failed stream at the last delivered offset.

use crate::domain::ByteStream;
use log::{debug, warn};
use std::io::{self, Read};

/// Opens a fresh stream positioned at a given offset of the resource.
///
/// `cause` is the failure that made the reopen necessary, or `None` when the
/// stream is opened for the first time. The returned stream's first byte
/// must be the byte at `offset`.
///
/// Closures of the right shape are reopeners. Annotate the `cause`
/// parameter so the closure accepts any borrow:
///
/// ```
/// use filebuf_adapters::infrastructure::streaming::ResumableReader;
/// use std::io::{self, Cursor, Read};
///
/// let data = b"resumable".to_vec();
/// let mut reader = ResumableReader::lazy(move |offset: u64, _cause: Option<&io::Error>| {
///     Ok(Cursor::new(data[offset as usize..].to_vec()))
/// });
///
/// let mut text = String::new();
/// reader.read_to_string(&mut text).unwrap();
/// assert_eq!(text, "resumable");
/// assert_eq!(reader.offset(), 9);
/// ```
pub trait Reopener {
    /// The stream type this reopener produces.
    type Stream: ByteStream;

    /// Open a stream starting at `offset`.
    fn reopen(&mut self, offset: u64, cause: Option<&io::Error>) -> io::Result<Self::Stream>;
}

impl<F, S> Reopener for F
where
    F: FnMut(u64, Option<&io::Error>) -> io::Result<S>,
    S: ByteStream,
{
    type Stream = S;

    fn reopen(&mut self, offset: u64, cause: Option<&io::Error>) -> io::Result<S> {
        self(offset, cause)
    }
}

/// Tuning for [`ResumableReader`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResumableConfig {
    max_consecutive_failures: Option<u32>,
}

impl ResumableConfig {
    /// Retry without limit, as long as every reopen succeeds.
    pub const fn unbounded() -> Self {
        Self {
            max_consecutive_failures: None,
        }
    }

    /// Give up after `max` recoveries in a row without a successful
    /// operation. `0` disables recovery altogether.
    pub const fn with_max_consecutive_failures(max: u32) -> Self {
        Self {
            max_consecutive_failures: Some(max),
        }
    }

    /// The recovery cap, if any.
    pub const fn max_consecutive_failures(&self) -> Option<u32> {
        self.max_consecutive_failures
    }
}

/// A byte stream that survives transport failures.
///
/// Reads and skips that fail are retried on a fresh stream from the
/// [`Reopener`], opened at [`offset`](Self::offset): the number of bytes
/// delivered so far. The offset only moves by bytes actually handed to the
/// caller, so a reopen never skips or repeats data as long as the reopener
/// honors the offset.
///
/// A reopen that fails is returned to the caller; the next operation tries
/// to reopen again with the failure that started the recovery.
/// Interrupted reads are retried on the same stream. Asking whether marks
/// are supported opens the stream like any other operation. After
/// [`close`](Self::close) every operation fails and nothing is reopened.
pub struct ResumableReader<R: Reopener> {
    inner: Option<R::Stream>,
    reopener: R,
    offset: u64,
    marked_offset: u64,
    last_cause: Option<io::Error>,
    closed: bool,
    config: ResumableConfig,
    consecutive_failures: u32,
}

impl<R: Reopener> ResumableReader<R> {
    /// Resume `initial`, an already open stream positioned at offset 0.
    pub fn new(initial: R::Stream, reopener: R) -> Self {
        Self::with_stream(Some(initial), reopener)
    }

    /// Open the stream at offset 0 right away.
    pub fn open(mut reopener: R) -> io::Result<Self> {
        let initial = reopener.reopen(0, None)?;
        Ok(Self::new(initial, reopener))
    }

    /// Open the stream at offset 0 on first use.
    pub fn lazy(reopener: R) -> Self {
        Self::with_stream(None, reopener)
    }

    fn with_stream(inner: Option<R::Stream>, reopener: R) -> Self {
        Self {
            inner,
            reopener,
            offset: 0,
            marked_offset: 0,
            last_cause: None,
            closed: false,
            config: ResumableConfig::default(),
            consecutive_failures: 0,
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: ResumableConfig) -> Self {
        self.config = config;
        self
    }

    /// Bytes delivered to the caller so far, through reads and skips.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Whether [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Drop the current stream for good. Later operations fail.
    pub fn close(&mut self) {
        if !self.closed {
            debug!("closing resumable reader at offset {}", self.offset);
        }
        self.closed = true;
        self.inner = None;
        self.last_cause = None;
    }

    fn ensure_open(&mut self) -> io::Result<&mut R::Stream> {
        if self.closed {
            return Err(closed());
        }
        if self.inner.is_none() {
            let cause = self.last_cause.take();
            match self.reopener.reopen(self.offset, cause.as_ref()) {
                Ok(stream) => self.inner = Some(stream),
                Err(e) => {
                    self.last_cause = cause;
                    return Err(e);
                }
            }
        }
        self.inner.as_mut().ok_or_else(closed)
    }

    /// Drop the broken stream and open a replacement at the current offset.
    fn recover(&mut self, cause: io::Error) -> io::Result<()> {
        self.inner = None;
        self.consecutive_failures += 1;

        if let Some(max) = self.config.max_consecutive_failures {
            if self.consecutive_failures > max {
                warn!(
                    "giving up at offset {} after {} consecutive failures: {}",
                    self.offset, max, cause
                );
                self.consecutive_failures = 0;
                let error = io::Error::new(cause.kind(), cause.to_string());
                self.last_cause = Some(cause);
                return Err(error);
            }
        }

        warn!(
            "reopening at offset {} after failure: {}",
            self.offset, cause
        );
        match self.reopener.reopen(self.offset, Some(&cause)) {
            Ok(stream) => {
                self.inner = Some(stream);
                Ok(())
            }
            Err(e) => {
                self.last_cause = Some(cause);
                Err(e)
            }
        }
    }

    fn retrying<T>(
        &mut self,
        mut op: impl FnMut(&mut R::Stream) -> io::Result<T>,
    ) -> io::Result<T> {
        loop {
            let stream = self.ensure_open()?;
            match op(stream) {
                Ok(value) => {
                    self.consecutive_failures = 0;
                    return Ok(value);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => self.recover(e)?,
            }
        }
    }
}

fn closed() -> io::Error {
    io::Error::other("ResumableReader is closed")
}

impl<R: Reopener> Read for ResumableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.retrying(|stream| stream.read(buf))?;
        self.offset += n as u64;
        Ok(n)
    }
}

impl<R: Reopener> ByteStream for ResumableReader<R> {
    fn skip(&mut self, n: u64) -> io::Result<u64> {
        let skipped = self.retrying(|stream| stream.skip(n))?;
        self.offset += skipped;
        Ok(skipped)
    }

    fn available(&mut self) -> io::Result<usize> {
        self.ensure_open()?.available()
    }

    fn mark_supported(&mut self) -> io::Result<bool> {
        self.ensure_open()?.mark_supported()
    }

    fn mark(&mut self, read_limit: usize) -> io::Result<()> {
        self.ensure_open()?.mark(read_limit)?;
        self.marked_offset = self.offset;
        Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
        self.ensure_open()?.reset()?;
        self.offset = self.marked_offset;
        Ok(())
    }
}
