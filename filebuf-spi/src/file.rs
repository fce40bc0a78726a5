//! File-sequence source and sink contracts.

use crate::{Buffer, Result};

/// The source side of a file sequence.
///
/// A file input starts with no current file. Each successful
/// [`next_file`](FileInput::next_file) moves to the next file, after which
/// [`poll`](FileInput::poll) yields that file's buffers until it returns
/// `None`. `None` means "no more buffers in this file", not the end of the
/// sequence; the end of the sequence is `next_file` returning `false`.
pub trait FileInput {
    /// The buffer type delivered by `poll`.
    type Buffer: Buffer;

    /// Move to the next file. Returns `false` once the sequence is exhausted.
    fn next_file(&mut self) -> Result<bool>;

    /// Take the next buffer of the current file, or `None` at its end.
    ///
    /// Ownership of the buffer moves to the caller, who must release it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`](crate::Error::IllegalState) if there is
    /// no current file: before the first `next_file`, and after `next_file`
    /// has returned `false`.
    fn poll(&mut self) -> Result<Option<Self::Buffer>>;

    /// Release every remaining resource of the sequence.
    fn close(&mut self) -> Result<()>;

    /// A human-readable label of the current file, for diagnostics only.
    fn current_file_hint(&self) -> Option<&str> {
        None
    }
}

/// The sink side of a file sequence.
pub trait FileOutput {
    /// The buffer type accepted by `add`.
    type Buffer: Buffer;

    /// Start a new file. Subsequent buffers belong to it.
    fn next_file(&mut self) -> Result<()>;

    /// Append a filled buffer (its first `limit()` bytes) to the current file.
    ///
    /// Ownership moves to the sink, which releases the buffer on every path,
    /// including when it returns an error.
    fn add(&mut self, buffer: Self::Buffer) -> Result<()>;

    /// Mark the whole sequence as complete.
    fn finish(&mut self) -> Result<()>;

    /// Release every resource of the sink.
    fn close(&mut self) -> Result<()>;
}

/// A file input that takes part in a transaction driven by the host.
pub trait TransactionalFileInput: FileInput {
    /// What a successful commit reports back to the host.
    type Report;

    /// Abandon the transaction.
    fn abort(&mut self);

    /// Commit the transaction.
    fn commit(&mut self) -> Result<Self::Report>;
}

impl<I: FileInput + ?Sized> FileInput for Box<I> {
    type Buffer = I::Buffer;

    fn next_file(&mut self) -> Result<bool> {
        (**self).next_file()
    }

    fn poll(&mut self) -> Result<Option<Self::Buffer>> {
        (**self).poll()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }

    fn current_file_hint(&self) -> Option<&str> {
        (**self).current_file_hint()
    }
}

impl<O: FileOutput + ?Sized> FileOutput for Box<O> {
    type Buffer = O::Buffer;

    fn next_file(&mut self) -> Result<()> {
        (**self).next_file()
    }

    fn add(&mut self, buffer: Self::Buffer) -> Result<()> {
        (**self).add(buffer)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }

    fn close(&mut self) -> Result<()> {
        (**self).close()
    }
}
