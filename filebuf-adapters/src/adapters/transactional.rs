//! Reader-backed file input with commit/abort.

use super::reader_file_input::{ReaderFileInput, ReaderProvider};
use filebuf_spi::{BufferAllocator, FileInput, Result, TransactionalFileInput};
use log::{debug, warn};

/// Work tied to consuming a file input, settled once reading is done.
pub trait Transaction {
    /// What a successful commit reports.
    type Report;

    /// Make the consumption permanent.
    fn commit(&mut self) -> Result<Self::Report>;

    /// Undo the consumption.
    fn abort(&mut self);
}

/// A [`ReaderFileInput`] that settles a [`Transaction`] when the consumer is
/// done with it.
///
/// Reading and closing behave exactly like the wrapped input.
/// [`commit`](TransactionalFileInput::commit) and
/// [`abort`](TransactionalFileInput::abort) go to the transaction.
pub struct TransactionalReaderFileInput<A, P: ReaderProvider, T> {
    input: ReaderFileInput<A, P>,
    transaction: T,
}

impl<A, P, T> TransactionalReaderFileInput<A, P, T>
where
    A: BufferAllocator,
    P: ReaderProvider,
    T: Transaction,
{
    /// Read `provider`'s files and settle `transaction` afterwards.
    pub fn new(allocator: A, provider: P, transaction: T) -> Self {
        Self {
            input: ReaderFileInput::new(allocator, provider),
            transaction,
        }
    }

    /// Gets a reference to the transaction.
    pub fn transaction(&self) -> &T {
        &self.transaction
    }
}

impl<A, P, T> FileInput for TransactionalReaderFileInput<A, P, T>
where
    A: BufferAllocator,
    P: ReaderProvider,
    T: Transaction,
{
    type Buffer = A::Buffer;

    fn next_file(&mut self) -> Result<bool> {
        self.input.next_file()
    }

    fn poll(&mut self) -> Result<Option<A::Buffer>> {
        self.input.poll()
    }

    fn close(&mut self) -> Result<()> {
        self.input.close()
    }

    fn current_file_hint(&self) -> Option<&str> {
        self.input.current_file_hint()
    }
}

impl<A, P, T> TransactionalFileInput for TransactionalReaderFileInput<A, P, T>
where
    A: BufferAllocator,
    P: ReaderProvider,
    T: Transaction,
{
    type Report = T::Report;

    fn abort(&mut self) {
        warn!("aborting file input transaction");
        self.transaction.abort();
    }

    fn commit(&mut self) -> Result<T::Report> {
        debug!("committing file input transaction");
        self.transaction.commit()
    }
}
