//! Errors shared by sources, sinks and adapters.

use std::io;

/// Result type used across the file-sequence contracts.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Errors raised by file inputs, file outputs and the adapters built on them.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// An operation was called in a state where it is never valid, such as
    /// `poll` before `next_file`. This is a caller bug and is not retried.
    #[error("illegal state: {0}")]
    IllegalState(&'static str),

    /// The resource was already closed.
    #[error("{0} is closed")]
    Closed(&'static str),

    /// A transport failure from the underlying stream.
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// Whether this error came from the transport rather than from misuse.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io(_))
    }
}

impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Io(e) => e,
            other => io::Error::other(other),
        }
    }
}
