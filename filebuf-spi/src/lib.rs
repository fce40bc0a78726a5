//! Buffer and file-sequence traits.
//!
//! This crate defines the contracts shared by hosts that move data as a
//! sequence of files, each file delivered as a sequence of fixed-capacity
//! buffers:
//!
//! - [`Buffer`]: a fixed-capacity byte region with a `limit` and an explicit
//!   [`release`](Buffer::release) back to its pool
//! - [`BufferAllocator`]: produces fresh buffers
//! - [`FileInput`]: the source side (`next_file`, `poll`, `close`)
//! - [`FileOutput`]: the sink side (`next_file`, `add`, `finish`, `close`)
//! - [`TransactionalFileInput`]: a source with `commit`/`abort` hooks
//!
//! Implementations live in `filebuf-adapters` or in the host itself.

#![warn(missing_docs)]

mod buffer;
mod error;
mod file;

pub use buffer::{Buffer, BufferAllocator};
pub use error::{Error, Result};
pub use file::{FileInput, FileOutput, TransactionalFileInput};
