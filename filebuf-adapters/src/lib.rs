//! Byte-stream adapters for chunked, buffer-oriented file sequences.
//!
//! A file sequence moves data as pooled, fixed-capacity buffers, file after
//! file. Most consumers want plain byte streams instead. This crate bridges
//! the two in both directions, and adds a reader that survives transport
//! failures by reopening its source at the last delivered offset.
//!
//! # Architecture
//!
//! The crate is organized into three layers:
//!
//! ## Domain Layer (`domain`)
//! Buffer bookkeeping with no I/O of its own:
//! - **Entities**: `HeldBuffer`, `ReadCursor`, `WriteCursor`
//! - **Value Objects**: `BufferConfig`, `CloseMode`
//! - **`EmptyBuffer`**: the shared "no buffer held" sentinel
//! - **Ports**: `Buffer`, `FileInput`, `FileOutput` (from `filebuf-spi`) and
//!   `ByteStream`
//!
//! ## Adapter Layer (`adapters`)
//! - **`FileInputReader`**: reads a `FileInput` as bytes
//! - **`FileOutputWriter`**: writes bytes into a `FileOutput`
//! - **`ListFileInput` / `ListFileOutput`**: in-memory files
//! - **`ReaderFileInput` / `WriterFileOutput`**: files backed by `std::io`
//! - **`TransactionalReaderFileInput`**: commit/abort on top
//! - **`HeapAllocator`**: heap buffers with allocation accounting
//!
//! ## Infrastructure Layer (`infrastructure`)
//! - **`ResumableReader`**: reopen-and-retry on transport failures
//! - `PlainStream` / `Markable` stream wrappers
//! - `embedded-io` trait bridges
//!
//! `lineage` holds a small template formatter for file lineage metadata.
//!
//! # Quick Start
//!
//! ```
//! use filebuf_adapters::{CloseMode, FileInputReader, FileOutputWriter, HeapAllocator};
//! use filebuf_adapters::{ListFileInput, ListFileOutput};
//! use std::io::{Read, Write};
//!
//! let allocator = HeapAllocator::with_capacity(4).unwrap();
//!
//! // Bytes in, buffers out.
//! let mut writer =
//!     FileOutputWriter::new(ListFileOutput::new(), &allocator, CloseMode::FlushFinishClose);
//! writer.next_file().unwrap();
//! writer.write_all(b"hello, buffers").unwrap();
//! writer.close().unwrap();
//!
//! // Buffers in, bytes out.
//! let chunks = writer.get_ref().files()[0].clone();
//! let input = ListFileInput::new([chunks
//!     .iter()
//!     .map(|chunk| allocator.allocate_from(chunk))
//!     .collect::<Vec<_>>()]);
//! let mut reader = FileInputReader::new(input);
//! reader.next_file().unwrap();
//!
//! let mut text = String::new();
//! reader.read_to_string(&mut text).unwrap();
//! assert_eq!(text, "hello, buffers");
//! ```
//!
//! # Features
//!
//! - `embedded-io`: implement the `embedded_io` traits for the adapters

#![warn(missing_docs)]

// Core layers
pub mod adapters;
pub mod domain;
pub mod infrastructure;

pub mod lineage;

// Re-export commonly used types for convenience
pub use domain::{
    presets, BufferConfig, ByteStream, CloseMode, ConfigError, EmptyBuffer,
};

pub use adapters::{
    AllocatorStats, FileInputReader, FileOutputWriter, HeapAllocator, HeapBuffer, ListFileInput,
    ListFileOutput, ReaderFileInput, ReaderProvider, ReaderWithHint, Transaction,
    TransactionalReaderFileInput, WriterFileOutput, WriterProvider,
};

pub use infrastructure::streaming::{
    Markable, PlainStream, Reopener, ResumableConfig, ResumableReader,
};

pub use lineage::{FileLineageFormatter, LineageFormatError};

#[cfg(feature = "embedded-io")]
pub use embedded_io;

// Re-export the port crate so users can depend on this crate alone.
pub use filebuf_spi::{
    Buffer, BufferAllocator, Error, FileInput, FileOutput, Result, TransactionalFileInput,
};
