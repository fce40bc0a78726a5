//! Adapter layer - byte streams over file sequences, and the file sequences
//! themselves.
//!
//! # Hexagonal Architecture
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer                │
//!     │  - ReadCursor / WriteCursor      │
//!     │  - FileInput / FileOutput (port) │
//!     └────────────┬─────────────────────┘
//!                  │
//!                  │ implements / drives
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │      Adapter Layer               │  ◄── This module
//!     │  - FileInputReader               │
//!     │  - FileOutputWriter              │
//!     │  - List / Reader / Writer files  │
//!     └────────────┬─────────────────────┘
//!                  │
//!                  │ uses
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │  std::io (Read / Write streams)  │
//!     └──────────────────────────────────┘
//! ```
//!
//! # Available Adapters
//!
//! - **`FileInputReader`**: reads a `FileInput` as bytes, one file at a time
//! - **`FileOutputWriter`**: writes bytes into a `FileOutput`, buffer by buffer
//! - **`ListFileInput` / `ListFileOutput`**: in-memory files
//! - **`ReaderFileInput` / `WriterFileOutput`**: files backed by `std::io` streams
//! - **`TransactionalReaderFileInput`**: a reader-backed input with commit/abort
//! - **`HeapAllocator`**: heap buffers with allocation accounting

mod file_input_reader;
mod file_output_writer;
mod heap_buffer;
mod list_file;
mod reader_file_input;
mod transactional;
mod writer_file_output;

pub use file_input_reader::FileInputReader;
pub use file_output_writer::FileOutputWriter;
pub use heap_buffer::{AllocatorStats, HeapAllocator, HeapBuffer};
pub use list_file::{ListFileInput, ListFileOutput, SinkEvent};
pub use reader_file_input::{
    IterReaderProvider, OpenerProvider, ReaderFileInput, ReaderProvider, ReaderWithHint,
    SingleReaderProvider,
};
pub use transactional::{Transaction, TransactionalReaderFileInput};
pub use writer_file_output::{WriterFileOutput, WriterProvider};
