//! Domain layer - buffer bookkeeping with no I/O of its own.
//!
//! The domain layer contains:
//! - **Entities**: the buffer slot and the read/write cursors adapters own
//! - **Value Objects**: validated configuration (`BufferConfig`, `CloseMode`)
//! - **`EmptyBuffer`**: the shared "no buffer held" sentinel
//! - **Domain Errors**: invalid configuration
//!
//! The buffer and file-sequence ports (`Buffer`, `FileInput`, `FileOutput`)
//! live in `filebuf-spi` and are re-exported from [`ports`], next to the
//! [`ByteStream`] port the resumable reader is written against.
//!
//! ```text
//!     ┌──────────────────────────────────┐
//!     │      Domain Layer (Core)         │
//!     │  - ReadCursor / WriteCursor      │
//!     │  - HeldBuffer, EmptyBuffer       │
//!     │  - BufferConfig, CloseMode       │
//!     └────────────┬─────────────────────┘
//!                  │ depends on
//!                  ▼
//!     ┌──────────────────────────────────┐
//!     │      Ports (filebuf-spi)         │
//!     │  - Buffer, BufferAllocator       │
//!     │  - FileInput, FileOutput         │
//!     └──────────────────────────────────┘
//! ```

pub mod entities;
pub mod error;
pub mod ports;
pub mod value_objects;

mod empty_buffer;

pub use empty_buffer::EmptyBuffer;
pub use entities::{HeldBuffer, ReadCursor, WriteCursor};
pub use error::ConfigError;
pub use ports::ByteStream;
pub use value_objects::{presets, BufferConfig, CloseMode};
