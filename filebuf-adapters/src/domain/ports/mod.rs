//! Ports define the interfaces between the domain and the outside world.
//!
//! - **Buffer ports** (`Buffer`, `BufferAllocator`): pooled storage handed
//!   around by value and given back with `release`
//! - **File-sequence ports** (`FileInput`, `FileOutput`): chunked sources and
//!   sinks the adapters bridge to byte streams
//! - **`ByteStream`**: the byte-oriented reading surface, with skip,
//!   availability and mark/reset on top of [`std::io::Read`]

mod byte_stream;

pub use byte_stream::ByteStream;
pub use filebuf_spi::{Buffer, BufferAllocator, FileInput, FileOutput, TransactionalFileInput};
