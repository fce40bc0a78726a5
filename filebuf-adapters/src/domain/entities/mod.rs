//! Entities - the buffer state owned by the stream adapters.

mod held_buffer;
mod read_cursor;
mod write_cursor;

pub use held_buffer::HeldBuffer;
pub use read_cursor::ReadCursor;
pub use write_cursor::WriteCursor;
