//! Implementations of embedded_io traits for the byte-stream adapters.
//!
//! These bridge the adapters to code written against the embedded_io
//! traits. Errors are reported as `std::io::Error`, which embedded_io
//! supports with its `std` feature.

use super::{Reopener, ResumableReader};
use crate::adapters::{FileInputReader, FileOutputWriter};
use embedded_io::{ErrorType, Read, Write};
use filebuf_spi::{BufferAllocator, FileInput, FileOutput};

impl<I: FileInput> ErrorType for FileInputReader<I> {
    type Error = std::io::Error;
}

impl<I: FileInput> Read for FileInputReader<I> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        FileInputReader::read(self, buf).map_err(Into::into)
    }
}

impl<O, A> ErrorType for FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    type Error = std::io::Error;
}

impl<O, A> Write for FileOutputWriter<O, A>
where
    O: FileOutput,
    A: BufferAllocator<Buffer = O::Buffer>,
{
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        FileOutputWriter::write(self, buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        FileOutputWriter::flush(self).map_err(Into::into)
    }
}

impl<R: Reopener> ErrorType for ResumableReader<R> {
    type Error = std::io::Error;
}

impl<R: Reopener> Read for ResumableReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        std::io::Read::read(self, buf)
    }
}
