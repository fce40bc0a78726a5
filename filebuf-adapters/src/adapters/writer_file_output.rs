//! File output over a sequence of [`Write`] streams.

use core::marker::PhantomData;
use filebuf_spi::{Buffer, Error, FileOutput, Result};
use log::debug;
use std::io::{self, Write};

/// Opens the writer behind each file of a [`WriterFileOutput`].
pub trait WriterProvider {
    /// The writer type of every file.
    type Writer: Write;

    /// Open the writer for the next file.
    fn open_next(&mut self) -> io::Result<Self::Writer>;

    /// Called from [`FileOutput::finish`] after the current writer has been
    /// flushed and dropped.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }

    /// Called from [`FileOutput::close`] after the current writer has been
    /// flushed and dropped.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// A [`FileOutput`] writing each file to a writer from a
/// [`WriterProvider`].
///
/// Every added buffer is copied into the current writer and released right
/// away, whether or not the write succeeds.
pub struct WriterFileOutput<P: WriterProvider, B> {
    provider: P,
    current: Option<P::Writer>,
    scratch: Vec<u8>,
    _buffer: PhantomData<fn(B)>,
}

impl<P: WriterProvider, B: Buffer> WriterFileOutput<P, B> {
    /// Write files to the writers `provider` opens.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            current: None,
            scratch: Vec::new(),
            _buffer: PhantomData,
        }
    }

    /// Gets a reference to the provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Flush and drop the current writer, if any.
    fn close_current(&mut self) -> io::Result<()> {
        match self.current.take() {
            Some(mut writer) => writer.flush(),
            None => Ok(()),
        }
    }
}

impl<P: WriterProvider, B: Buffer> FileOutput for WriterFileOutput<P, B> {
    type Buffer = B;

    fn next_file(&mut self) -> Result<()> {
        self.close_current()?;
        self.current = Some(self.provider.open_next()?);
        debug!("opened next output file");
        Ok(())
    }

    fn add(&mut self, buffer: B) -> Result<()> {
        let Some(writer) = self.current.as_mut() else {
            buffer.release();
            return Err(Error::IllegalState(
                "WriterFileOutput::next_file() must be called before add()",
            ));
        };
        let len = buffer.limit();
        if self.scratch.len() < len {
            self.scratch.resize(len, 0);
        }
        buffer.get_bytes(0, &mut self.scratch[..len]);
        buffer.release();
        writer.write_all(&self.scratch[..len])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.close_current()?;
        self.provider.finish()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        let current = self.close_current();
        let provider = self.provider.close();
        current?;
        provider?;
        Ok(())
    }
}
