//! In-memory file inputs and outputs backed by lists of buffers.

use filebuf_spi::{Buffer, Error, FileInput, FileOutput, Result};
use std::vec;

/// A [`FileInput`] that replays a fixed list of files, each a list of
/// buffers.
///
/// Buffers that are never polled are released when the input is closed or
/// dropped, or when [`next_file`](FileInput::next_file) moves past them.
pub struct ListFileInput<B: Buffer> {
    files: vec::IntoIter<Vec<B>>,
    current: Option<vec::IntoIter<B>>,
}

impl<B: Buffer> ListFileInput<B> {
    /// Create an input from files given as collections of buffers.
    pub fn new<F, C>(files: F) -> Self
    where
        F: IntoIterator<Item = C>,
        C: IntoIterator<Item = B>,
    {
        let files: Vec<Vec<B>> = files
            .into_iter()
            .map(|file| file.into_iter().collect())
            .collect();
        Self {
            files: files.into_iter(),
            current: None,
        }
    }

    /// Files not reached yet.
    pub fn remaining_files(&self) -> usize {
        self.files.len()
    }

    fn release_current(&mut self) {
        if let Some(rest) = self.current.take() {
            rest.for_each(Buffer::release);
        }
    }
}

impl<B: Buffer> FileInput for ListFileInput<B> {
    type Buffer = B;

    fn next_file(&mut self) -> Result<bool> {
        self.release_current();
        self.current = self.files.next().map(Vec::into_iter);
        Ok(self.current.is_some())
    }

    fn poll(&mut self) -> Result<Option<B>> {
        match self.current.as_mut() {
            Some(buffers) => Ok(buffers.next()),
            None => Err(Error::IllegalState(
                "ListFileInput has no current file; poll() needs a successful next_file()",
            )),
        }
    }

    fn close(&mut self) -> Result<()> {
        self.release_current();
        self.files.by_ref().flatten().for_each(Buffer::release);
        Ok(())
    }
}

impl<B: Buffer> Drop for ListFileInput<B> {
    fn drop(&mut self) {
        self.release_current();
        self.files.by_ref().flatten().for_each(Buffer::release);
    }
}

/// A call a [`ListFileOutput`] received.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkEvent {
    /// `next_file()`
    NextFile,
    /// `add()` of a buffer with this many valid bytes.
    Add(usize),
    /// `finish()`
    Finish,
    /// `close()`
    Close,
}

/// A [`FileOutput`] that copies every buffer it receives into memory.
///
/// Each added buffer is copied out and released straight away. Files are
/// kept as the list of chunks they were written in, and every call is
/// recorded as a [`SinkEvent`].
#[derive(Debug)]
pub struct ListFileOutput<B> {
    files: Vec<Vec<Vec<u8>>>,
    events: Vec<SinkEvent>,
    _buffer: core::marker::PhantomData<fn(B)>,
}

impl<B> ListFileOutput<B> {
    /// Create an empty output.
    pub fn new() -> Self {
        Self {
            files: Vec::new(),
            events: Vec::new(),
            _buffer: core::marker::PhantomData,
        }
    }

    /// The files written so far, each as the chunks it was added in.
    pub fn files(&self) -> &[Vec<Vec<u8>>] {
        &self.files
    }

    /// The concatenated bytes of file `index`.
    ///
    /// # Panics
    ///
    /// Panics if there is no such file.
    pub fn file_bytes(&self, index: usize) -> Vec<u8> {
        self.files[index].concat()
    }

    /// Every call received, in order.
    pub fn events(&self) -> &[SinkEvent] {
        &self.events
    }

    /// Number of `finish()` calls.
    pub fn finish_count(&self) -> usize {
        self.count(SinkEvent::Finish)
    }

    /// Number of `close()` calls.
    pub fn close_count(&self) -> usize {
        self.count(SinkEvent::Close)
    }

    fn count(&self, event: SinkEvent) -> usize {
        self.events.iter().filter(|e| **e == event).count()
    }
}

impl<B> Default for ListFileOutput<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Buffer> FileOutput for ListFileOutput<B> {
    type Buffer = B;

    fn next_file(&mut self) -> Result<()> {
        self.events.push(SinkEvent::NextFile);
        self.files.push(Vec::new());
        Ok(())
    }

    fn add(&mut self, buffer: B) -> Result<()> {
        let Some(file) = self.files.last_mut() else {
            buffer.release();
            return Err(Error::IllegalState(
                "ListFileOutput::next_file() must be called before add()",
            ));
        };
        let mut chunk = vec![0u8; buffer.limit()];
        buffer.get_bytes(0, &mut chunk);
        buffer.release();
        self.events.push(SinkEvent::Add(chunk.len()));
        file.push(chunk);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.events.push(SinkEvent::Finish);
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.events.push(SinkEvent::Close);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::HeapAllocator;

    #[test]
    fn test_poll_before_next_file() {
        let mut input = ListFileInput::<crate::adapters::HeapBuffer>::new(Vec::<Vec<_>>::new());
        assert!(matches!(input.poll(), Err(Error::IllegalState(_))));
    }

    #[test]
    fn test_files_in_order() {
        let allocator = HeapAllocator::default();
        let mut input = ListFileInput::new([
            vec![allocator.allocate_from(b"a"), allocator.allocate_from(b"b")],
            vec![allocator.allocate_from(b"c")],
        ]);
        assert_eq!(input.remaining_files(), 2);

        assert!(input.next_file().unwrap());
        let a = input.poll().unwrap().unwrap();
        assert_eq!(a.as_slice(), b"a");
        a.release();
        let b = input.poll().unwrap().unwrap();
        b.release();
        assert!(input.poll().unwrap().is_none());

        assert!(input.next_file().unwrap());
        input.poll().unwrap().unwrap().release();
        assert!(!input.next_file().unwrap());
        assert!(matches!(input.poll(), Err(Error::IllegalState(_))));
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_unpolled_buffers_released() {
        let allocator = HeapAllocator::default();
        let mut input = ListFileInput::new([
            vec![allocator.allocate_from(b"a"), allocator.allocate_from(b"b")],
            vec![allocator.allocate_from(b"c")],
        ]);

        input.next_file().unwrap();
        input.next_file().unwrap();
        assert_eq!(allocator.stats().released(), 2);

        input.close().unwrap();
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_close_before_next_file() {
        let allocator = HeapAllocator::default();
        let mut input = ListFileInput::new([vec![allocator.allocate_from(b"a")]]);
        input.close().unwrap();
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_drop_releases_everything() {
        let allocator = HeapAllocator::default();
        {
            let mut input = ListFileInput::new([
                vec![allocator.allocate_from(b"a"), allocator.allocate_from(b"b")],
                vec![allocator.allocate_from(b"c")],
            ]);
            input.next_file().unwrap();
        }
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_output_records_chunks() {
        let allocator = HeapAllocator::default();
        let mut output = ListFileOutput::new();

        output.next_file().unwrap();
        output.add(allocator.allocate_from(b"ab")).unwrap();
        output.add(allocator.allocate_from(b"c")).unwrap();
        output.finish().unwrap();
        output.close().unwrap();

        assert_eq!(output.files()[0], vec![b"ab".to_vec(), b"c".to_vec()]);
        assert_eq!(output.file_bytes(0), b"abc");
        assert_eq!(output.finish_count(), 1);
        assert_eq!(output.close_count(), 1);
        assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_output_add_before_next_file() {
        let allocator = HeapAllocator::default();
        let mut output = ListFileOutput::new();

        let err = output.add(allocator.allocate_from(b"ab")).unwrap_err();
        assert!(matches!(err, Error::IllegalState(_)));
        assert_eq!(allocator.stats().outstanding(), 0);
    }
}
