//! End-to-end tests for the stream adapters
//!
//! These tests cover:
//! - Reading multi-file inputs byte by byte and in chunks
//! - Buffer accounting across complete and abandoned reads
//! - Write flush boundaries and close modes against a recording sink
//! - Round trips through std::io backed files

use std::io::{self, Cursor, Read, Write};
use std::sync::{Arc, Mutex};

use anyhow::Result;
use filebuf_adapters::adapters::SinkEvent;
use filebuf_adapters::{
    ByteStream, CloseMode, FileInputReader, FileOutputWriter, HeapAllocator, HeapBuffer,
    ListFileInput, ListFileOutput, ReaderFileInput, ResumableReader, WriterFileOutput,
    WriterProvider,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn list_input(allocator: &HeapAllocator, files: &[&[&[u8]]]) -> ListFileInput<HeapBuffer> {
    ListFileInput::new(files.iter().map(|chunks| {
        chunks
            .iter()
            .map(|chunk| allocator.allocate_from(chunk))
            .collect::<Vec<_>>()
    }))
}

#[test]
fn test_two_files_byte_by_byte() -> Result<()> {
    init_logging();
    let allocator = HeapAllocator::default();
    let input = list_input(&allocator, &[&[b"abc", b"de"], &[b"fghi"]]);
    let mut reader = FileInputReader::new(input);

    let mut files = Vec::new();
    while reader.next_file()? {
        let mut bytes = Vec::new();
        while let Some(byte) = reader.read_byte()? {
            bytes.push(byte);
        }
        files.push(bytes);
    }
    reader.close()?;

    assert_eq!(files, vec![b"abcde".to_vec(), b"fghi".to_vec()]);
    assert_eq!(allocator.stats().allocated(), 3);
    assert_eq!(allocator.stats().released(), 3);
    Ok(())
}

#[test]
fn test_abandoned_files_release_everything() -> Result<()> {
    init_logging();
    let allocator = HeapAllocator::default();
    let input = list_input(
        &allocator,
        &[&[b"abc", b"de"], &[b"fghi", b"jk"], &[b"lmn"]],
    );
    let mut reader = FileInputReader::new(input);

    reader.next_file()?;
    assert_eq!(reader.read_byte()?, Some(b'a'));
    reader.next_file()?;
    let mut two = [0u8; 2];
    assert_eq!(reader.read(&mut two)?, 2);
    reader.close()?;

    assert_eq!(allocator.stats().outstanding(), 0);
    assert_eq!(allocator.stats().released(), 5);
    Ok(())
}

#[test]
fn test_no_bytes_leak_across_files() -> Result<()> {
    let allocator = HeapAllocator::default();
    let input = list_input(&allocator, &[&[b"first"], &[], &[b"third"]]);
    let mut reader = FileInputReader::new(input);

    let mut contents = Vec::new();
    while reader.next_file()? {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        contents.push(text);
    }
    assert_eq!(contents, ["first", "", "third"]);
    Ok(())
}

#[test]
fn test_write_exactly_capacity() -> Result<()> {
    let allocator = HeapAllocator::with_capacity(8)?;
    let mut writer = FileOutputWriter::new(ListFileOutput::new(), &allocator, CloseMode::Close);
    writer.next_file()?;

    writer.write(&[1; 8])?;
    assert_eq!(writer.get_ref().files()[0], vec![vec![1u8; 8]]);
    assert_eq!(writer.pending(), 0);
    Ok(())
}

#[test]
fn test_write_capacity_plus_one() -> Result<()> {
    let allocator = HeapAllocator::with_capacity(8)?;
    let mut writer =
        FileOutputWriter::new(ListFileOutput::new(), &allocator, CloseMode::FlushFinish);
    writer.next_file()?;

    writer.write(&[2; 9])?;
    writer.close()?;
    let chunks = &writer.get_ref().files()[0];
    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].len(), 8);
    assert_eq!(chunks[1], vec![2u8]);
    Ok(())
}

#[test]
fn test_close_mode_matrix() -> Result<()> {
    for name in ["FLUSH", "flush_finish", "flush-finish-close", "Close"] {
        let mode: CloseMode = name.parse()?;
        let allocator = HeapAllocator::with_capacity(16)?;
        let mut writer = FileOutputWriter::new(ListFileOutput::new(), &allocator, mode);
        writer.next_file()?;
        writer.write(b"payload")?;
        writer.close()?;

        let mut expected = vec![SinkEvent::NextFile];
        if mode.flushes() {
            expected.push(SinkEvent::Add(7));
        }
        if mode.finishes() {
            expected.push(SinkEvent::Finish);
        }
        if mode.closes() {
            expected.push(SinkEvent::Close);
        }
        assert_eq!(writer.get_ref().events(), expected.as_slice(), "{mode}");
        assert_eq!(allocator.stats().outstanding(), 0, "{mode}");
    }
    Ok(())
}

#[test]
fn test_unknown_close_mode_is_rejected() {
    assert!("FLUSH_CLOSE".parse::<CloseMode>().is_err());
}

/// Collects each output file into a shared list, the way a host would write
/// files to storage.
#[derive(Clone, Default)]
struct MemoryFiles {
    files: Arc<Mutex<Vec<Vec<u8>>>>,
}

struct MemoryFile {
    files: Arc<Mutex<Vec<Vec<u8>>>>,
    data: Vec<u8>,
}

impl Write for MemoryFile {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl Drop for MemoryFile {
    fn drop(&mut self) {
        let data = std::mem::take(&mut self.data);
        self.files.lock().unwrap().push(data);
    }
}

impl WriterProvider for MemoryFiles {
    type Writer = MemoryFile;

    fn open_next(&mut self) -> std::io::Result<MemoryFile> {
        Ok(MemoryFile {
            files: Arc::clone(&self.files),
            data: Vec::new(),
        })
    }
}

#[test]
fn test_round_trip_through_io_streams() -> Result<()> {
    init_logging();
    let allocator = HeapAllocator::with_capacity(5)?;
    let files = MemoryFiles::default();

    let output = WriterFileOutput::new(files.clone());
    let mut writer = FileOutputWriter::new(output, &allocator, CloseMode::FlushFinishClose);
    for text in ["alpha", "a somewhat longer second file", ""] {
        writer.next_file()?;
        writer.write_all(text.as_bytes())?;
        writer.flush()?;
    }
    writer.close()?;
    drop(writer);

    let written = files.files.lock().unwrap().clone();
    assert_eq!(written.len(), 3);

    let readers = written.into_iter().map(Cursor::new);
    let mut reader = FileInputReader::new(ReaderFileInput::from_readers(&allocator, readers));
    let mut texts = Vec::new();
    while reader.next_file()? {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        texts.push(text);
    }
    reader.close()?;

    assert_eq!(texts, ["alpha", "a somewhat longer second file", ""]);
    assert_eq!(allocator.stats().outstanding(), 0);
    Ok(())
}

/// A connection over `data[offset..]` that drops after `budget` bytes.
struct Connection {
    data: Cursor<Vec<u8>>,
    budget: Option<usize>,
}

impl Read for Connection {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let Some(left) = self.budget else {
            return self.data.read(buf);
        };
        if left == 0 {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "peer reset"));
        }
        let n = buf.len().min(left);
        let read = self.data.read(&mut buf[..n])?;
        self.budget = Some(left - read);
        Ok(read)
    }
}

impl ByteStream for Connection {}

#[test]
fn test_resumable_source_under_read_adapter() -> Result<()> {
    init_logging();
    let payload: Vec<u8> = (0..200u8).collect();
    let allocator = HeapAllocator::with_capacity(16)?;

    let source = payload.clone();
    let offsets = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&offsets);
    let resumable = ResumableReader::lazy(move |offset: u64, cause: Option<&io::Error>| {
        seen.lock().unwrap().push((offset, cause.map(io::Error::kind)));
        let budget = if cause.is_none() { Some(37) } else { None };
        Ok(Connection {
            data: Cursor::new(source[offset as usize..].to_vec()),
            budget,
        })
    });

    let input = ReaderFileInput::from_reader(&allocator, resumable);
    let mut reader = FileInputReader::new(input);
    assert!(reader.next_file()?);

    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    assert!(!reader.next_file()?);
    reader.close()?;

    assert_eq!(bytes, payload);
    assert_eq!(allocator.stats().outstanding(), 0);
    assert_eq!(
        *offsets.lock().unwrap(),
        vec![(0, None), (37, Some(io::ErrorKind::ConnectionReset))]
    );
    Ok(())
}
