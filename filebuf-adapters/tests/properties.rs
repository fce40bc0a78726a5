//! Property tests for chunking and failure recovery
//!
//! - Any chunking of reads yields the same bytes as one big read
//! - Writes of any size split into full buffers plus one remainder
//! - Every buffer the source produces is released exactly once
//! - The resumable reader always reopens at the delivered offset
//! - A reopener that fails K times leads to exactly K + 1 reopen calls

use std::cell::RefCell;
use std::io::{self, Cursor, Read};
use std::rc::Rc;

use filebuf_adapters::{
    ByteStream, CloseMode, FileInputReader, FileOutputWriter, HeapAllocator, ListFileOutput,
    ReaderFileInput, ResumableReader,
};
use proptest::prelude::*;

/// A stream over `data[start..]` that breaks after `budget` bytes.
struct Fragile {
    data: Cursor<Vec<u8>>,
    budget: Option<usize>,
}

impl Read for Fragile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.budget {
            Some(0) => Err(io::Error::new(io::ErrorKind::ConnectionAborted, "dropped")),
            Some(left) => {
                let n = buf.len().min(left);
                let read = self.data.read(&mut buf[..n])?;
                self.budget = Some(left - read);
                Ok(read)
            }
            None => self.data.read(buf),
        }
    }
}

impl ByteStream for Fragile {}

fn payload() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

proptest! {
    #[test]
    fn test_chunked_reads_match_single_read(
        data in payload(),
        capacity in 1usize..64,
        chunks in prop::collection::vec(1usize..50, 1..40),
    ) {
        let allocator = HeapAllocator::with_capacity(capacity).unwrap();
        let mut reader = FileInputReader::new(
            ReaderFileInput::from_reader(&allocator, Cursor::new(data.clone())),
        );
        reader.next_file().unwrap();

        let mut out = Vec::new();
        let mut sizes = chunks.iter().cycle();
        loop {
            let size = *sizes.next().unwrap();
            let mut buf = vec![0u8; size];
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            prop_assert!(n <= size);
            out.extend_from_slice(&buf[..n]);
        }
        reader.close().unwrap();

        prop_assert_eq!(out, data);
        prop_assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_writes_split_into_full_buffers(
        data in payload(),
        capacity in 1usize..64,
        split in 0usize..512,
    ) {
        let allocator = HeapAllocator::with_capacity(capacity).unwrap();
        let mut writer =
            FileOutputWriter::new(ListFileOutput::new(), &allocator, CloseMode::FlushFinishClose);
        writer.next_file().unwrap();
        let split = split.min(data.len());
        writer.write(&data[..split]).unwrap();
        writer.write(&data[split..]).unwrap();
        writer.close().unwrap();

        let chunks = writer.get_ref().files()[0].clone();
        let (last, full) = match chunks.split_last() {
            Some((last, full)) => (last.len(), full),
            None => (0, &chunks[..]),
        };
        prop_assert!(full.iter().all(|chunk| chunk.len() == capacity));
        prop_assert!(last >= 1 || data.is_empty());
        prop_assert!(last <= capacity);
        prop_assert_eq!(chunks.len(), data.len().div_ceil(capacity));
        prop_assert_eq!(chunks.concat(), data);
        prop_assert_eq!(allocator.stats().outstanding(), 0);
    }

    #[test]
    fn test_reopen_offset_equals_delivered_bytes(
        data in payload(),
        budgets in prop::collection::vec(0usize..40, 0..12),
        read_size in 1usize..32,
    ) {
        let source = Rc::new(data.clone());
        let reopens = Rc::new(RefCell::new(Vec::new()));
        let delivered = Rc::new(RefCell::new(0u64));

        let mut budgets = budgets.into_iter();
        let log = Rc::clone(&reopens);
        let seen = Rc::clone(&delivered);
        let mut reader = ResumableReader::lazy(move |offset: u64, _cause: Option<&io::Error>| {
            log.borrow_mut().push((offset, *seen.borrow()));
            Ok(Fragile {
                data: Cursor::new(source[offset as usize..].to_vec()),
                budget: budgets.next(),
            })
        });

        let mut out = Vec::new();
        let mut buf = vec![0u8; read_size];
        loop {
            let n = reader.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            out.extend_from_slice(&buf[..n]);
            *delivered.borrow_mut() += n as u64;
            prop_assert_eq!(reader.offset(), *delivered.borrow());
        }

        prop_assert_eq!(out, data);
        for (offset, delivered_then) in reopens.borrow().iter() {
            prop_assert_eq!(offset, delivered_then);
        }
    }

    #[test]
    fn test_retry_converges_after_k_failures(
        data in prop::collection::vec(any::<u8>(), 1..128),
        k in 0usize..10,
    ) {
        let calls = Rc::new(RefCell::new(0usize));
        let counter = Rc::clone(&calls);
        let source = data.clone();

        let mut reader = ResumableReader::lazy(move |offset: u64, _cause: Option<&io::Error>| {
            *counter.borrow_mut() += 1;
            let failing = *counter.borrow() <= k;
            Ok(Fragile {
                data: Cursor::new(source[offset as usize..].to_vec()),
                budget: if failing { Some(0) } else { None },
            })
        });

        let mut out = Vec::new();
        reader.read_to_end(&mut out).unwrap();

        prop_assert_eq!(out, data);
        prop_assert_eq!(*calls.borrow(), k + 1);
    }
}
