use std::io::{ErrorKind, Read, Seek, SeekFrom};
use std::iter::FusedIterator;

use acct_types::RecordPosition;
use acct_wire::RECORD_SIZE;
use tracing::warn;

use crate::config::DecoderConfig;
use crate::decoder::{DecoderEvent, check_gate, check_size, decode_window};
use crate::error::{DecodeError, DecodeWarning};
use crate::records::ScanState;

/// Pull iterator over a seekable source, one 64-byte window at a time.
///
/// The source length is measured up front so [`DecodeError::TooSmall`]
/// is reported before any record. Each item is a `Result` because the
/// source can still fail mid-stream; after an `Err` the iterator is
/// exhausted.
///
/// Created by [`AcctDecoder::read`](crate::AcctDecoder::read).
pub struct RecordReader<R> {
    reader: R,
    state: ScanState,
    config: DecoderConfig,
    window: [u8; RECORD_SIZE],
    offset: u64,
    index: usize,
}

impl<R: Read + Seek> RecordReader<R> {
    pub(crate) fn new(filename: &str, mut reader: R, config: DecoderConfig) -> Result<Self, DecodeError> {
        check_gate(filename, &config)?;
        let size = reader.seek(SeekFrom::End(0))?;
        reader.seek(SeekFrom::Start(0))?;
        check_size(filename, size)?;

        Ok(Self {
            reader,
            state: ScanState::Scanning,
            config,
            window: [0u8; RECORD_SIZE],
            offset: 0,
            index: 0,
        })
    }

    /// Give back the underlying reader, positioned after the last window read.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn fill_window(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            match self.reader.read(&mut self.window[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(e),
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Seek> Iterator for RecordReader<R> {
    type Item = Result<DecoderEvent, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state == ScanState::Done {
            return None;
        }

        let filled = match self.fill_window() {
            Ok(filled) => filled,
            Err(e) => {
                self.state = ScanState::Done;
                return Some(Err(DecodeError::Io(e)));
            }
        };

        if filled < RECORD_SIZE {
            self.state = ScanState::Done;
            if filled == 0 {
                return None;
            }
            let warning = DecodeWarning::TruncatedRecord {
                offset: self.offset,
                trailing_bytes: filled,
            };
            warn!(%warning, "stopping at partial record");
            return Some(Ok(DecoderEvent::Warning(warning)));
        }

        let position = RecordPosition {
            index: self.index,
            offset: self.offset,
        };
        self.index += 1;
        self.offset += RECORD_SIZE as u64;
        Some(Ok(decode_window(&self.window, position, &self.config)))
    }
}

impl<R: Read + Seek> FusedIterator for RecordReader<R> {}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use acct_encoder::AcctEncoder;

    use super::*;
    use crate::AcctDecoder;

    fn sample(trailing: usize) -> Vec<u8> {
        let mut encoder = AcctEncoder::new();
        encoder
            .add_process(b"cron")
            .with_uid(0)
            .add_process(b"ls")
            .with_uid(1000)
            .add_process(b"cc")
            .with_flags(0x010);
        encoder.append_trailing(&vec![0x11; trailing]);
        encoder.encode().unwrap()
    }

    #[test]
    fn reader_matches_slice_iterator() {
        let bytes = sample(9);
        let decoder = AcctDecoder::default();
        let from_reader: Vec<_> = decoder
            .read("acct", Cursor::new(bytes.clone()))
            .unwrap()
            .map(Result::unwrap)
            .collect();
        let from_slice: Vec<_> = decoder.records("acct", &bytes).unwrap().collect();
        assert_eq!(from_reader, from_slice);
    }

    #[test]
    fn into_inner_returns_reader_after_last_window() {
        let bytes = sample(9);
        let mut records = AcctDecoder::default().read("acct", Cursor::new(bytes.clone())).unwrap();
        assert!(matches!(records.next(), Some(Ok(DecoderEvent::Record(_)))));
        let cursor = records.into_inner();
        assert_eq!(cursor.position(), RECORD_SIZE as u64);
        assert_eq!(cursor.get_ref(), &bytes);

        let mut records = AcctDecoder::default().read("acct", Cursor::new(bytes.clone())).unwrap();
        assert_eq!(records.by_ref().count(), 4);
        assert_eq!(records.into_inner().position(), bytes.len() as u64);
    }

    #[test]
    fn reader_rewinds_before_decoding() {
        let mut cursor = Cursor::new(sample(0));
        cursor.set_position(100);
        let count = AcctDecoder::default().read("acct.1", cursor).unwrap().count();
        assert_eq!(count, 3);
    }

    #[test]
    fn reader_reports_too_small_up_front() {
        let result = AcctDecoder::default().read("acct", Cursor::new(vec![0u8; 10]));
        assert!(matches!(result, Err(DecodeError::TooSmall { size: 10 })));
    }

    #[test]
    fn reader_checks_filename() {
        let result = AcctDecoder::default().read("lastlog", Cursor::new(sample(0)));
        assert!(matches!(result, Err(DecodeError::WrongFormat { .. })));
    }

    /// Reader that fails after handing out a fixed number of bytes.
    struct FailingAfter {
        inner: Cursor<Vec<u8>>,
        budget: usize,
    }

    impl Read for FailingAfter {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if self.budget == 0 {
                return Err(std::io::Error::other("disk went away"));
            }
            let len = buf.len().min(self.budget);
            let n = self.inner.read(&mut buf[..len])?;
            self.budget -= n;
            Ok(n)
        }
    }

    impl Seek for FailingAfter {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.inner.seek(pos)
        }
    }

    #[test]
    fn io_error_ends_iteration() {
        let source = FailingAfter {
            inner: Cursor::new(sample(0)),
            budget: 100,
        };
        let mut reader = AcctDecoder::default().read("acct", source).unwrap();
        assert!(matches!(reader.next(), Some(Ok(DecoderEvent::Record(_)))));
        assert!(matches!(reader.next(), Some(Err(DecodeError::Io(_)))));
        assert!(reader.next().is_none());
    }
}
