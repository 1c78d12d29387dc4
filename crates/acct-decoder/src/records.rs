use std::iter::FusedIterator;

use acct_types::RecordPosition;
use acct_wire::RECORD_SIZE;
use tracing::warn;

use crate::config::DecoderConfig;
use crate::decoder::{DecoderEvent, decode_window};
use crate::error::DecodeWarning;

/// Scan state shared by every front end.
///
/// ```text
///   Scanning ──(0 bytes left)──────────────► Done
///   Scanning ──(1-63 bytes left, warn)─────► Done
///   Scanning ──(64 bytes, emit)──► Scanning
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ScanState {
    Scanning,
    Done,
}

/// Pull iterator over the records of an in-memory stream.
///
/// Yields one [`DecoderEvent`] per 64-byte window in file order, plus at
/// most one trailing [`DecodeWarning::TruncatedRecord`]. Holds nothing but
/// a cursor into the borrowed bytes; drop it at any point to stop.
///
/// Created by [`AcctDecoder::records`](crate::AcctDecoder::records).
#[derive(Clone, Debug)]
pub struct Records<'a> {
    data: &'a [u8],
    cursor: usize,
    index: usize,
    state: ScanState,
    config: DecoderConfig,
}

impl<'a> Records<'a> {
    pub(crate) fn new(data: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            data,
            cursor: 0,
            index: 0,
            state: ScanState::Scanning,
            config,
        }
    }

    /// Byte offset of the next window.
    pub fn offset(&self) -> usize {
        self.cursor
    }
}

impl Iterator for Records<'_> {
    type Item = DecoderEvent;

    fn next(&mut self) -> Option<DecoderEvent> {
        if self.state == ScanState::Done {
            return None;
        }

        let remaining = &self.data[self.cursor..];

        let Some(window) = remaining.first_chunk::<RECORD_SIZE>() else {
            self.state = ScanState::Done;
            if remaining.is_empty() {
                return None;
            }
            let warning = DecodeWarning::TruncatedRecord {
                offset: self.cursor as u64,
                trailing_bytes: remaining.len(),
            };
            warn!(%warning, "stopping at partial record");
            return Some(DecoderEvent::Warning(warning));
        };

        let position = RecordPosition {
            index: self.index,
            offset: self.cursor as u64,
        };
        self.cursor += RECORD_SIZE;
        self.index += 1;

        Some(decode_window(window, position, &self.config))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state == ScanState::Done {
            return (0, Some(0));
        }
        let remaining = self.data.len() - self.cursor;
        let full = remaining / RECORD_SIZE;
        let partial = usize::from(remaining % RECORD_SIZE != 0);
        (full + partial, Some(full + partial))
    }
}

impl ExactSizeIterator for Records<'_> {}

impl FusedIterator for Records<'_> {}

#[cfg(test)]
mod tests {
    use acct_encoder::AcctEncoder;

    use super::*;

    fn stream(records: usize, trailing: usize) -> Vec<u8> {
        let mut encoder = AcctEncoder::new();
        for i in 0..records {
            encoder.add_process(b"true").with_pid(u32::try_from(i).unwrap());
        }
        encoder.append_trailing(&vec![0x5A; trailing]);
        encoder.encode().unwrap()
    }

    #[test]
    fn one_event_per_window() {
        let data = stream(3, 0);
        let events: Vec<_> = Records::new(&data, DecoderConfig::default()).collect();
        assert_eq!(events.len(), 3);
        for (i, event) in events.iter().enumerate() {
            let DecoderEvent::Record(record) = event else {
                panic!("expected record, got {event:?}");
            };
            assert_eq!(record.position.index, i);
            assert_eq!(record.position.offset, (i * RECORD_SIZE) as u64);
        }
    }

    #[test]
    fn partial_tail_yields_single_warning_then_stops() {
        let data = stream(2, 17);
        let mut records = Records::new(&data, DecoderConfig::default());
        assert!(matches!(records.next(), Some(DecoderEvent::Record(_))));
        assert!(matches!(records.next(), Some(DecoderEvent::Record(_))));
        assert!(matches!(
            records.next(),
            Some(DecoderEvent::Warning(DecodeWarning::TruncatedRecord {
                offset: 128,
                trailing_bytes: 17
            }))
        ));
        assert!(records.next().is_none());
        assert!(records.next().is_none());
    }

    #[test]
    fn size_hint_counts_the_tail_warning() {
        let data = stream(2, 1);
        let mut records = Records::new(&data, DecoderConfig::default());
        assert_eq!(records.len(), 3);
        records.next();
        assert_eq!(records.len(), 2);
        records.by_ref().for_each(drop);
        assert_eq!(records.len(), 0);
    }

    #[test]
    fn offset_tracks_cursor() {
        let data = stream(2, 0);
        let mut records = Records::new(&data, DecoderConfig::default());
        assert_eq!(records.offset(), 0);
        records.next();
        assert_eq!(records.offset(), 64);
    }
}
