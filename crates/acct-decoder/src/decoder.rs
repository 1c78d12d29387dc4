use std::io::{Read, Seek};

use acct_types::{AcctEvent, RecordPosition};
use acct_wire::{RECORD_SIZE, RawRecord};
use tokio::io::AsyncRead;
use tracing::{debug, trace, warn};

use crate::config::DecoderConfig;
use crate::error::{DecodeError, DecodeWarning};
use crate::gate::check_filename;
use crate::reader::RecordReader;
use crate::records::Records;
use crate::sink::{DecodedFile, EventSink};
use crate::streaming::StreamingDecoder;

/// One step of decoding: a record, or a warning standing in for the
/// window (or tail) that could not become one.
///
/// ```text
///   Record(AcctEvent)
///   Record(AcctEvent)
///   Warning(FieldDecode)      ← record 2 skipped, decoding continues
///   Record(AcctEvent)
///   Warning(TruncatedRecord)  ← last item, if the stream has a partial tail
/// ```
#[derive(Debug, PartialEq)]
pub enum DecoderEvent {
    Record(AcctEvent),
    Warning(DecodeWarning),
}

/// OpenBSD accounting decoder.
///
/// A decoder is a [`DecoderConfig`] and nothing else. Every entry point
/// takes the filename and the bytes (or a source for them), checks the
/// filename gate and the minimum size, then walks the stream in 64-byte
/// windows:
///
///   1. **Gate**: `acct` or `acct.<suffix>`, else [`DecodeError::WrongFormat`]
///      (skipped when `check_filename` is off).
///   2. **Size**: at least one full record, else [`DecodeError::TooSmall`].
///   3. **Windows**: each full window becomes an [`AcctEvent`], or a
///      [`DecodeWarning::FieldDecode`] if one of its fields is
///      unrepresentable.
///   4. **Tail**: 1-63 leftover bytes produce one
///      [`DecodeWarning::TruncatedRecord`] and end the stream.
///
/// The same bytes always decode to the same sequence.
///
/// # Example
///
/// ```rust
/// use acct_decoder::AcctDecoder;
/// use acct_encoder::AcctEncoder;
///
/// let bytes = AcctEncoder::new()
///     .add_process(b"ls")
///     .with_starting_time(1_713_763_086)
///     .encode()
///     .unwrap();
///
/// let decoded = AcctDecoder::default().decode("acct", &bytes).unwrap();
/// assert_eq!(decoded.events.len(), 1);
/// assert_eq!(decoded.events[0].starting_time_iso8601(), "2024-04-22T05:18:06Z");
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct AcctDecoder {
    config: DecoderConfig,
}

impl AcctDecoder {
    #[must_use]
    pub fn new(config: DecoderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DecoderConfig {
        &self.config
    }

    /// Pull iterator over an in-memory stream.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::WrongFormat`] if the filename gate rejects `filename`.
    /// - [`DecodeError::TooSmall`] if `data` is shorter than one record.
    pub fn records<'a>(&self, filename: &str, data: &'a [u8]) -> Result<Records<'a>, DecodeError> {
        self.open(filename, data.len() as u64)?;
        Ok(Records::new(data, self.config))
    }

    /// Decode a complete in-memory stream into a [`DecodedFile`].
    ///
    /// # Errors
    ///
    /// Same as [`records`](Self::records).
    pub fn decode(&self, filename: &str, data: &[u8]) -> Result<DecodedFile, DecodeError> {
        let mut decoded = DecodedFile::default();
        self.decode_into(filename, data, &mut decoded)?;
        Ok(decoded)
    }

    /// Push every record and warning of `data` into `sink`, in order.
    ///
    /// Returns the number of records delivered.
    ///
    /// # Errors
    ///
    /// Same as [`records`](Self::records). Nothing reaches the sink when
    /// an error is returned.
    pub fn decode_into(
        &self,
        filename: &str,
        data: &[u8],
        sink: &mut impl EventSink,
    ) -> Result<usize, DecodeError> {
        let mut delivered = 0;
        for event in self.records(filename, data)? {
            match event {
                DecoderEvent::Record(record) => {
                    sink.record(record);
                    delivered += 1;
                }
                DecoderEvent::Warning(warning) => sink.warning(warning),
            }
        }
        Ok(delivered)
    }

    /// Pull iterator over a seekable source. The source is rewound to
    /// offset 0 first and owned by the iterator until it is dropped.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::WrongFormat`] if the filename gate rejects `filename`.
    /// - [`DecodeError::TooSmall`] if the source is shorter than one record.
    /// - [`DecodeError::Io`] if seeking fails.
    pub fn read<R: Read + Seek>(
        &self,
        filename: &str,
        reader: R,
    ) -> Result<RecordReader<R>, DecodeError> {
        RecordReader::new(filename, reader, self.config)
    }

    /// Async decoder over a non-seekable source.
    ///
    /// Only the filename is checked here; the size check happens on the
    /// first call to [`StreamingDecoder::next`].
    ///
    /// # Errors
    ///
    /// [`DecodeError::WrongFormat`] if the filename gate rejects `filename`.
    pub fn stream<R: AsyncRead + Unpin>(
        &self,
        filename: &str,
        reader: R,
    ) -> Result<StreamingDecoder<R>, DecodeError> {
        StreamingDecoder::new(filename, reader, self.config)
    }

    /// Gate and size checks shared by the in-memory entry points.
    fn open(&self, filename: &str, size: u64) -> Result<(), DecodeError> {
        check_gate(filename, &self.config)?;
        check_size(filename, size)
    }
}

/// Filename gate, unless the config turns it off.
pub(crate) fn check_gate(filename: &str, config: &DecoderConfig) -> Result<(), DecodeError> {
    if config.check_filename {
        check_filename(filename)?;
    }
    Ok(())
}

/// A stream must hold at least one full record.
pub(crate) fn check_size(filename: &str, size: u64) -> Result<(), DecodeError> {
    if size < RECORD_SIZE as u64 {
        debug!(filename, size, "rejecting stream shorter than one record");
        return Err(DecodeError::TooSmall { size });
    }
    debug!(filename, size, records = size / RECORD_SIZE as u64, "decoding accounting stream");
    Ok(())
}

/// Decode one full 64-byte window.
///
/// Field errors do not escape: they become a [`DecodeWarning::FieldDecode`]
/// carrying the record's position, so the caller can keep going.
pub(crate) fn decode_window(
    window: &[u8; RECORD_SIZE],
    position: RecordPosition,
    config: &DecoderConfig,
) -> DecoderEvent {
    let raw = RawRecord::from_window(window, config.byte_order);
    match AcctEvent::from_raw(&raw, position, config.tick_rate, config.command_encoding) {
        Ok(event) => {
            trace!(
                index = position.index,
                command = %event.command_name,
                pid = event.pid,
                "decoded record"
            );
            DecoderEvent::Record(event)
        }
        Err(source) => {
            let warning = DecodeWarning::FieldDecode { position, source };
            warn!(%warning, "skipping undecodable record");
            DecoderEvent::Warning(warning)
        }
    }
}
