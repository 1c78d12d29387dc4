use acct_types::RecordPosition;
use acct_wire::RECORD_SIZE;
use tokio::io::{AsyncRead, AsyncReadExt};
use tracing::{debug, warn};

use crate::config::DecoderConfig;
use crate::decoder::{DecoderEvent, check_gate, decode_window};
use crate::error::{DecodeError, DecodeWarning};

/// Asynchronous streaming decoder that yields records one at a time
/// without buffering the whole file.
///
/// Use it for pipes, sockets or any source whose length is not known
/// up front. The decoder holds exactly one 64-byte window; it reads the
/// next window only when the caller awaits the next item.
///
/// Because the length is unknown, [`DecodeError::TooSmall`] is reported
/// by the first call to [`next`](Self::next) rather than at construction.
///
/// # Example
///
/// ```rust,no_run
/// use acct_decoder::{AcctDecoder, DecoderEvent};
/// use tokio::io::AsyncRead;
///
/// async fn count_records(reader: impl AsyncRead + Unpin) -> usize {
///     let mut stream = AcctDecoder::default().stream("acct", reader).unwrap();
///     let mut count = 0;
///     while let Some(event) = stream.next().await {
///         if let Ok(DecoderEvent::Record(_)) = event {
///             count += 1;
///         }
///     }
///     count
/// }
/// ```
pub struct StreamingDecoder<R> {
    reader: R,
    state: StreamState,
    config: DecoderConfig,
    window: [u8; RECORD_SIZE],
    offset: u64,
    index: usize,
}

/// Internal state machine for the streaming decoder.
///
/// ```text
///   ReadFirst → Scanning → Done
///       │                   ▲
///       └──(< 64 bytes)─────┘
/// ```
///
/// `ReadFirst` differs from `Scanning` only in how a short read is
/// reported: as `TooSmall` for the first window, as a truncation
/// warning afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum StreamState {
    ReadFirst,
    Scanning,
    Done,
}

impl<R: AsyncRead + Unpin> StreamingDecoder<R> {
    pub(crate) fn new(filename: &str, reader: R, config: DecoderConfig) -> Result<Self, DecodeError> {
        check_gate(filename, &config)?;
        debug!(filename, "streaming accounting records");
        Ok(Self {
            reader,
            state: StreamState::ReadFirst,
            config,
            window: [0u8; RECORD_SIZE],
            offset: 0,
            index: 0,
        })
    }

    /// Read the next event from the stream.
    ///
    /// Returns `Some(Ok(event))` for each record or warning, `None` once
    /// the stream is exhausted, and `Some(Err(_))` if the source fails or
    /// holds less than one record. After an error the decoder is done.
    pub async fn next(&mut self) -> Option<Result<DecoderEvent, DecodeError>> {
        if self.state == StreamState::Done {
            return None;
        }

        let filled = match self.fill_window().await {
            Ok(filled) => filled,
            Err(e) => {
                self.state = StreamState::Done;
                return Some(Err(DecodeError::Io(e)));
            }
        };

        if filled < RECORD_SIZE {
            let first = self.state == StreamState::ReadFirst;
            self.state = StreamState::Done;
            if first {
                return Some(Err(DecodeError::TooSmall { size: filled as u64 }));
            }
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

        self.state = StreamState::Scanning;
        let position = RecordPosition {
            index: self.index,
            offset: self.offset,
        };
        self.index += 1;
        self.offset += RECORD_SIZE as u64;
        Some(Ok(decode_window(&self.window, position, &self.config)))
    }

    /// Give back the underlying reader.
    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Read until the window is full or the source reports end of input.
    /// Returns how many bytes were filled.
    async fn fill_window(&mut self) -> std::io::Result<usize> {
        let mut filled = 0;
        while filled < RECORD_SIZE {
            let n = self.reader.read(&mut self.window[filled..]).await?;
            if n == 0 {
                break;
            }
            filled += n;
        }
        Ok(filled)
    }
}
