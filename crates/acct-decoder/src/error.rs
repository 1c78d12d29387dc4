use acct_types::{RecordPosition, TypeError};
use acct_wire::RECORD_SIZE;

/// Conditions that stop decoding of a whole stream.
///
/// Reported once per stream, before any record is produced (or, for
/// `Io`, at the point the source failed).
///
/// ```text
///   DecodeError
///   ├── WrongFormat     ← filename is not acct / acct.<suffix>; try another decoder
///   ├── TooSmall        ← shorter than one record; not an accounting file
///   └── Io              ← the underlying reader failed
/// ```
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The filename does not look like an accounting file.
    ///
    /// Not a user-facing failure: callers holding several decoders should
    /// route the stream elsewhere.
    #[error("{filename:?} is not an accounting file name (expected acct or acct.<suffix>)")]
    WrongFormat { filename: String },

    /// The stream cannot hold even one record.
    #[error("stream is {size} bytes, shorter than one {record_size}-byte record", record_size = RECORD_SIZE)]
    TooSmall { size: u64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl DecodeError {
    /// True for the soft rejections meaning "this is not an accounting
    /// file", as opposed to a failing source.
    pub fn is_wrong_format(&self) -> bool {
        matches!(self, Self::WrongFormat { .. } | Self::TooSmall { .. })
    }
}

/// Recoverable conditions attached to a stream.
///
/// Records decoded before a warning stay valid. Every record the decoder
/// skips produces exactly one warning, so nothing is dropped silently.
///
/// ```text
///   DecodeWarning
///   ├── TruncatedRecord ← 1-63 bytes after the last full record; decoding ends
///   └── FieldDecode     ← one record could not be decoded; decoding continues
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DecodeWarning {
    /// Bytes left over after the last complete record. They are never
    /// interpreted.
    #[error("truncated record at offset {offset}: {trailing_bytes} trailing bytes ignored")]
    TruncatedRecord { offset: u64, trailing_bytes: usize },

    /// A single record had a field that could not be decoded.
    #[error("record {} at offset {}: {source}", .position.index, .position.offset)]
    FieldDecode {
        position: RecordPosition,
        #[source]
        source: TypeError,
    },
}

impl DecodeWarning {
    /// Byte offset in the stream the warning refers to.
    pub fn offset(&self) -> u64 {
        match self {
            Self::TruncatedRecord { offset, .. } => *offset,
            Self::FieldDecode { position, .. } => position.offset,
        }
    }
}
