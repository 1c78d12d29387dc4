use acct_wire::WireError;

/// Errors that can occur while building an accounting stream.
///
/// Error hierarchy:
///
/// ```text
///   EncodeError
///   ├── EmptyPayload         ← no records or trailing bytes were added
///   ├── Record               ← a command name does not fit its field
///   └── Io(std::io::Error)   ← from underlying I/O writes
/// ```
#[derive(Debug, thiserror::Error)]
pub enum EncodeError {
    #[error("no records have been added to the encoder")]
    EmptyPayload,

    #[error("record {index}: {source}")]
    Record {
        index: usize,
        #[source]
        source: WireError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
