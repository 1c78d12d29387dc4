/// Errors raised while reading or writing the raw 64-byte record layout.
///
/// These are purely structural: the wire layer never interprets field
/// values, so the only things that can go wrong are short buffers and
/// names that do not fit.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum WireError {
    /// Input ended before a complete record could be read.
    #[error("unexpected end of input at offset {offset}: need {needed} bytes, have {available}")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Command name does not fit in the fixed-width field.
    ///
    /// The field must keep at least one trailing NUL, so the longest
    /// storable name is `COMMAND_LEN - 1` bytes.
    #[error("command name is {len} bytes, field holds at most {max}")]
    CommandTooLong { len: usize, max: usize },
}

// NOTE
// Each variant carries the context needed to locate the problem in a
// binary file. `UnexpectedEof` reports the offset where the read started
// and how short the buffer was, which is what you want when staring at a
// hex dump of a truncated accounting file.
