/// Errors raised while turning a raw record into a decoded event.
///
/// These are per-field problems: the record's bytes were all there, but
/// one value could not be represented. The decoder reports them as a
/// warning for that record and moves on to the next one.
///
/// # Error hierarchy
///
/// ```text
/// ┌──────────────────────────────────────────────────────────┐
/// │ TypeError (this crate)                                   │
/// │   ├── TimestampOutOfRange for unrepresentable ac_btime   │
/// │   └── InvalidCommandName for bad bytes in strict mode    │
/// └──────────────────────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
  /// The start time does not fit the calendar range of the date type.
  #[error("starting time {seconds} is outside the representable date range")]
  TimestampOutOfRange { seconds: u64 },

  /// The command name is not valid in the configured text encoding.
  ///
  /// Only reachable with [`CommandEncoding::Utf8`](crate::CommandEncoding::Utf8);
  /// Latin-1 maps every byte to a character.
  #[error("command name is not valid {encoding}: invalid byte at position {valid_up_to}")]
  InvalidCommandName {
    encoding: &'static str,
    valid_up_to: usize,
  },
}
