use crate::error::TypeError;

/// Text encoding applied to the `ac_comm` bytes.
///
/// The kernel copies the executable's name byte for byte, so nothing
/// guarantees UTF-8. Latin-1 is the default because it maps every byte to
/// exactly one character and cannot fail.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CommandEncoding {
  /// ISO-8859-1: byte `b` becomes `char::from(b)`.
  #[default]
  Latin1,
  /// Strict UTF-8; invalid sequences are a per-record error.
  Utf8,
}

impl CommandEncoding {
  pub fn name(self) -> &'static str {
    match self {
      Self::Latin1 => "ISO-8859-1",
      Self::Utf8 => "UTF-8",
    }
  }
}

/// Decode a command name that has already been cut at its first NUL.
///
/// # Errors
///
/// Returns [`TypeError::InvalidCommandName`] only for
/// [`CommandEncoding::Utf8`] when `bytes` is not valid UTF-8.
pub fn decode_command(bytes: &[u8], encoding: CommandEncoding) -> Result<String, TypeError> {
  match encoding {
    CommandEncoding::Latin1 => Ok(bytes.iter().map(|&b| char::from(b)).collect()),
    CommandEncoding::Utf8 => std::str::from_utf8(bytes)
      .map(str::to_owned)
      .map_err(|e| TypeError::InvalidCommandName {
        encoding: encoding.name(),
        valid_up_to: e.valid_up_to(),
      }),
  }
}
