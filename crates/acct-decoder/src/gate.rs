use std::ffi::OsStr;
use std::path::Path;

use crate::error::DecodeError;

/// Base name written by `accton(8)`.
pub const ACCT_FILENAME: &str = "acct";

/// True if `name` is `acct` or `acct.<suffix>`.
///
/// Only the last path component is examined, so `/var/account/acct.2`
/// passes. The suffix is unconstrained: rotation by `daily(8)` produces
/// `acct.0` through `acct.3`, but nothing else relies on the shape.
///
/// ```text
///   acct          ✓
///   acct.0        ✓
///   acct.old      ✓
///   acct2         ✗
///   account       ✗
///   backup.acct   ✗
/// ```
pub fn is_accounting_filename(name: &str) -> bool {
    let base = Path::new(name)
        .file_name()
        .and_then(OsStr::to_str)
        .unwrap_or(name);

    match base.strip_prefix(ACCT_FILENAME) {
        Some(rest) => rest.is_empty() || rest.starts_with('.'),
        None => false,
    }
}

/// Gate a stream on its filename.
///
/// # Errors
///
/// Returns [`DecodeError::WrongFormat`] when `name` is not an accounting
/// filename.
pub fn check_filename(name: &str) -> Result<(), DecodeError> {
    if is_accounting_filename(name) {
        Ok(())
    } else {
        Err(DecodeError::WrongFormat {
            filename: name.to_string(),
        })
    }
}
