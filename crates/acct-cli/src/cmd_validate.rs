/// Implementation of `acct validate`.
///
/// Decodes the whole file and reports either a series of success
/// checkmarks (`✓`) or diagnostic lines (`✗`). Exits with code 0 only when
/// the file is accepted and every byte decodes without a warning.
///
/// # Success output
///
/// ```text
/// ✓ Filename: acct
/// ✓ Size: 128 bytes
/// ✓ Records: 2 records decoded
/// ✓ Trailing: none
/// ```
///
/// # Failure output
///
/// ```text
/// ✓ Filename: acct
/// ✓ Size: 150 bytes
/// ✓ Records: 2 records decoded
/// ✗ Warning: truncated record at offset 128: 22 trailing bytes ignored
/// ```
use std::fs;

use acct_decoder::{AcctDecoder, DecodeError, DecodeWarning, DecoderConfig};
use anyhow::{Context, Result, anyhow};

use crate::ValidateArgs;

/// Run the `acct validate` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is rejected by the
/// decoder, or raises any warning.
pub fn run(args: &ValidateArgs, config: &DecoderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let filename = args.file.to_string_lossy();

    let decoded = match AcctDecoder::new(*config).decode(&filename, &bytes) {
        Ok(decoded) => decoded,
        Err(e) => {
            println!("✗ Error: {}", decode_error_diagnostic(&e));
            return Err(anyhow!("validation failed"));
        }
    };

    if config.check_filename {
        println!("✓ Filename: {filename}");
    }
    println!("✓ Size: {} bytes", bytes.len());
    println!(
        "✓ Records: {} record{} decoded",
        decoded.events.len(),
        if decoded.events.len() == 1 { "" } else { "s" }
    );

    let truncated = decoded
        .warnings
        .iter()
        .any(|w| matches!(w, DecodeWarning::TruncatedRecord { .. }));
    if !truncated {
        println!("✓ Trailing: none");
    }

    if decoded.is_clean() {
        return Ok(());
    }
    for warning in &decoded.warnings {
        println!("✗ Warning: {warning}");
    }
    Err(anyhow!(
        "validation failed with {} warning{}",
        decoded.warnings.len(),
        if decoded.warnings.len() == 1 { "" } else { "s" }
    ))
}

// ── Error formatting ──────────────────────────────────────────────────────────

/// Converts a `DecodeError` into a one-line diagnostic.
///
/// ```text
/// ┌─────────────┬─────────────────────────────────────────────────────┐
/// │ Variant     │ Diagnostic                                          │
/// ├─────────────┼─────────────────────────────────────────────────────┤
/// │ WrongFormat │ "not an accounting file: <name>"                    │
/// │ TooSmall    │ "too small: <n> bytes, need at least 64"            │
/// │ Io          │ "<io error Display>"                                │
/// └─────────────┴─────────────────────────────────────────────────────┘
/// ```
fn decode_error_diagnostic(e: &DecodeError) -> String {
    match e {
        DecodeError::WrongFormat { filename } => {
            format!("not an accounting file: {filename} (use --ignore-filename to override)")
        }
        DecodeError::TooSmall { size } => {
            format!("too small: {size} bytes, need at least {}", acct_wire::RECORD_SIZE)
        }
        DecodeError::Io(inner) => inner.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use acct_encoder::AcctEncoder;
    use tempfile::tempdir;

    use super::*;

    fn write_file(dir: &Path, name: &str, trailing: &[u8]) -> PathBuf {
        let mut encoder = AcctEncoder::new();
        encoder
            .add_process(b"sh")
            .add_process(b"ls")
            .append_trailing(trailing);
        let path = dir.join(name);
        fs::write(&path, encoder.encode().unwrap()).unwrap();
        path
    }

    #[test]
    fn clean_file_validates() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            file: write_file(dir.path(), "acct", &[]),
        };
        run(&args, &DecoderConfig::default()).unwrap();
    }

    #[test]
    fn trailing_bytes_fail_validation() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            file: write_file(dir.path(), "acct.0", &[0u8; 22]),
        };
        let err = run(&args, &DecoderConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "validation failed with 1 warning");
    }

    #[test]
    fn wrong_filename_fails_unless_ignored() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            file: write_file(dir.path(), "wtmp", &[]),
        };
        let err = run(&args, &DecoderConfig::default()).unwrap_err();
        assert_eq!(err.to_string(), "validation failed");

        let lenient = DecoderConfig {
            check_filename: false,
            ..DecoderConfig::default()
        };
        run(&args, &lenient).unwrap();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = tempdir().unwrap();
        let args = ValidateArgs {
            file: dir.path().join("acct"),
        };
        let err = run(&args, &DecoderConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("cannot read "));
    }

    #[test]
    fn diagnostics_name_the_problem() {
        let wrong = DecodeError::WrongFormat {
            filename: "wtmp".to_string(),
        };
        assert!(decode_error_diagnostic(&wrong).starts_with("not an accounting file: wtmp"));
        let small = DecodeError::TooSmall { size: 12 };
        assert_eq!(
            decode_error_diagnostic(&small),
            "too small: 12 bytes, need at least 64"
        );
    }
}
