/// Implementation of `acct inspect`.
///
/// Reads an accounting file, decodes it, and prints one line per record.
/// Warnings are printed inline at the position they occur.
///
/// # Output format
///
/// ```text
/// File: /var/account/acct (128 bytes, 2 records)
/// Record 0 @0x0000: sh pid=1 uid=0 gid=0 tty=- start=2024-04-22T05:18:05Z flags=[F]
/// Record 1 @0x0040: ls pid=66336 uid=0 gid=0 tty=3072 start=2024-04-22T05:18:06Z flags=[]
///          user=00:00:00.00 system=00:00:00.00 elapsed=00:00:00.00 io=0 mem=0
/// ```
use std::fs;
use std::fmt::Write as _;

use acct_decoder::{AcctDecoder, DecoderConfig, DecoderEvent};
use acct_types::AcctEvent;
use acct_wire::RECORD_SIZE;
use anyhow::{Context, Result};

use crate::InspectArgs;

/// Run the `acct inspect` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the decoder rejects it
/// (wrong filename, shorter than one record).
pub fn run(args: &InspectArgs, config: &DecoderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let filename = args.file.to_string_lossy();

    let records = AcctDecoder::new(*config)
        .records(&filename, &bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let full = bytes.len() / RECORD_SIZE;
    println!(
        "File: {} ({} bytes, {full} record{})",
        args.file.display(),
        bytes.len(),
        if full == 1 { "" } else { "s" }
    );

    for event in records {
        match event {
            DecoderEvent::Record(record) => {
                if let Some(target) = args.record
                    && record.position.index != target
                {
                    continue;
                }
                println!("{}", summary_line(&record));
                println!("         {}", times_line(&record));
                if args.show_hex {
                    // Offsets come from full windows, so the slice is in bounds.
                    #[allow(clippy::cast_possible_truncation)]
                    let start = record.position.offset as usize;
                    print_hex(&bytes[start..start + RECORD_SIZE]);
                }
            }
            DecoderEvent::Warning(warning) => println!("Warning: {warning}"),
        }
    }

    Ok(())
}

// ── Record formatting helpers ─────────────────────────────────────────────────

fn summary_line(record: &AcctEvent) -> String {
    let tty = if record.has_tty() {
        record.tty.to_string()
    } else {
        "-".to_string()
    };
    format!(
        "Record {} @0x{:04x}: {} pid={} uid={} gid={} tty={tty} start={} flags=[{}]",
        record.position.index,
        record.position.offset,
        record.command_name,
        record.pid,
        record.uid,
        record.gid,
        record.starting_time_iso8601(),
        record.flags_description(),
    )
}

fn times_line(record: &AcctEvent) -> String {
    format!(
        "user={} system={} elapsed={} io={} mem={}",
        record.user_time_formatted(),
        record.system_time_formatted(),
        record.elapsed_time_formatted(),
        record.count_io_blocks,
        record.average_memory_usage,
    )
}

/// 16 bytes per line: offset, hex, printable ASCII.
fn print_hex(raw: &[u8]) {
    for (i, chunk) in raw.chunks(16).enumerate() {
        let offset = i * 16;
        let hex = chunk
            .iter()
            .fold(String::with_capacity(chunk.len() * 3), |mut s, b| {
                if !s.is_empty() {
                    s.push(' ');
                }
                let _ = write!(s, "{b:02x}");
                s
            });
        let ascii: String = chunk
            .iter()
            .map(|&b| if b.is_ascii_graphic() { b as char } else { '.' })
            .collect();
        println!("           {offset:04x}  {hex:<47}  {ascii}");
    }
}

#[cfg(test)]
mod tests {
    use acct_encoder::AcctEncoder;
    use tempfile::tempdir;

    use super::*;

    fn args_for(bytes: &[u8], name: &str, dir: &std::path::Path) -> InspectArgs {
        let file = dir.join(name);
        fs::write(&file, bytes).unwrap();
        InspectArgs {
            file,
            show_hex: true,
            record: None,
        }
    }

    #[test]
    fn inspects_file_with_hex_dump_and_record_filter() {
        let dir = tempdir().unwrap();
        let bytes = AcctEncoder::new()
            .add_process(b"sh")
            .add_process(b"ls")
            .append_trailing(&[0xFF; 5])
            .encode()
            .unwrap();
        let mut args = args_for(&bytes, "acct", dir.path());
        run(&args, &DecoderConfig::default()).unwrap();

        args.record = Some(99);
        run(&args, &DecoderConfig::default()).unwrap();
    }

    #[test]
    fn too_small_file_is_rejected() {
        let dir = tempdir().unwrap();
        let args = args_for(&[0u8; 63], "acct", dir.path());
        let err = run(&args, &DecoderConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode "));
    }

    #[test]
    fn summary_marks_missing_tty() {
        let bytes = AcctEncoder::new()
            .add_process(b"cron")
            .with_pid(7)
            .with_flags(0x001)
            .encode()
            .unwrap();
        let decoded = AcctDecoder::default().decode("acct", &bytes).unwrap();
        let line = summary_line(&decoded.events[0]);
        assert!(line.starts_with("Record 0 @0x0000: cron pid=7 uid=0 gid=0 tty=- "));
        assert!(line.ends_with("flags=[fork but not exec]"));
    }
}
