/// Implementation of `acct decode`.
///
/// Decodes every record and renders it to stdout or `-o <file>`.
///
/// ```text
/// ┌────────┬──────────────────────────────────────────────────────────────┐
/// │ Format │ Output                                                       │
/// ├────────┼──────────────────────────────────────────────────────────────┤
/// │ text   │ `key: value` lines per record, blank line between (default)  │
/// │ json   │ one pretty-printed array of event objects                    │
/// │ jsonl  │ one compact event object per line                            │
/// └────────┴──────────────────────────────────────────────────────────────┘
/// ```
///
/// Warnings are not part of the output; they are logged to stderr.
use std::fs;
use std::io::{self, Write};

use acct_decoder::{AcctDecoder, DecoderConfig};
use acct_types::AcctEvent;
use anyhow::{Context, Result};

use crate::{DecodeArgs, OutputFormat};

/// Run the `acct decode` command.
///
/// # Errors
///
/// Returns an error if the file cannot be read, the decoder rejects it,
/// serialization fails, or the output cannot be written.
pub fn run(args: &DecodeArgs, config: &DecoderConfig) -> Result<()> {
    let bytes =
        fs::read(&args.file).with_context(|| format!("cannot read {}", args.file.display()))?;
    let filename = args.file.to_string_lossy();

    let decoded = AcctDecoder::new(*config)
        .decode(&filename, &bytes)
        .with_context(|| format!("failed to decode {}", args.file.display()))?;

    let rendered = render(&decoded.events, args.format)?;

    if let Some(ref path) = args.output {
        fs::write(path, &rendered)
            .with_context(|| format!("cannot write {}", path.display()))?;
    } else {
        io::stdout()
            .write_all(rendered.as_bytes())
            .context("cannot write to stdout")?;
    }

    Ok(())
}

fn render(events: &[AcctEvent], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Text => {
            for (i, event) in events.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                render_text(&mut out, event);
            }
        }
        OutputFormat::Json => {
            out = serde_json::to_string_pretty(events).context("cannot serialize events")?;
            out.push('\n');
        }
        OutputFormat::Jsonl => {
            for event in events {
                out.push_str(&serde_json::to_string(event).context("cannot serialize event")?);
                out.push('\n');
            }
        }
    }
    Ok(out)
}

fn render_text(out: &mut String, event: &AcctEvent) {
    use std::fmt::Write as _;

    let fields: [(&str, String); 13] = [
        ("command_name", event.command_name.clone()),
        ("starting_time", event.starting_time_iso8601()),
        ("user_time", event.user_time_formatted()),
        ("system_time", event.system_time_formatted()),
        ("elapsed_time", event.elapsed_time_formatted()),
        ("count_io_blocks", event.count_io_blocks.to_string()),
        ("uid", event.uid.to_string()),
        ("gid", event.gid.to_string()),
        ("average_memory_usage", event.average_memory_usage.to_string()),
        ("tty", event.tty.to_string()),
        ("pid", event.pid.to_string()),
        ("flags", event.flags_description()),
        ("data_type", event.data_type.to_string()),
    ];
    for (key, value) in fields {
        let _ = writeln!(out, "{key}: {value}");
    }
}

#[cfg(test)]
mod tests {
    use acct_encoder::AcctEncoder;
    use acct_types::{CommandEncoding, RecordPosition};
    use acct_wire::{AHZ, RawRecord};
    use tempfile::tempdir;

    use super::*;

    fn ls() -> AcctEvent {
        let mut raw = RawRecord {
            starting_time: 1_713_763_086,
            tty: 3072,
            pid: 66_336,
            ..RawRecord::default()
        };
        raw.set_command(b"ls").unwrap();
        AcctEvent::from_raw(&raw, RecordPosition::default(), AHZ, CommandEncoding::Latin1).unwrap()
    }

    #[test]
    fn output_flag_writes_rendered_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("acct");
        let bytes = AcctEncoder::new()
            .add_process(b"sh")
            .with_pid(1)
            .add_process(b"ls")
            .with_pid(2)
            .encode()
            .unwrap();
        fs::write(&input, bytes).unwrap();

        let output = dir.path().join("out.jsonl");
        let args = DecodeArgs {
            file: input,
            format: OutputFormat::Jsonl,
            output: Some(output.clone()),
        };
        run(&args, &DecoderConfig::default()).unwrap();

        let written = fs::read_to_string(&output).unwrap();
        let pids: Vec<_> = written
            .lines()
            .map(|line| serde_json::from_str::<serde_json::Value>(line).unwrap()["pid"].clone())
            .collect();
        assert_eq!(pids, [serde_json::json!(1), serde_json::json!(2)]);
    }

    #[test]
    fn rejected_file_names_the_path() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("acct");
        fs::write(&input, [0u8; 10]).unwrap();
        let args = DecodeArgs {
            file: input,
            format: OutputFormat::Text,
            output: Some(dir.path().join("out.txt")),
        };
        let err = run(&args, &DecoderConfig::default()).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode "));
        assert!(matches!(
            err.downcast_ref::<acct_decoder::DecodeError>(),
            Some(acct_decoder::DecodeError::TooSmall { size: 10 })
        ));
        assert!(!dir.path().join("out.txt").exists());
    }

    #[test]
    fn text_lists_every_field() {
        let text = render(&[ls()], OutputFormat::Text).unwrap();
        assert!(text.starts_with("command_name: ls\nstarting_time: 2024-04-22T05:18:06Z\n"));
        assert!(text.contains("user_time: 00:00:00.00\n"));
        assert!(text.contains("pid: 66336\n"));
        assert!(text.ends_with("data_type: openbsd:system_accounting:struct\n"));
    }

    #[test]
    fn jsonl_is_one_object_per_line() {
        let text = render(&[ls(), ls()], OutputFormat::Jsonl).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        let value: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(value["command_name"], "ls");
        assert_eq!(value["starting_time"], "2024-04-22T05:18:06Z");
    }

    #[test]
    fn json_is_an_array() {
        let text = render(&[ls()], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(1));
    }
}
