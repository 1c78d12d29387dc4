//! Golden fixture generator for the accounting conformance suite.
//!
//! Writes every fixture under `tests/golden/`. Run it after any layout
//! change and commit the result; the conformance and edge-case tests read
//! these files directly.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin generate_golden -p acct-tests
//! ```
//!
//! # Generated fixtures
//!
//! | Path                                | Contents                                  |
//! |-------------------------------------|-------------------------------------------|
//! | acct                                | `sh` (fork, signal) + `ls`                |
//! | rotated/acct.0                      | `cron` + `sendmail` + `vi`, exponent > 0  |
//! | edge_cases/truncated/acct           | `acct` + 22 trailing bytes                |
//! | edge_cases/too_small/acct           | 40 zero bytes                             |
//! | edge_cases/latin1_command/acct      | command `caf\xE9`                         |
//! | edge_cases/bad_timestamp/acct       | middle record has `ac_btime = u64::MAX`   |
//! | edge_cases/big_endian/acct          | `ls` written big-endian                   |
//! | edge_cases/full_command/acct        | 24-byte command with no NUL               |
//! | edge_cases/unknown_flags/acct       | known and unknown `ac_flag` bits          |
//! | edge_cases/wrong_name/wtmp          | copy of `acct` under a rejected name      |

#![allow(clippy::pedantic)]

use std::path::Path;

use acct_encoder::AcctEncoder;
use acct_wire::{ByteOrder, COMMAND_LEN, CompT, NO_TTY, RawRecord};

/// Start time of the `ls` record: 2024-04-22T05:18:06Z.
const LS_START: u64 = 1_713_763_086;

fn main() {
    let manifest_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let golden_dir = manifest_dir.join("tests/golden");

    let acct = basic_acct();
    write_file(&golden_dir.join("acct"), &acct);
    write_file(&golden_dir.join("rotated/acct.0"), &rotated());
    generate_edge_cases(&golden_dir.join("edge_cases"), &acct);

    println!("All golden fixtures written to {}", golden_dir.display());
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create_dir_all");
    }
    std::fs::write(path, data).expect("write_file");
    println!("  wrote {} ({} bytes)", path.display(), data.len());
}

// ── Fixture generators ────────────────────────────────────────────────────────

fn basic_acct() -> Vec<u8> {
    AcctEncoder::new()
        .add_process(b"sh")
        .with_raw_times(16, 10, 640, 3)
        .with_starting_time(LS_START - 6)
        .with_uid(1000)
        .with_gid(1000)
        .with_memory(120)
        .with_tty(1280)
        .with_pid(4242)
        .with_flags(0x011)
        .add_process(b"ls")
        .with_starting_time(LS_START)
        .with_uid(0)
        .with_gid(0)
        .with_tty(3072)
        .with_pid(66_336)
        .encode()
        .expect("encode acct")
}

fn rotated() -> Vec<u8> {
    AcctEncoder::new()
        .add_process(b"cron")
        .with_raw_times(0, 1, 64, 0)
        .with_starting_time(1_713_740_400)
        .with_pid(100)
        .with_flags(0x001)
        .add_process(b"sendmail")
        .with_raw_times(0, 0, 0x2064, 0)
        .with_starting_time(1_713_740_401)
        .with_pid(101)
        .add_process(b"vi")
        .with_raw_times(320, 64, 0x2100, 7)
        .with_starting_time(1_713_740_500)
        .with_uid(1000)
        .with_gid(1000)
        .with_memory(2048)
        .with_tty(1281)
        .with_pid(102)
        .with_flags(0x018)
        .encode()
        .expect("encode rotated")
}

fn generate_edge_cases(dir: &Path, acct: &[u8]) {
    let mut truncated = acct.to_vec();
    truncated.extend_from_slice(&[0xEE; 22]);
    write_file(&dir.join("truncated/acct"), &truncated);

    write_file(&dir.join("too_small/acct"), &[0u8; 40]);

    let latin1 = AcctEncoder::new()
        .add_process(b"caf\xE9")
        .with_starting_time(LS_START)
        .with_pid(7)
        .encode()
        .expect("encode latin1");
    write_file(&dir.join("latin1_command/acct"), &latin1);

    let bad_timestamp = AcctEncoder::new()
        .add_process(b"a")
        .with_starting_time(LS_START)
        .with_pid(1)
        .add_process(b"b")
        .with_starting_time(u64::MAX)
        .with_pid(2)
        .add_process(b"c")
        .with_starting_time(LS_START + 1)
        .with_pid(3)
        .encode()
        .expect("encode bad_timestamp");
    write_file(&dir.join("bad_timestamp/acct"), &bad_timestamp);

    let big_endian = AcctEncoder::new()
        .with_byte_order(ByteOrder::Big)
        .add_process(b"ls")
        .with_starting_time(LS_START)
        .with_tty(3072)
        .with_pid(66_336)
        .encode()
        .expect("encode big_endian");
    write_file(&dir.join("big_endian/acct"), &big_endian);

    let mut command = [0u8; COMMAND_LEN];
    command.copy_from_slice(b"abcdefghijklmnopqrstuvwx");
    let full_command = AcctEncoder::new()
        .add_raw(RawRecord {
            command,
            elapsed_time: CompT::from_raw(64),
            starting_time: LS_START,
            tty: NO_TTY,
            pid: 8,
            ..RawRecord::default()
        })
        .encode()
        .expect("encode full_command");
    write_file(&dir.join("full_command/acct"), &full_command);

    let unknown_flags = AcctEncoder::new()
        .add_process(b"ls")
        .with_starting_time(LS_START)
        .with_pid(9)
        .with_flags(0x1811)
        .encode()
        .expect("encode unknown_flags");
    write_file(&dir.join("unknown_flags/acct"), &unknown_flags);

    write_file(&dir.join("wrong_name/wtmp"), acct);
}
