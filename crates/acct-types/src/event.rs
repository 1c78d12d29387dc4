use std::num::NonZeroU32;

use acct_wire::{NO_TTY, RawRecord};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::command::{CommandEncoding, decode_command};
use crate::duration::format_duration;
use crate::error::TypeError;
use crate::flags::TerminationFlags;
use crate::timestamp::{format_iso8601, serialize_iso8601, starting_time};

/// Tag identifying events produced from OpenBSD accounting records.
pub const DATA_TYPE: &str = "openbsd:system_accounting:struct";

/// Where a record sits in its source stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RecordPosition {
  /// Zero-based record number.
  pub index: usize,
  /// Byte offset of the record's first byte.
  pub offset: u64,
}

/// One decoded accounting record.
///
/// Times are plain seconds; the `*_formatted` accessors produce the
/// `HH:MM:SS.ss` strings. The start time is a UTC [`DateTime`] and
/// serializes as `YYYY-MM-DDTHH:MM:SSZ`. Flags serialize as the ordered
/// list of cause descriptions.
///
/// ```text
/// ┌──────────────────────┬───────────────────────────────────────────┐
/// │ Field                │ Source                                    │
/// ├──────────────────────┼───────────────────────────────────────────┤
/// │ command_name         │ ac_comm up to first NUL, Latin-1 default  │
/// │ user_time            │ ac_utime  comp_t → seconds                │
/// │ system_time          │ ac_stime  comp_t → seconds                │
/// │ elapsed_time         │ ac_etime  comp_t → seconds                │
/// │ count_io_blocks      │ ac_io     comp_t → real count             │
/// │ starting_time        │ ac_btime  epoch seconds, UTC              │
/// │ uid / gid            │ ac_uid / ac_gid                           │
/// │ average_memory_usage │ ac_mem                                    │
/// │ tty                  │ ac_tty (-1 = none)                        │
/// │ pid                  │ ac_pid                                    │
/// │ flags                │ ac_flag                                   │
/// └──────────────────────┴───────────────────────────────────────────┘
/// ```
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AcctEvent {
  pub data_type: &'static str,
  #[serde(flatten)]
  pub position: RecordPosition,
  pub command_name: String,
  pub user_time: f64,
  pub system_time: f64,
  pub elapsed_time: f64,
  pub count_io_blocks: f64,
  #[serde(serialize_with = "serialize_iso8601")]
  pub starting_time: DateTime<Utc>,
  pub uid: u32,
  pub gid: u32,
  pub average_memory_usage: u32,
  pub tty: i32,
  pub pid: u32,
  pub flags: TerminationFlags,
}

impl AcctEvent {
  /// Decode a raw record.
  ///
  /// `tick_rate` converts `comp_t` ticks to seconds (normally
  /// [`acct_wire::AHZ`]); the I/O block count goes through the same
  /// conversion, as `acct(5)` tools do.
  ///
  /// # Errors
  ///
  /// - [`TypeError::TimestampOutOfRange`] if `ac_btime` cannot be
  ///   represented.
  /// - [`TypeError::InvalidCommandName`] if the command bytes are invalid
  ///   in `encoding`.
  pub fn from_raw(
    raw: &RawRecord,
    position: RecordPosition,
    tick_rate: NonZeroU32,
    encoding: CommandEncoding,
  ) -> Result<Self, TypeError> {
    let command_name = decode_command(raw.command_bytes(), encoding)?;
    let starting_time = starting_time(raw.starting_time)?;

    Ok(Self {
      data_type: DATA_TYPE,
      position,
      command_name,
      user_time: raw.user_time.seconds(tick_rate),
      system_time: raw.system_time.seconds(tick_rate),
      elapsed_time: raw.elapsed_time.seconds(tick_rate),
      count_io_blocks: raw.io_blocks.seconds(tick_rate),
      starting_time,
      uid: raw.uid,
      gid: raw.gid,
      average_memory_usage: raw.average_memory,
      tty: raw.tty,
      pid: raw.pid,
      flags: TerminationFlags::from_raw(raw.flags),
    })
  }

  pub fn user_time_formatted(&self) -> String {
    format_duration(self.user_time)
  }

  pub fn system_time_formatted(&self) -> String {
    format_duration(self.system_time)
  }

  pub fn elapsed_time_formatted(&self) -> String {
    format_duration(self.elapsed_time)
  }

  pub fn starting_time_iso8601(&self) -> String {
    format_iso8601(&self.starting_time)
  }

  /// Flag descriptions joined with `", "`.
  pub fn flags_description(&self) -> String {
    self.flags.describe()
  }

  pub fn has_tty(&self) -> bool {
    self.tty != NO_TTY
  }
}
