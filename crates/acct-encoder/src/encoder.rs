use std::io::Write;
use std::num::NonZeroU32;
use std::time::Duration;

use acct_wire::{AHZ, ByteOrder, CompT, NO_TTY, RECORD_SIZE, RawRecord};

use crate::error::EncodeError;

/// Accounting stream encoder. Builds a byte stream of 64-byte records.
///
/// The decoder never needs this, but fixtures, tests, benchmarks and fuzz
/// round-trips do. It follows a builder pattern: [`add_process`](Self::add_process)
/// appends a record and the `with_*` modifiers set fields on the most
/// recently added one.
///
/// # Usage
///
/// ```rust
/// use std::time::Duration;
/// use acct_encoder::AcctEncoder;
///
/// let bytes = AcctEncoder::new()
///     .add_process(b"sh")
///     .with_user_time(Duration::from_millis(250))
///     .with_flags(0x001)
///     .add_process(b"ls")
///     .with_starting_time(1_713_763_086)
///     .with_tty(3072)
///     .with_pid(66_336)
///     .encode()
///     .unwrap();
///
/// assert_eq!(bytes.len(), 128);
/// ```
///
/// # Output layout
///
/// ```text
/// ┌──────────────┬──────────────────────────────────────────┐
/// │ [64 bytes]   │ Record 0                                 │
/// │ [64 bytes]   │ Record 1                                 │
/// │ ...          │                                          │
/// │ [0-N bytes]  │ Trailing bytes (only if appended)        │
/// └──────────────┴──────────────────────────────────────────┘
/// ```
pub struct AcctEncoder {
    records: Vec<PendingRecord>,
    byte_order: ByteOrder,
    tick_rate: NonZeroU32,
    /// Raw bytes written after the last record. Lets tests produce
    /// truncated files.
    trailing: Vec<u8>,
}

/// A record awaiting serialization. The command name is validated at
/// `.encode()` time so the builder methods can stay infallible.
struct PendingRecord {
    command: Vec<u8>,
    raw: RawRecord,
}

impl AcctEncoder {
    /// Create an encoder writing little-endian records at 64 ticks per
    /// second.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            byte_order: ByteOrder::default(),
            tick_rate: AHZ,
            trailing: Vec::new(),
        }
    }

    pub fn with_byte_order(&mut self, order: ByteOrder) -> &mut Self {
        self.byte_order = order;
        self
    }

    pub fn with_tick_rate(&mut self, tick_rate: NonZeroU32) -> &mut Self {
        self.tick_rate = tick_rate;
        self
    }

    /// Append a record for a process named `command`.
    ///
    /// Every other field starts at zero except the tty, which starts at
    /// `-1` (no controlling terminal).
    pub fn add_process(&mut self, command: &[u8]) -> &mut Self {
        self.records.push(PendingRecord {
            command: command.to_vec(),
            raw: RawRecord {
                tty: NO_TTY,
                ..RawRecord::default()
            },
        });
        self
    }

    /// Append a fully built raw record as-is. Its command field is written
    /// unchanged, including bytes after the first NUL.
    pub fn add_raw(&mut self, raw: RawRecord) -> &mut Self {
        self.records.push(PendingRecord {
            command: raw.command_bytes().to_vec(),
            raw,
        });
        self
    }

    /// Append bytes after the last record.
    pub fn append_trailing(&mut self, bytes: &[u8]) -> &mut Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    // ── Modifier methods ────────────────────────────────────────────────
    //
    // Modifiers act on the most recently added record.

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_user_time(&mut self, time: Duration) -> &mut Self {
        let rate = self.tick_rate;
        self.last("with_user_time").user_time = CompT::from_duration(time, rate);
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_system_time(&mut self, time: Duration) -> &mut Self {
        let rate = self.tick_rate;
        self.last("with_system_time").system_time = CompT::from_duration(time, rate);
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_elapsed_time(&mut self, time: Duration) -> &mut Self {
        let rate = self.tick_rate;
        self.last("with_elapsed_time").elapsed_time = CompT::from_duration(time, rate);
        self
    }

    /// Set the I/O block count.
    ///
    /// Readers divide `ac_io` by the tick rate like the time fields, so
    /// the count is scaled up by the tick rate before compression.
    ///
    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_io_blocks(&mut self, count: u64) -> &mut Self {
        let ticks = count.saturating_mul(u64::from(self.tick_rate.get()));
        self.last("with_io_blocks").io_blocks = CompT::from_ticks(ticks);
        self
    }

    /// Set a `comp_t` field from its raw 16-bit value, bypassing rounding.
    ///
    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_raw_times(&mut self, user: u16, system: u16, elapsed: u16, io: u16) -> &mut Self {
        let raw = self.last("with_raw_times");
        raw.user_time = CompT::from_raw(user);
        raw.system_time = CompT::from_raw(system);
        raw.elapsed_time = CompT::from_raw(elapsed);
        raw.io_blocks = CompT::from_raw(io);
        self
    }

    /// Set the start time in seconds since the Unix epoch.
    ///
    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_starting_time(&mut self, epoch_seconds: u64) -> &mut Self {
        self.last("with_starting_time").starting_time = epoch_seconds;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_uid(&mut self, uid: u32) -> &mut Self {
        self.last("with_uid").uid = uid;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_gid(&mut self, gid: u32) -> &mut Self {
        self.last("with_gid").gid = gid;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_memory(&mut self, average_memory: u32) -> &mut Self {
        self.last("with_memory").average_memory = average_memory;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_tty(&mut self, tty: i32) -> &mut Self {
        self.last("with_tty").tty = tty;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_pid(&mut self, pid: u32) -> &mut Self {
        self.last("with_pid").pid = pid;
        self
    }

    /// # Panics
    ///
    /// Panics if no records have been added yet.
    pub fn with_flags(&mut self, flags: u32) -> &mut Self {
        self.last("with_flags").flags = flags;
        self
    }

    fn last(&mut self, method: &str) -> &mut RawRecord {
        match self.records.last_mut() {
            Some(pending) => &mut pending.raw,
            None => panic!("{method} called but no records have been added"),
        }
    }

    // ── Serialization ───────────────────────────────────────────────────

    /// Serialize all records (and any trailing bytes) into a new buffer.
    ///
    /// # Errors
    ///
    /// - [`EncodeError::EmptyPayload`] if nothing was added.
    /// - [`EncodeError::Record`] if a command name does not fit the
    ///   24-byte field.
    pub fn encode(&self) -> Result<Vec<u8>, EncodeError> {
        let mut output = Vec::with_capacity(self.records.len() * RECORD_SIZE + self.trailing.len());
        self.write_to(&mut output)?;
        Ok(output)
    }

    /// Serialize into `w`, returning the number of bytes written.
    ///
    /// # Errors
    ///
    /// Same as [`encode`](Self::encode), plus [`EncodeError::Io`] for
    /// write failures.
    pub fn write_to(&self, w: &mut impl Write) -> Result<usize, EncodeError> {
        if self.records.is_empty() && self.trailing.is_empty() {
            return Err(EncodeError::EmptyPayload);
        }

        let mut written = 0;
        for (index, pending) in self.records.iter().enumerate() {
            let mut raw = pending.raw.clone();
            if pending.command != raw.command_bytes() {
                raw.set_command(&pending.command)
                    .map_err(|source| EncodeError::Record { index, source })?;
            }
            w.write_all(&raw.to_bytes(self.byte_order))?;
            written += RECORD_SIZE;
        }

        w.write_all(&self.trailing)?;
        written += self.trailing.len();

        Ok(written)
    }
}

impl Default for AcctEncoder {
    fn default() -> Self {
        Self::new()
    }
}
