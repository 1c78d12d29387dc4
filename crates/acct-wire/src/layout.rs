//! Fixed layout of the OpenBSD `struct acct` record.
//!
//! ```text
//! ┌────────┬─────────┬──────────────────────────────────────────┐
//! │ Offset │ Size    │ Field                                    │
//! ├────────┼─────────┼──────────────────────────────────────────┤
//! │ 0x00   │ 24      │ ac_comm   command name, NUL padded       │
//! │ 0x18   │ 2       │ ac_utime  user time (comp_t)             │
//! │ 0x1A   │ 2       │ ac_stime  system time (comp_t)           │
//! │ 0x1C   │ 2       │ ac_etime  elapsed time (comp_t)          │
//! │ 0x1E   │ 2       │ ac_io     count of IO blocks (comp_t)    │
//! │ 0x20   │ 8       │ ac_btime  starting time (epoch seconds)  │
//! │ 0x28   │ 4       │ ac_uid    user id                        │
//! │ 0x2C   │ 4       │ ac_gid    group id                       │
//! │ 0x30   │ 4       │ ac_mem    average memory usage           │
//! │ 0x34   │ 4       │ ac_tty    controlling tty (-1 = none)    │
//! │ 0x38   │ 4       │ ac_pid    process id                     │
//! │ 0x3C   │ 4       │ ac_flag   accounting flags               │
//! └────────┴─────────┴──────────────────────────────────────────┘
//! ```

/// Size of one record in bytes.
pub const RECORD_SIZE: usize = 64;

/// Width of the `ac_comm` field, including the terminating NUL.
pub const COMMAND_LEN: usize = 24;

pub const OFFSET_COMMAND: usize = 0;
pub const OFFSET_USER_TIME: usize = 24;
pub const OFFSET_SYSTEM_TIME: usize = 26;
pub const OFFSET_ELAPSED_TIME: usize = 28;
pub const OFFSET_IO_BLOCKS: usize = 30;
pub const OFFSET_STARTING_TIME: usize = 32;
pub const OFFSET_UID: usize = 40;
pub const OFFSET_GID: usize = 44;
pub const OFFSET_MEMORY: usize = 48;
pub const OFFSET_TTY: usize = 52;
pub const OFFSET_PID: usize = 56;
pub const OFFSET_FLAGS: usize = 60;

// Each field starts where the previous one ends and the last one ends
// exactly at RECORD_SIZE. A typo in the table above fails the build.
const _: () = assert!(OFFSET_COMMAND + COMMAND_LEN == OFFSET_USER_TIME);
const _: () = assert!(OFFSET_USER_TIME + 2 == OFFSET_SYSTEM_TIME);
const _: () = assert!(OFFSET_SYSTEM_TIME + 2 == OFFSET_ELAPSED_TIME);
const _: () = assert!(OFFSET_ELAPSED_TIME + 2 == OFFSET_IO_BLOCKS);
const _: () = assert!(OFFSET_IO_BLOCKS + 2 == OFFSET_STARTING_TIME);
const _: () = assert!(OFFSET_STARTING_TIME + 8 == OFFSET_UID);
const _: () = assert!(OFFSET_UID + 4 == OFFSET_GID);
const _: () = assert!(OFFSET_GID + 4 == OFFSET_MEMORY);
const _: () = assert!(OFFSET_MEMORY + 4 == OFFSET_TTY);
const _: () = assert!(OFFSET_TTY + 4 == OFFSET_PID);
const _: () = assert!(OFFSET_PID + 4 == OFFSET_FLAGS);
const _: () = assert!(OFFSET_FLAGS + 4 == RECORD_SIZE);

/// Byte order of the multi-byte integer fields.
///
/// Accounting files are written in the producing machine's native order
/// and are usually analysed somewhere else, so the order is always an
/// explicit choice and never the host's.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ByteOrder {
    /// amd64, arm64, i386 and the other common OpenBSD targets.
    #[default]
    Little,
    /// sparc64, powerpc64, octeon and friends.
    Big,
}

/// Byte order assumed for accounting files unless configured otherwise.
pub const ACCT_BYTE_ORDER: ByteOrder = ByteOrder::Little;

impl ByteOrder {
    pub fn read_u16(self, bytes: [u8; 2]) -> u16 {
        match self {
            Self::Little => u16::from_le_bytes(bytes),
            Self::Big => u16::from_be_bytes(bytes),
        }
    }

    pub fn read_u32(self, bytes: [u8; 4]) -> u32 {
        match self {
            Self::Little => u32::from_le_bytes(bytes),
            Self::Big => u32::from_be_bytes(bytes),
        }
    }

    pub fn read_i32(self, bytes: [u8; 4]) -> i32 {
        match self {
            Self::Little => i32::from_le_bytes(bytes),
            Self::Big => i32::from_be_bytes(bytes),
        }
    }

    pub fn read_u64(self, bytes: [u8; 8]) -> u64 {
        match self {
            Self::Little => u64::from_le_bytes(bytes),
            Self::Big => u64::from_be_bytes(bytes),
        }
    }

    pub fn write_u16(self, value: u16) -> [u8; 2] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    pub fn write_u32(self, value: u32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    pub fn write_i32(self, value: i32) -> [u8; 4] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }

    pub fn write_u64(self, value: u64) -> [u8; 8] {
        match self {
            Self::Little => value.to_le_bytes(),
            Self::Big => value.to_be_bytes(),
        }
    }
}
