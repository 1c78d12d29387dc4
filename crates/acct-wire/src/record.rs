use crate::comp_t::CompT;
use crate::error::WireError;
use crate::layout::{
    ByteOrder, COMMAND_LEN, OFFSET_COMMAND, OFFSET_ELAPSED_TIME, OFFSET_FLAGS, OFFSET_GID,
    OFFSET_IO_BLOCKS, OFFSET_MEMORY, OFFSET_PID, OFFSET_STARTING_TIME, OFFSET_SYSTEM_TIME,
    OFFSET_TTY, OFFSET_UID, OFFSET_USER_TIME, RECORD_SIZE,
};

/// One undecoded accounting record, field for field as the kernel wrote it.
///
/// No interpretation happens at this layer: `comp_t` values stay
/// compressed, the start time stays an integer and the command name
/// stays a NUL-padded byte array. `acct-types` turns this into a
/// decoded event.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub command: [u8; COMMAND_LEN],
    pub user_time: CompT,
    pub system_time: CompT,
    pub elapsed_time: CompT,
    pub io_blocks: CompT,
    /// Seconds since the Unix epoch, UTC.
    pub starting_time: u64,
    pub uid: u32,
    pub gid: u32,
    pub average_memory: u32,
    /// Device number of the controlling terminal, `-1` without one.
    pub tty: i32,
    pub pid: u32,
    pub flags: u32,
}

/// Value of `ac_tty` for processes without a controlling terminal.
pub const NO_TTY: i32 = -1;

impl RawRecord {
    /// Bytes of the command name up to (not including) the first NUL.
    ///
    /// A field with no NUL at all yields all 24 bytes.
    pub fn command_bytes(&self) -> &[u8] {
        let end = self
            .command
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(COMMAND_LEN);
        &self.command[..end]
    }

    /// Store `name` in the command field, NUL padding the rest.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::CommandTooLong`] if `name` leaves no room for
    /// the terminating NUL.
    pub fn set_command(&mut self, name: &[u8]) -> Result<(), WireError> {
        let max = COMMAND_LEN - 1;
        if name.len() > max {
            return Err(WireError::CommandTooLong {
                len: name.len(),
                max,
            });
        }
        self.command = [0u8; COMMAND_LEN];
        self.command[..name.len()].copy_from_slice(name);
        Ok(())
    }

    /// Parse a record from the first [`RECORD_SIZE`] bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than one
    /// record.
    pub fn read_from(buf: &[u8], order: ByteOrder) -> Result<Self, WireError> {
        let window: &[u8; RECORD_SIZE] = buf
            .get(..RECORD_SIZE)
            .and_then(|slice| slice.try_into().ok())
            .ok_or(WireError::UnexpectedEof {
                offset: 0,
                needed: RECORD_SIZE,
                available: buf.len(),
            })?;
        Ok(Self::from_window(window, order))
    }

    /// Parse a record from an exactly sized window. Infallible.
    pub fn from_window(window: &[u8; RECORD_SIZE], order: ByteOrder) -> Self {
        let mut command = [0u8; COMMAND_LEN];
        command.copy_from_slice(&window[OFFSET_COMMAND..OFFSET_COMMAND + COMMAND_LEN]);

        Self {
            command,
            user_time: CompT::from_raw(order.read_u16(array_at(window, OFFSET_USER_TIME))),
            system_time: CompT::from_raw(order.read_u16(array_at(window, OFFSET_SYSTEM_TIME))),
            elapsed_time: CompT::from_raw(order.read_u16(array_at(window, OFFSET_ELAPSED_TIME))),
            io_blocks: CompT::from_raw(order.read_u16(array_at(window, OFFSET_IO_BLOCKS))),
            starting_time: order.read_u64(array_at(window, OFFSET_STARTING_TIME)),
            uid: order.read_u32(array_at(window, OFFSET_UID)),
            gid: order.read_u32(array_at(window, OFFSET_GID)),
            average_memory: order.read_u32(array_at(window, OFFSET_MEMORY)),
            tty: order.read_i32(array_at(window, OFFSET_TTY)),
            pid: order.read_u32(array_at(window, OFFSET_PID)),
            flags: order.read_u32(array_at(window, OFFSET_FLAGS)),
        }
    }

    /// Serialize into the first [`RECORD_SIZE`] bytes of `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`WireError::UnexpectedEof`] if `buf` is shorter than one
    /// record.
    pub fn write_to(&self, buf: &mut [u8], order: ByteOrder) -> Result<(), WireError> {
        let available = buf.len();
        let window = buf
            .first_chunk_mut::<RECORD_SIZE>()
            .ok_or(WireError::UnexpectedEof {
                offset: 0,
                needed: RECORD_SIZE,
                available,
            })?;
        self.write_window(window, order);
        Ok(())
    }

    /// Serialize into a fresh 64-byte array.
    pub fn to_bytes(&self, order: ByteOrder) -> [u8; RECORD_SIZE] {
        let mut buf = [0u8; RECORD_SIZE];
        self.write_window(&mut buf, order);
        buf
    }

    fn write_window(&self, buf: &mut [u8; RECORD_SIZE], order: ByteOrder) {
        buf[OFFSET_COMMAND..OFFSET_COMMAND + COMMAND_LEN].copy_from_slice(&self.command);
        put(buf, OFFSET_USER_TIME, &order.write_u16(self.user_time.raw()));
        put(buf, OFFSET_SYSTEM_TIME, &order.write_u16(self.system_time.raw()));
        put(buf, OFFSET_ELAPSED_TIME, &order.write_u16(self.elapsed_time.raw()));
        put(buf, OFFSET_IO_BLOCKS, &order.write_u16(self.io_blocks.raw()));
        put(buf, OFFSET_STARTING_TIME, &order.write_u64(self.starting_time));
        put(buf, OFFSET_UID, &order.write_u32(self.uid));
        put(buf, OFFSET_GID, &order.write_u32(self.gid));
        put(buf, OFFSET_MEMORY, &order.write_u32(self.average_memory));
        put(buf, OFFSET_TTY, &order.write_i32(self.tty));
        put(buf, OFFSET_PID, &order.write_u32(self.pid));
        put(buf, OFFSET_FLAGS, &order.write_u32(self.flags));
    }
}

/// Copy `N` bytes starting at `offset` out of a record window.
///
/// Offsets come from the layout constants, which are checked at compile
/// time to lie inside the record, so the slice is always `N` long.
fn array_at<const N: usize>(window: &[u8; RECORD_SIZE], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&window[offset..offset + N]);
    out
}

fn put(buf: &mut [u8; RECORD_SIZE], offset: usize, bytes: &[u8]) {
    buf[offset..offset + bytes.len()].copy_from_slice(bytes);
}
