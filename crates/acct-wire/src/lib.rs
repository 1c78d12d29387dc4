#![warn(clippy::pedantic)]

pub mod comp_t;
pub mod error;
pub mod layout;
pub mod record;

pub use comp_t::{AHZ, CompT};
pub use error::WireError;
pub use layout::{ACCT_BYTE_ORDER, ByteOrder, COMMAND_LEN, RECORD_SIZE};
pub use record::{NO_TTY, RawRecord};
