#![warn(clippy::pedantic)]

pub mod command;
pub mod duration;
pub mod error;
pub mod event;
pub mod flags;
pub mod timestamp;

pub use command::{CommandEncoding, decode_command};
pub use duration::format_duration;
pub use error::TypeError;
pub use event::{AcctEvent, DATA_TYPE, RecordPosition};
pub use flags::TerminationFlags;
pub use timestamp::{format_iso8601, starting_time};
