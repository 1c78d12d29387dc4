#![warn(clippy::pedantic)]

pub mod config;
pub mod decoder;
pub mod error;
pub mod gate;
pub mod reader;
pub mod records;
pub mod sink;
pub mod streaming;

pub use config::{DEFAULT_TICK_RATE, DecoderConfig};
pub use decoder::{AcctDecoder, DecoderEvent};
pub use error::{DecodeError, DecodeWarning};
pub use gate::{ACCT_FILENAME, check_filename, is_accounting_filename};
pub use reader::RecordReader;
pub use records::Records;
pub use sink::{DecodedFile, EventSink};
pub use streaming::StreamingDecoder;
