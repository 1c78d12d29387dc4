#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;

pub use encoder::AcctEncoder;
pub use error::EncodeError;
