use std::num::NonZeroU32;

use acct_types::CommandEncoding;
use acct_wire::{ACCT_BYTE_ORDER, AHZ, ByteOrder};

/// Tick rate used when none is configured: the kernel's `AHZ`.
pub const DEFAULT_TICK_RATE: NonZeroU32 = AHZ;

/// Configuration for the accounting decoder.
///
/// ```text
/// ┌──────────────────┬──────────────────────────────────────────────────┐
/// │ Field            │ Purpose                                          │
/// ├──────────────────┼──────────────────────────────────────────────────┤
/// │ byte_order       │ Order of multi-byte fields (default little)      │
/// │ tick_rate        │ comp_t ticks per second (default 64)             │
/// │ command_encoding │ Text encoding of ac_comm (default Latin-1)       │
/// │ check_filename   │ Reject names other than acct / acct.<suffix>     │
/// └──────────────────┴──────────────────────────────────────────────────┘
/// ```
///
/// Byte order is never taken from the host: accounting files are usually
/// examined on a different machine from the one that wrote them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecoderConfig {
    pub byte_order: ByteOrder,
    pub tick_rate: NonZeroU32,
    pub command_encoding: CommandEncoding,
    /// When `false`, the filename gate is skipped. Useful when the caller
    /// has already decided the stream is an accounting file.
    pub check_filename: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            byte_order: ACCT_BYTE_ORDER,
            tick_rate: DEFAULT_TICK_RATE,
            command_encoding: CommandEncoding::default(),
            check_filename: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_openbsd_amd64() {
        let config = DecoderConfig::default();
        assert_eq!(config.byte_order, ByteOrder::Little);
        assert_eq!(config.tick_rate.get(), 64);
        assert_eq!(config.command_encoding, CommandEncoding::Latin1);
        assert!(config.check_filename);
    }
}
