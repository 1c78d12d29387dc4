#![no_main]

use acct_wire::{ByteOrder, RawRecord};
use libfuzzer_sys::fuzz_target;

// Fuzz target: RawRecord::read_from with arbitrary bytes in both orders.
//
// Catches bugs in:
// - Offset arithmetic for every field
// - Short buffer handling
// - Command name NUL scanning
fuzz_target!(|data: &[u8]| {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        if let Ok(raw) = RawRecord::read_from(data, order) {
            assert!(raw.command_bytes().len() <= raw.command.len());
        }
    }
});
