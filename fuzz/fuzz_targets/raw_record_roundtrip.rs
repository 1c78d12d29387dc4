#![no_main]

use acct_wire::{ByteOrder, RawRecord, RECORD_SIZE};
use libfuzzer_sys::fuzz_target;

// Fuzz target: any 64-byte window survives read → write unchanged.
//
// The layout has no padding and no reserved bits, so the raw record must
// reproduce its input byte for byte.
fuzz_target!(|window: [u8; RECORD_SIZE]| {
    for order in [ByteOrder::Little, ByteOrder::Big] {
        let raw = RawRecord::from_window(&window, order);
        assert_eq!(raw.to_bytes(order), window);
    }
});
