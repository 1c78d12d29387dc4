#![no_main]

use acct_wire::{CompT, AHZ};
use libfuzzer_sys::fuzz_target;

// Fuzz target: comp_t expansion and compression.
//
// Expansion must never overflow, and compressing any tick count must land
// within one unit of the chosen exponent's precision (or saturate).
fuzz_target!(|input: (u16, u64)| {
    let (raw, ticks) = input;

    let value = CompT::from_raw(raw);
    let seconds = value.seconds(AHZ);
    assert!(seconds.is_finite() && seconds >= 0.0);

    let packed = CompT::from_ticks(ticks);
    if packed != CompT::MAX {
        let precision = 1u64 << (3 * u32::from(packed.exponent()));
        assert!(packed.ticks().abs_diff(ticks) <= precision);
    }
});
