#![no_main]

use acct_decoder::{AcctDecoder, DecoderEvent};
use acct_wire::RECORD_SIZE;
use libfuzzer_sys::fuzz_target;

// Fuzz target: full decoder over arbitrary bytes.
//
// Every input either is rejected as too small or yields exactly one event
// per full window plus at most one truncation warning, and decoding the
// same bytes twice gives the same result.
fuzz_target!(|data: &[u8]| {
    let decoder = AcctDecoder::default();
    let Ok(records) = decoder.records("acct", data) else {
        assert!(data.len() < RECORD_SIZE);
        return;
    };

    let events: Vec<_> = records.collect();
    let full = data.len() / RECORD_SIZE;
    let partial = usize::from(data.len() % RECORD_SIZE != 0);
    assert_eq!(events.len(), full + partial);
    if partial == 1 {
        assert!(matches!(events.last(), Some(DecoderEvent::Warning(_))));
    }

    let first = decoder.decode("acct", data).unwrap();
    let second = decoder.decode("acct", data).unwrap();
    assert_eq!(first, second);
});
