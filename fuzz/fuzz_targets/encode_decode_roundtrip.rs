#![no_main]

use acct_decoder::{AcctDecoder, DecoderConfig};
use acct_encoder::AcctEncoder;
use acct_wire::ByteOrder;
use arbitrary::{Arbitrary, Unstructured};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct FuzzProcess {
    command: Vec<u8>,
    times: (u16, u16, u16, u16),
    starting_time: u32,
    uid: u32,
    gid: u32,
    memory: u32,
    tty: i32,
    pid: u32,
    flags: u32,
}

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    processes: Vec<FuzzProcess>,
    big_endian: bool,
    trailing: Vec<u8>,
}

// Fuzz target: AcctEncoder -> AcctDecoder roundtrip.
//
// Generates records via the encoder, then decodes them. Every record with
// a representable command name must come back with the same fields.
fuzz_target!(|data: &[u8]| {
    let mut u = Unstructured::new(data);
    let Ok(input) = FuzzInput::arbitrary(&mut u) else {
        return;
    };

    let order = if input.big_endian {
        ByteOrder::Big
    } else {
        ByteOrder::Little
    };

    let processes: Vec<_> = input
        .processes
        .iter()
        .take(32)
        .filter(|p| p.command.len() < 24 && !p.command.contains(&0))
        .collect();
    if processes.is_empty() {
        return;
    }

    let mut encoder = AcctEncoder::new();
    encoder.with_byte_order(order);
    for p in &processes {
        let (user, system, elapsed, io) = p.times;
        encoder
            .add_process(&p.command)
            .with_raw_times(user, system, elapsed, io)
            .with_starting_time(u64::from(p.starting_time))
            .with_uid(p.uid)
            .with_gid(p.gid)
            .with_memory(p.memory)
            .with_tty(p.tty)
            .with_pid(p.pid)
            .with_flags(p.flags);
    }
    let trailing = &input.trailing[..input.trailing.len().min(63)];
    encoder.append_trailing(trailing);

    let Ok(payload) = encoder.encode() else {
        return;
    };

    let decoder = AcctDecoder::new(DecoderConfig {
        byte_order: order,
        ..DecoderConfig::default()
    });
    let decoded = decoder.decode("acct", &payload);
    assert!(decoded.is_ok(), "decoder failed on valid encoder output: {:?}", decoded.err());
    let decoded = decoded.unwrap();

    assert_eq!(decoded.events.len(), processes.len());
    assert_eq!(decoded.warnings.len(), usize::from(!trailing.is_empty()));
    for (event, p) in decoded.events.iter().zip(&processes) {
        assert_eq!(event.command_name.chars().count(), p.command.len());
        assert_eq!(event.pid, p.pid);
        assert_eq!(event.tty, p.tty);
        assert_eq!(event.flags.raw(), p.flags);
    }
});
