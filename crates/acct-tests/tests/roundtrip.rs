//! Encoder → decoder round-trips across all three decoder front ends.

use std::io::Cursor;
use std::time::Duration;

use acct_decoder::{AcctDecoder, DecodedFile, DecoderConfig, DecoderEvent, EventSink};
use acct_encoder::AcctEncoder;
use acct_types::{AcctEvent, CommandEncoding};
use acct_wire::ByteOrder;

fn workload() -> Vec<u8> {
    let mut encoder = AcctEncoder::new();
    for pid in 0..50u32 {
        encoder
            .add_process(format!("job{pid}").as_bytes())
            .with_user_time(Duration::from_millis(u64::from(pid) * 125))
            .with_elapsed_time(Duration::from_secs(u64::from(pid) * 60))
            .with_starting_time(1_713_763_086 + u64::from(pid))
            .with_uid(pid % 3)
            .with_pid(pid + 1000)
            .with_flags(if pid % 7 == 0 { 0x008 } else { 0 });
    }
    encoder.encode().unwrap()
}

fn records_of(events: impl IntoIterator<Item = DecoderEvent>) -> Vec<AcctEvent> {
    events
        .into_iter()
        .filter_map(|event| match event {
            DecoderEvent::Record(record) => Some(record),
            DecoderEvent::Warning(w) => panic!("unexpected warning: {w}"),
        })
        .collect()
}

#[test]
fn fields_survive_the_round_trip() {
    let decoded = AcctDecoder::default().decode("acct", &workload()).unwrap();
    assert_eq!(decoded.events.len(), 50);

    let job = &decoded.events[8];
    assert_eq!(job.command_name, "job8");
    assert_eq!(job.user_time_formatted(), "00:00:01.00");
    assert_eq!(job.elapsed_time_formatted(), "00:08:00.00");
    assert_eq!(job.starting_time_iso8601(), "2024-04-22T05:18:14Z");
    assert_eq!(job.uid, 2);
    assert_eq!(job.pid, 1008);

    assert_eq!(decoded.events[7].flags_description(), "dumped core");
    assert_eq!(decoded.events[8].flags_description(), "");
}

#[test]
fn long_durations_lose_only_comp_t_precision() {
    // 10 hours is 2 304 000 ticks: exponent 3, so precision is 512 ticks (8 s).
    let bytes = AcctEncoder::new()
        .add_process(b"make")
        .with_elapsed_time(Duration::from_secs(36_000))
        .encode()
        .unwrap();
    let decoded = AcctDecoder::default().decode("acct", &bytes).unwrap();
    let elapsed = decoded.events[0].elapsed_time;
    assert!((elapsed - 36_000.0).abs() <= 8.0, "elapsed {elapsed}");
}

#[test]
fn front_ends_agree() {
    let bytes = workload();
    let decoder = AcctDecoder::default();

    let from_slice = records_of(decoder.records("acct", &bytes).unwrap());
    let from_reader = records_of(
        decoder
            .read("acct", Cursor::new(bytes.clone()))
            .unwrap()
            .map(Result::unwrap),
    );
    assert_eq!(from_slice, from_reader);

    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let from_stream = runtime.block_on(async {
        let mut stream = decoder.stream("acct", Cursor::new(bytes.clone())).unwrap();
        let mut events = Vec::new();
        while let Some(event) = stream.next().await {
            events.push(event.unwrap());
        }
        records_of(events)
    });
    assert_eq!(from_slice, from_stream);
}

#[test]
fn big_endian_round_trip() {
    let mut encoder = AcctEncoder::new();
    encoder
        .with_byte_order(ByteOrder::Big)
        .add_process(b"ksh")
        .with_user_time(Duration::from_secs(3))
        .with_memory(4096)
        .with_tty(1280)
        .with_pid(31_337);
    let bytes = encoder.encode().unwrap();

    let decoder = AcctDecoder::new(DecoderConfig {
        byte_order: ByteOrder::Big,
        ..DecoderConfig::default()
    });
    let event = &decoder.decode("acct", &bytes).unwrap().events[0];
    assert_eq!(event.command_name, "ksh");
    assert_eq!(event.user_time_formatted(), "00:00:03.00");
    assert_eq!(event.average_memory_usage, 4096);
    assert_eq!(event.tty, 1280);
    assert_eq!(event.pid, 31_337);
}

#[test]
fn custom_tick_rate_round_trip() {
    let hundred = std::num::NonZeroU32::new(100).unwrap();
    let mut encoder = AcctEncoder::new();
    encoder
        .with_tick_rate(hundred)
        .add_process(b"sleep")
        .with_elapsed_time(Duration::from_millis(2_500))
        .with_io_blocks(12);
    let bytes = encoder.encode().unwrap();

    let decoder = AcctDecoder::new(DecoderConfig {
        tick_rate: hundred,
        command_encoding: CommandEncoding::Utf8,
        ..DecoderConfig::default()
    });
    let event = &decoder.decode("acct", &bytes).unwrap().events[0];
    assert_eq!(event.elapsed_time_formatted(), "00:00:02.50");
    assert!((event.count_io_blocks - 12.0).abs() < f64::EPSILON);
}

/// Sink that only counts, to show the trait is usable outside the crate.
#[derive(Default)]
struct Counter {
    records: usize,
    warnings: usize,
}

impl EventSink for Counter {
    fn record(&mut self, _event: AcctEvent) {
        self.records += 1;
    }

    fn warning(&mut self, _warning: acct_decoder::DecodeWarning) {
        self.warnings += 1;
    }
}

#[test]
fn custom_sink_sees_everything() {
    let mut bytes = workload();
    bytes.extend_from_slice(&[0; 10]);

    let mut counter = Counter::default();
    let delivered = AcctDecoder::default()
        .decode_into("acct", &bytes, &mut counter)
        .unwrap();
    assert_eq!(delivered, 50);
    assert_eq!(counter.records, 50);
    assert_eq!(counter.warnings, 1);

    let mut collected = DecodedFile::default();
    AcctDecoder::default()
        .decode_into("acct", &bytes, &mut collected)
        .unwrap();
    assert_eq!(collected.events.len(), counter.records);
}
