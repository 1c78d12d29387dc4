use std::io::Cursor;
use std::time::Duration;

use acct_decoder::AcctDecoder;
use acct_encoder::AcctEncoder;
use acct_wire::{AHZ, ByteOrder, CompT, RawRecord};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn stream_of(records: usize) -> Vec<u8> {
    let mut encoder = AcctEncoder::new();
    for i in 0..records {
        let i = u32::try_from(i).unwrap();
        encoder
            .add_process(b"sh")
            .with_user_time(Duration::from_millis(u64::from(i % 1000)))
            .with_elapsed_time(Duration::from_secs(u64::from(i)))
            .with_starting_time(1_713_763_086 + u64::from(i))
            .with_pid(i)
            .with_flags(i & 0x7FF);
    }
    encoder.encode().unwrap()
}

fn bench_raw_record(c: &mut Criterion) {
    let bytes = stream_of(1);
    let window: &[u8; 64] = bytes.first_chunk().unwrap();

    c.bench_function("raw_record_from_window", |b| {
        b.iter(|| RawRecord::from_window(window, ByteOrder::Little));
    });
    c.bench_function("comp_t_seconds", |b| {
        b.iter(|| CompT::from_raw(0xFFFF).seconds(AHZ));
    });
}

fn bench_decode_single(c: &mut Criterion) {
    let bytes = stream_of(1);
    let decoder = AcctDecoder::default();

    c.bench_function("decode_single", |b| {
        b.iter(|| decoder.decode("acct", &bytes).unwrap());
    });
}

fn bench_decode_throughput(c: &mut Criterion) {
    let decoder = AcctDecoder::default();
    let mut group = c.benchmark_group("decode_throughput");

    for records in [100, 10_000, 100_000] {
        let bytes = stream_of(records);
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_with_input(BenchmarkId::new("slice", records), &bytes, |b, bytes| {
            b.iter(|| decoder.records("acct", bytes).unwrap().count());
        });
        group.bench_with_input(BenchmarkId::new("reader", records), &bytes, |b, bytes| {
            b.iter(|| decoder.read("acct", Cursor::new(bytes.as_slice())).unwrap().count());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_raw_record,
    bench_decode_single,
    bench_decode_throughput
);
criterion_main!(benches);
