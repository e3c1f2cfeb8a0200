//! Streaming matcher cost against window size.

use std::hint::black_box;
use std::io::Cursor;

use binkit::search::{matches, matches_in};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};

fn haystack(len: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len).map(|i| (i * 31 % 251) as u8).collect();
    for at in (0..len.saturating_sub(4)).step_by(4096) {
        data[at..at + 4].copy_from_slice(b"SARC");
    }
    data
}

fn bench_windows(c: &mut Criterion) {
    let data = haystack(4 * 1024 * 1024);
    let mut group = c.benchmark_group("stream_matches");
    group.throughput(Throughput::Bytes(data.len() as u64));
    for window in [256usize, 4 * 1024, 64 * 1024] {
        group.bench_with_input(BenchmarkId::from_parameter(window), &window, |b, &window| {
            let mut stream = Cursor::new(data.as_slice());
            b.iter(|| {
                matches(&mut stream, 0, data.len() as u64, b"SARC", window)
                    .map(|m| m.count())
                    .map(black_box)
            })
        });
    }
    group.bench_function("in_memory", |b| {
        b.iter(|| matches_in(black_box(&data), 0, data.len(), b"SARC").map(|m| m.count()))
    });
    group.finish();
}

criterion_group!(benches, bench_windows);
criterion_main!(benches);
