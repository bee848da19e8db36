//! Parser throughput benchmark
//!
//! Feeds a mixed workload (plain text, SGR color changes, cursor movement,
//! line erases) resembling compiler/test-runner output.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use termscreen::TerminalEmulator;

fn workload() -> Vec<u8> {
    let mut bytes = Vec::new();
    for i in 0..200 {
        bytes.extend_from_slice(b"\x1b[32m   Compiling\x1b[0m crate-");
        bytes.extend_from_slice(i.to_string().as_bytes());
        bytes.extend_from_slice(b" v0.1.0\r\n");
        if i % 10 == 0 {
            bytes.extend_from_slice(b"\r\x1b[K\x1b[1;33mwarning\x1b[0m: unused variable\r\n");
        }
        if i % 25 == 0 {
            bytes.extend_from_slice(b"\x1b[2;1H\x1b[38;5;240mstatus line\x1b[0m\x1b[24;1H");
        }
    }
    bytes
}

fn bench_feed(c: &mut Criterion) {
    let input = workload();
    let mut group = c.benchmark_group("parser");
    group.throughput(Throughput::Bytes(input.len() as u64));

    group.bench_function("feed_mixed_ansi", |b| {
        b.iter(|| {
            let mut term = TerminalEmulator::new(24, 80);
            term.feed(black_box(&input));
            black_box(term.screen().cursor())
        });
    });

    group.bench_function("feed_plain_text", |b| {
        let plain: Vec<u8> = b"the quick brown fox jumps over the lazy dog\r\n"
            .iter()
            .cycle()
            .take(input.len())
            .copied()
            .collect();
        b.iter(|| {
            let mut term = TerminalEmulator::new(24, 80);
            term.feed(black_box(&plain));
            black_box(term.screen().cursor())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_feed);
criterion_main!(benches);
