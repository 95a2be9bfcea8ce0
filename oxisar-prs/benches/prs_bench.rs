//! PRS decompression benchmarks.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use oxisar_prs::decompress;
use std::hint::black_box;

/// Builds PRS streams by hand. A fresh control byte is reserved at the
/// current write position whenever the previous one is full, matching the
/// order in which the decoder pulls control bytes.
struct StreamWriter {
    out: Vec<u8>,
    control_at: usize,
    bits: u32,
}

impl StreamWriter {
    fn new() -> Self {
        Self {
            out: vec![0],
            control_at: 0,
            bits: 0,
        }
    }

    fn bit(&mut self, set: bool) {
        if self.bits == 8 {
            self.control_at = self.out.len();
            self.out.push(0);
            self.bits = 0;
        }
        if set {
            self.out[self.control_at] |= 1 << self.bits;
        }
        self.bits += 1;
    }

    fn literal(&mut self, byte: u8) {
        self.bit(true);
        self.out.push(byte);
    }

    /// Long copy of 265 bytes at offset -1.
    fn long_run(&mut self) {
        self.bit(false);
        self.bit(true);
        self.out.extend_from_slice(&[0xF8, 0xFF, 0xFF]);
    }

    fn finish(mut self) -> Vec<u8> {
        self.bit(false);
        self.bit(true);
        self.out.extend_from_slice(&[0x00, 0x00]);
        self.out
    }
}

fn literal_stream(size: usize) -> Vec<u8> {
    let mut writer = StreamWriter::new();
    let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
    for _ in 0..size {
        seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
        writer.literal((seed >> 32) as u8);
    }
    writer.finish()
}

fn run_stream(size: usize) -> Vec<u8> {
    let mut writer = StreamWriter::new();
    writer.literal(0xAA);
    for _ in 0..size / 265 {
        writer.long_run();
    }
    writer.finish()
}

const SIZES: [(&str, usize); 3] = [("1KB", 1024), ("16KB", 16 * 1024), ("256KB", 256 * 1024)];

fn bench_literals(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_literals");
    for (name, size) in SIZES {
        let input = literal_stream(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| black_box(decompress(black_box(input)).unwrap()));
        });
    }
    group.finish();
}

fn bench_runs(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_runs");
    for (name, size) in SIZES {
        let input = run_stream(size);
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &input, |b, input| {
            b.iter(|| black_box(decompress(black_box(input)).unwrap()));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_literals, bench_runs);
criterion_main!(benches);
