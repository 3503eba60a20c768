//! Throughput benchmarks for pixlzw-lzw over image-like pixel buffers.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pixlzw_lzw::{LzwConfig, compress, decompress};
use std::hint::black_box;

type PatternGenerator = fn(usize) -> Vec<u8>;

mod patterns {
    /// Flat field, the best case.
    pub fn uniform(side: usize) -> Vec<u8> {
        vec![0x80; side * side]
    }

    /// Pseudo-random noise, the worst case.
    pub fn noise(side: usize) -> Vec<u8> {
        let mut seed: u64 = 0x1234_5678_9ABC_DEF0;
        (0..side * side)
            .map(|_| {
                seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                (seed >> 32) as u8
            })
            .collect()
    }

    /// Smooth diagonal gradient.
    pub fn gradient(side: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                data.push((((x + y) * 255) / (2 * side)) as u8);
            }
        }
        data
    }

    /// 8x8 checkerboard of two gray levels.
    pub fn checkerboard(side: usize) -> Vec<u8> {
        let mut data = Vec::with_capacity(side * side);
        for y in 0..side {
            for x in 0..side {
                data.push(if (x / 8 + y / 8) % 2 == 0 { 30 } else { 220 });
            }
        }
        data
    }
}

const PATTERNS: [(&str, PatternGenerator); 4] = [
    ("uniform", patterns::uniform),
    ("noise", patterns::noise),
    ("gradient", patterns::gradient),
    ("checkerboard", patterns::checkerboard),
];

const SIDES: [usize; 3] = [64, 256, 512];

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress");
    for side in SIDES {
        for (name, generate) in PATTERNS {
            let data = generate(side);
            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(name, format!("{side}x{side}")),
                &data,
                |b, data| b.iter(|| compress(black_box(data), LzwConfig::DEFAULT)),
            );
        }
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress");
    for side in SIDES {
        for (name, generate) in PATTERNS {
            let data = generate(side);
            let Ok(packed) = compress(&data, LzwConfig::DEFAULT) else {
                continue;
            };
            group.throughput(Throughput::Bytes(data.len() as u64));
            group.bench_with_input(
                BenchmarkId::new(name, format!("{side}x{side}")),
                &packed,
                |b, packed| {
                    b.iter(|| decompress(black_box(packed), data.len(), LzwConfig::DEFAULT))
                },
            );
        }
    }
    group.finish();
}

fn bench_max_bits(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_bits");
    let data = patterns::gradient(512);
    group.throughput(Throughput::Bytes(data.len() as u64));
    for config in [LzwConfig::DEFAULT, LzwConfig::WIDE] {
        group.bench_with_input(
            BenchmarkId::from_parameter(config.max_bits),
            &config,
            |b, &config| b.iter(|| compress(black_box(&data), config)),
        );
    }
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_max_bits);
criterion_main!(benches);
