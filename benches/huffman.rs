use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use huffpack::compression::FrequencyTable;
use huffpack::{compress, decompress};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn skewed_input(len: usize) -> Vec<u8> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    (0..len)
        .map(|_| {
            // Roughly geometric: low byte values dominate.
            let mut value = 0u8;
            while value < 255 && rng.gen_bool(0.5) {
                value += 1;
            }
            value
        })
        .collect()
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman compress");
    for &size in &[1_000, 100_000, 1_000_000] {
        let input = skewed_input(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &input, |b, input| {
            b.iter(|| compress(black_box(input)).unwrap())
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("huffman decompress");
    for &size in &[1_000, 100_000] {
        let artifact = compress(&skewed_input(size)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(size), &artifact, |b, artifact| {
            b.iter(|| decompress(black_box(artifact)).unwrap())
        });
    }
    group.finish();
}

fn bench_frequencies(c: &mut Criterion) {
    let input = skewed_input(4_000_000);
    c.bench_function("frequency count sequential", |b| {
        b.iter(|| FrequencyTable::from_bytes(black_box(&input)).unwrap())
    });
    c.bench_function("frequency count parallel", |b| {
        b.iter(|| FrequencyTable::from_bytes_parallel(black_box(&input), 64 * 1024).unwrap())
    });
}

criterion_group!(benches, bench_compress, bench_decompress, bench_frequencies);
criterion_main!(benches);
