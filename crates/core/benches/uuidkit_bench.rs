//! Benchmarks for SHA-1 and UUID operations

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use uuidkit_core::{Case, Generator, NAMESPACE_DNS, SeededEntropy, Sha1, Uuid, encode, sha1};

fn bench_sha1(c: &mut Criterion) {
    let input = vec![0x5Au8; 64 * 1024];

    let mut group = c.benchmark_group("sha1");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("one_shot_64k", |b| b.iter(|| sha1(black_box(&input))));
    group.bench_function("streaming_1k_chunks", |b| {
        b.iter(|| {
            let mut hasher = Sha1::new();
            for chunk in input.chunks(1000) {
                hasher.update(black_box(chunk));
            }
            hasher.finish()
        })
    });
    group.finish();
}

fn bench_generate(c: &mut Criterion) {
    let mut generator = Generator::new();
    c.bench_function("generate_v4_os", |b| b.iter(|| generator.generate()));

    let mut seeded = Generator::with_entropy(SeededEntropy::from_seed(42));
    c.bench_function("generate_v4_seeded", |b| b.iter(|| seeded.generate()));

    c.bench_function("generate_v5", |b| {
        let mut counter: u64 = 0;
        b.iter(|| {
            counter = counter.wrapping_add(1);
            Uuid::new_v5(&NAMESPACE_DNS, black_box(counter.to_be_bytes()))
        })
    });
}

fn bench_text(c: &mut Criterion) {
    let id = Uuid::new_v5(&NAMESPACE_DNS, "www.example.org");
    let text = id.to_string();
    let braced = format!("{{{:x}}}", id);

    c.bench_function("format_encode", |b| {
        b.iter(|| encode(black_box(&id), Case::Upper))
    });
    c.bench_function("parse_hyphenated", |b| b.iter(|| Uuid::parse(black_box(&text))));
    c.bench_function("parse_braced_lower", |b| {
        b.iter(|| Uuid::parse(black_box(&braced)))
    });
}

criterion_group!(benches, bench_sha1, bench_generate, bench_text);
criterion_main!(benches);
