use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use lockstep::prelude::*;
use rand::Rng;
use std::hint::black_box;

fn bench_string_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("String Keys + 2 Companions");
    group.sample_size(10);

    // Dataset generation
    let mut rng = rand::rng();
    let count = 10_000;

    let names: Vec<String> = (0..count)
        .map(|_| {
            let len = rng.random_range(5..20);
            (0..len).map(|_| rng.random::<char>()).collect()
        })
        .collect();
    let scores: Vec<f64> = (0..count).map(|_| rng.random()).collect();
    let ids: Vec<u64> = (0..count as u64).collect();

    let dataset = (names, scores, ids);

    group.bench_function("sort_all", |b| {
        b.iter_batched(
            || dataset.clone(),
            |(mut k, mut s, mut i)| sort_all(black_box(&mut k), &mut [&mut s, &mut i]),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("sort_all_bytes", |b| {
        b.iter_batched(
            || dataset.clone(),
            |(mut k, mut s, mut i)| sort_all_bytes(black_box(&mut k), &mut [&mut s, &mut i]),
            BatchSize::SmallInput,
        )
    });

    // Baseline: zip into rows, sort, unzip.
    group.bench_function("zip + slice::sort_by + unzip", |b| {
        b.iter_batched(
            || dataset.clone(),
            |(k, s, i)| {
                let mut rows: Vec<(String, f64, u64)> = k
                    .into_iter()
                    .zip(s)
                    .zip(i)
                    .map(|((k, s), i)| (k, s, i))
                    .collect();
                rows.sort_by(|a, b| a.0.cmp(&b.0));
                black_box(rows)
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_float_keys(c: &mut Criterion) {
    let mut group = c.benchmark_group("Float Keys");
    group.sample_size(10);

    let mut rng = rand::rng();
    let count = 10_000;
    let keys: Vec<f64> = (0..count).map(|_| rng.random_range(0.0..4.0)).collect();
    let labels: Vec<String> = (0..count).map(|i| format!("row-{i}")).collect();

    group.bench_function("sort_all", |b| {
        b.iter_batched(
            || (keys.clone(), labels.clone()),
            |(mut k, mut l)| sort_all(black_box(&mut k), &mut [&mut l]),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("sort_all (already sorted)", |b| {
        let mut sorted = keys.clone();
        sorted.sort_by(|a, b| a.total_cmp(b));
        b.iter_batched(
            || (sorted.clone(), labels.clone()),
            |(mut k, mut l)| sort_all(black_box(&mut k), &mut [&mut l]),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

fn bench_long_prefix(c: &mut Criterion) {
    let mut group = c.benchmark_group("Long Common Prefix");
    group.sample_size(10);

    // Dataset with heavy prefixes
    let mut rng = rand::rng();
    let count = 10_000;
    let prefix = "common_prefix_which_is_quite_long_indeed_";

    let input: Vec<String> = (0..count)
        .map(|_| {
            let suffix: String = (0..5).map(|_| rng.random::<char>()).collect();
            format!("{}{}", prefix, suffix)
        })
        .collect();
    let rows: Vec<u32> = (0..count as u32).collect();

    group.bench_function("sort_all_bytes", |b| {
        b.iter_batched(
            || (input.clone(), rows.clone()),
            |(mut k, mut r)| sort_all_bytes(black_box(&mut k), &mut [&mut r]),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("sort_all", |b| {
        b.iter_batched(
            || (input.clone(), rows.clone()),
            |(mut k, mut r)| sort_all(black_box(&mut k), &mut [&mut r]),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, bench_string_keys, bench_float_keys, bench_long_prefix);
criterion_main!(benches);
