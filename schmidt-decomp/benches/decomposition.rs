//! Benchmarks for Schmidt decomposition

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use schmidt_decomp::{DecomposerConfig, SchmidtDecomposer};
use schmidt_state::{Bipartition, StateGenerator};

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    let decomposer = SchmidtDecomposer::default();

    for dim in [2usize, 4, 8, 16, 32].iter() {
        let mut generator = StateGenerator::new(Some(21));
        let state = generator.random_state_with_rank(*dim, *dim, *dim).unwrap();

        group.throughput(Throughput::Elements((dim * dim) as u64));
        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, &dim| {
            b.iter(|| decomposer.decompose(black_box(&state), dim, dim).unwrap())
        });
    }

    group.finish();
}

fn bench_values_only(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose_values_only");
    let decomposer = SchmidtDecomposer::new(DecomposerConfig::new().with_vectors(false));

    for dim in [8usize, 32].iter() {
        let mut generator = StateGenerator::new(Some(22));
        let state = generator.random_state_with_rank(*dim, *dim, *dim).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(dim), dim, |b, &dim| {
            b.iter(|| decomposer.decompose(black_box(&state), dim, dim).unwrap())
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose_batch");
    let decomposer = SchmidtDecomposer::default();
    let bipartition = Bipartition::new(8, 8).unwrap();

    for count in [16usize, 256].iter() {
        let mut generator = StateGenerator::new(Some(23));
        let states: Vec<_> = (0..*count)
            .map(|_| generator.random_state_with_rank(8, 8, 4).unwrap())
            .collect();

        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| decomposer.decompose_batch(black_box(&states), bipartition))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_decompose, bench_values_only, bench_batch);
criterion_main!(benches);
