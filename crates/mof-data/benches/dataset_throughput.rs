use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use mof_data::{build_dataset, run_generation, DatasetConfig};
use tempfile::tempdir;

fn bench_config(samples: usize, parallelism: usize) -> DatasetConfig {
    DatasetConfig {
        samples,
        parallelism,
        progress_every: 0,
        ..DatasetConfig::default()
    }
}

fn bench_build(c: &mut Criterion) {
    let tables = DatasetConfig::default()
        .resolve_tables()
        .expect("builtin tables");
    let mut group = c.benchmark_group("dataset_build");
    for threads in [1usize, 4] {
        let config = bench_config(256, threads);
        group.bench_with_input(BenchmarkId::from_parameter(threads), &config, |b, config| {
            b.iter(|| build_dataset(config, &tables).expect("build"));
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let config = bench_config(128, 2);
    c.bench_function("dataset_pipeline", |b| {
        b.iter(|| {
            let dir = tempdir().expect("bench dir");
            run_generation(&config, dir.path()).expect("bench run");
        });
    });
}

criterion_group!(benches, bench_build, bench_pipeline);
criterion_main!(benches);
