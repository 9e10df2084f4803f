// Benchmark for trajectory construction and sampling
// Run with: cargo bench

use criterion::{criterion_group, criterion_main, Criterion};
use smove::{SmoveConfig, Trajectory};
use std::hint::black_box;

fn bench_construction(c: &mut Criterion) {
    let config = SmoveConfig::new(2.0, 1.2).with_v_min(0.2).with_v_max(1.0);
    c.bench_function("build bounded smove", |b| {
        b.iter(|| Trajectory::new(black_box(&config)).unwrap());
    });
}

fn bench_sampling(c: &mut Criterion) {
    let trajectory =
        Trajectory::new(&SmoveConfig::new(2.0, 1.2).with_v_min(0.2).with_v_max(1.0)).unwrap();
    c.bench_function("sample bounded smove at 10 kHz", |b| {
        b.iter(|| {
            let count = trajectory.sample_at(black_box(10_000.0)).unwrap().count();
            assert!(count > 10_000);
        });
    });
}

criterion_group!(benches, bench_construction, bench_sampling);
criterion_main!(benches);
