//! Criterion benchmarks: serial transpose vs. the in-process worker group.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;
use transbench::matrix::transpose::transpose;
use transbench::{transpose_parallel, Matrix};

fn bench_transpose(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(42);
    let mut group = c.benchmark_group("transpose");

    for &n in &[256usize, 512, 1024] {
        let m = Matrix::random(n, &mut rng);
        // One read + one write per element.
        group.throughput(Throughput::Bytes((2 * n * n * 4) as u64));

        group.bench_with_input(BenchmarkId::new("serial", n), &m, |b, m| {
            b.iter(|| transpose(m))
        });
        group.bench_with_input(BenchmarkId::new("group_4", n), &m, |b, m| {
            b.iter(|| transpose_parallel(m, 4).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transpose);
criterion_main!(benches);
