use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use pl_core::FitResult;
use std::hint::black_box;

fn bench_fit_result_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("core_fitresult");

    for n_shapes in [0usize, 1, 4] {
        let params = vec![1.5; n_shapes];
        group.bench_with_input(BenchmarkId::new("from_loglik", n_shapes), &n_shapes, |b, &k| {
            b.iter(|| {
                let fr = FitResult::from_loglik(
                    "bench",
                    black_box(params.clone()),
                    0.0,
                    2.0,
                    black_box(-1234.5),
                    1000,
                    k + 2,
                )
                .unwrap();
                black_box(fr.aic + fr.bic)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fit_result_construction);
criterion_main!(benches);
