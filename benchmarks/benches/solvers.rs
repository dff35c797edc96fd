use benchmarks::KernelSystem;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kernelridge_rs::prelude::*;
use kernelridge_rs::{gaussian_kernel, solve_symmetric};

fn bench_kernel_matrix(c: &mut Criterion) {
    for size in [100, 250, 500].iter() {
        let system = KernelSystem::generate(*size, 1.0, 1.0, 0).expect("system");
        c.bench_with_input(BenchmarkId::new("kernel_matrix", size), size, |b, _| {
            b.iter(|| {
                let k = gaussian_kernel(1.0, black_box(&system.x), black_box(&system.x));
                black_box(k)
            });
        });
    }
}

fn bench_direct_solve(c: &mut Criterion) {
    for size in [100, 250, 500].iter() {
        let system = KernelSystem::generate(*size, 1.0, 1e-3, 1).expect("system");
        c.bench_with_input(BenchmarkId::new("direct", size), size, |b, _| {
            b.iter(|| {
                let alpha = solve_symmetric(black_box(&system.a), black_box(&system.y));
                black_box(alpha)
            });
        });
    }
}

fn bench_conjugate_gradient(c: &mut Criterion) {
    let cg = ConjugateGradient::new(1e-6).expect("threshold");
    for size in [100, 250, 500].iter() {
        let system = KernelSystem::generate(*size, 1.0, 1e-3, 1).expect("system");
        let x0 = Tensor1D::zeros(*size);
        c.bench_with_input(BenchmarkId::new("conjugate_gradient", size), size, |b, _| {
            b.iter(|| {
                let solution = cg.solve(black_box(&system.a), black_box(&system.y), &x0);
                black_box(solution)
            });
        });
    }
}

fn bench_fit_and_predict(c: &mut Criterion) {
    let system = KernelSystem::generate(300, 1.0, 0.1, 2).expect("system");
    let fitted = KernelRidgeRegressor::new(1.0, 0.1)
        .expect("hyperparameters")
        .fit_tensors(system.x.clone(), system.y.clone())
        .expect("fit");
    let x_new = Tensor2D::<CpuBackend>::from_column((0..1000).map(|i| -4.0 + 0.008 * i as f64).collect());

    c.bench_function("fit_300", |b| {
        b.iter(|| {
            let model = KernelRidgeRegressor::new(1.0, 0.1).expect("hyperparameters");
            black_box(model.fit_tensors(black_box(system.x.clone()), black_box(system.y.clone())))
        });
    });
    c.bench_function("predict_batch_1000", |b| {
        b.iter(|| black_box(fitted.predict_batch(black_box(&x_new))));
    });
}

criterion_group!(
    benches,
    bench_kernel_matrix,
    bench_direct_solve,
    bench_conjugate_gradient,
    bench_fit_and_predict
);
criterion_main!(benches);
