//! Benchmarks for the four algorithm families.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ndarray::{Array1, Array2};

use numcore::{
    fit_polynomial, gaussian_elimination, CoordinateDescent, GoldenSectionMinimizer, Integrator,
    Interval, NewtonMinimizer, Objective, QuadratureMethod, Rect,
};

fn bench_minimizers(c: &mut Criterion) {
    let interval = Interval::new(-10.0, 10.0).unwrap();
    let f = |x: f64| (x - 3.0) * (x - 3.0) + 1.0;

    c.bench_function("golden_section_parabola", |bencher| {
        let minimizer = GoldenSectionMinimizer::new();
        bencher.iter(|| minimizer.find_minimum(&f, black_box(interval), 1e-8).unwrap())
    });

    c.bench_function("newton_parabola", |bencher| {
        let minimizer = NewtonMinimizer::new();
        bencher.iter(|| {
            minimizer
                .find_minimum(&f, black_box(interval), 1e-8, 100)
                .unwrap()
        })
    });
}

fn bench_descent(c: &mut Criterion) {
    let domain = Rect::new(-5.0, 5.0, -5.0, 5.0).unwrap();
    let f = |x: f64, y: f64| (x - 1.0) * (x - 1.0) + (y + 2.0) * (y + 2.0);

    c.bench_function("coordinate_descent_paraboloid", |bencher| {
        let descent = CoordinateDescent::new();
        bencher.iter(|| {
            descent
                .optimize(
                    &f,
                    black_box(domain),
                    (4.0, 4.0),
                    1e-6,
                    200,
                    Objective::Minimize,
                )
                .unwrap()
        })
    });
}

fn bench_quadrature(c: &mut Criterion) {
    let interval = Interval::new(0.0, std::f64::consts::PI).unwrap();

    c.bench_function("simpson_sine_fixed_1000", |bencher| {
        let integrator = Integrator::new();
        bencher.iter(|| {
            integrator
                .fixed_partitions(
                    &|x: f64| x.sin(),
                    black_box(interval),
                    QuadratureMethod::Simpson,
                    1000,
                )
                .unwrap()
        })
    });
}

fn bench_fit_and_solve(c: &mut Criterion) {
    let x = Array1::linspace(-5.0, 5.0, 200);
    let y = x.mapv(|xi| 0.5 * xi * xi - 2.0 * xi + 3.0);

    c.bench_function("fit_parabola_200_points", |bencher| {
        bencher.iter(|| fit_polynomial(black_box(&x), black_box(&y), 2).unwrap())
    });

    let n = 20;
    let mut a = Array2::zeros((n, n));
    let mut b = Array1::zeros(n);
    for i in 0..n {
        for j in 0..n {
            a[[i, j]] = 1.0 / ((i + j + 1) as f64) + if i == j { n as f64 } else { 0.0 };
        }
        b[i] = i as f64;
    }

    c.bench_function("gaussian_elimination_20x20", |bencher| {
        bencher.iter(|| gaussian_elimination(black_box(&a), black_box(&b)).unwrap())
    });
}

criterion_group!(
    benches,
    bench_minimizers,
    bench_descent,
    bench_quadrature,
    bench_fit_and_solve
);
criterion_main!(benches);
