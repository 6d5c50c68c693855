use criterion::{Criterion, black_box, criterion_group, criterion_main};
use mirath_rational::Rational;

fn arithmetic_bench(c: &mut Criterion) {
    let shares = [
        Rational::frac(1, 2),
        Rational::frac(2, 3),
        Rational::frac(1, 6),
        Rational::frac(1, 8),
    ];

    let mut group = c.benchmark_group("rational");
    group.bench_function("sum_four_shares", |b| {
        b.iter(|| black_box(shares).iter().sum::<Rational>())
    });
    group.bench_function("scale_by_reciprocal", |b| {
        let total: Rational = shares.iter().sum();
        b.iter(|| {
            let ratio = black_box(total).checked_recip().unwrap();
            shares.iter().map(|s| *s * ratio).sum::<Rational>()
        })
    });
    group.bench_function("from_decimal_pi", |b| {
        b.iter(|| Rational::from_decimal(black_box(std::f64::consts::PI), 10_000))
    });
    group.finish();
}

criterion_group!(benches, arithmetic_bench);
criterion_main!(benches);
