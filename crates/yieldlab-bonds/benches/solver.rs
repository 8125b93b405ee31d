//! Benchmarks for schedule generation and yield solving.
//!
//! Run with: cargo bench -p yieldlab-bonds

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal_macros::dec;

use yieldlab_bonds::prelude::*;
use yieldlab_core::daycounts::DayCountConvention;
use yieldlab_core::types::{Date, Frequency};

fn terms(years: i32, day_count: DayCountConvention) -> BondTerms {
    let issue = Date::from_ymd(2025, 1, 15).unwrap();
    BondTerms::builder()
        .issuer("Bench")
        .currency("USD")
        .face_value(dec!(1000))
        .issue_date(issue)
        .maturity_date(issue.add_months(years * 12).unwrap())
        .coupon_rate(dec!(0.045))
        .frequency(Frequency::SemiAnnual)
        .day_count(day_count)
        .build()
        .unwrap()
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    for years in [5, 10, 30] {
        let t = terms(years, DayCountConvention::Thirty360);
        group.bench_with_input(BenchmarkId::from_parameter(years), &t, |b, t| {
            b.iter(|| CashFlowGenerator::generate(black_box(t), &BondFeatures::default()));
        });
    }
    group.finish();
}

fn bench_solve(c: &mut Criterion) {
    let mut group = c.benchmark_group("solve_yield");
    let settlement = Date::from_ymd(2026, 4, 3).unwrap();
    for dc in [DayCountConvention::Thirty360, DayCountConvention::ActAct] {
        let t = terms(10, dc);
        let flows = CashFlowGenerator::generate(&t, &BondFeatures::default()).unwrap();
        let schedule = PricingSchedule::new(
            &flows,
            settlement,
            t.issue_date(),
            t.face_value(),
            t.day_count(),
            t.frequency(),
        )
        .unwrap();
        let solver = YieldSolver::new();
        group.bench_with_input(BenchmarkId::from_parameter(dc), &schedule, |b, s| {
            b.iter(|| solver.solve(black_box(s), black_box(97.25)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_generate, bench_solve);
criterion_main!(benches);
