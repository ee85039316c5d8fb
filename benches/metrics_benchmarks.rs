//! Benchmarks for the overview aggregations

#![allow(clippy::unwrap_used, clippy::indexing_slicing, missing_docs)]

use chrono::{Duration, FixedOffset, NaiveDate, TimeZone};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use paydash_core::{Ledger, Payment, PaymentStatus, User};
use paydash_metrics::{
    ChartRegistry, ReportOptions, ReportingCalendar, build_overview, compute_conversion,
    count_statuses, summarize_revenue,
};
use rust_decimal::Decimal;
use std::hint::black_box;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 2, 5).unwrap()
}

fn offset() -> FixedOffset {
    FixedOffset::east_opt(7 * 3600).unwrap()
}

/// Payments spread over the last ~90 days, cycling through statuses
fn ledger(payments: usize) -> Ledger {
    let start = offset().with_ymd_and_hms(2025, 2, 5, 12, 0, 0).unwrap();
    let users = (0..payments / 4 + 1)
        .map(|i| User::new(format!("user{i}")))
        .collect();
    let payments = (0..payments)
        .map(|i| {
            let status = PaymentStatus::ALL[i % 3];
            let minutes = i64::try_from(i).unwrap() * 37;
            Payment::new(
                format!("user{}", i % (payments / 4 + 1)),
                Decimal::from(50_000 + (i % 20) * 10_000),
                start - Duration::minutes(minutes % (90 * 24 * 60)),
                status,
            )
        })
        .collect();
    Ledger::new(users, payments)
}

fn bench_aggregations(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregations");
    let calendar = ReportingCalendar::new(today(), offset());

    for size in [100, 10_000, 100_000] {
        let ledger = ledger(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("revenue", size), &ledger, |b, ledger| {
            b.iter(|| summarize_revenue(black_box(&ledger.payments), &calendar));
        });
        group.bench_with_input(BenchmarkId::new("status", size), &ledger, |b, ledger| {
            b.iter(|| count_statuses(black_box(&ledger.payments)));
        });
        group.bench_with_input(BenchmarkId::new("conversion", size), &ledger, |b, ledger| {
            b.iter(|| {
                compute_conversion(
                    black_box(&ledger.users),
                    black_box(&ledger.payments),
                    PaymentStatus::Pending,
                )
            });
        });
    }

    group.finish();
}

fn bench_overview(c: &mut Criterion) {
    let mut group = c.benchmark_group("overview");
    let options = ReportOptions::try_from(&paydash_core::ReportConfig::default()).unwrap();
    let registry = ChartRegistry::standard();

    for size in [100, 10_000] {
        let ledger = ledger(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("build", size), &ledger, |b, ledger| {
            b.iter(|| build_overview(black_box(ledger), today(), &options, &registry));
        });
    }

    group.bench_function("serialize_json", |b| {
        let overview = build_overview(&ledger(1_000), today(), &options, &registry).unwrap();
        b.iter(|| serde_json::to_string(black_box(&overview)));
    });

    group.finish();
}

criterion_group!(benches, bench_aggregations, bench_overview);
criterion_main!(benches);
