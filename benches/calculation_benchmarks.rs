//! Performance benchmarks for the payroll engine.
//!
//! Covers the pure breakdown computation, the batch payroll run, and the
//! HTTP endpoint end to end:
//! - Single breakdown: < 20μs mean
//! - Single request through the router: < 200μs mean
//! - Payroll run of 1000 employees: < 50ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rust_decimal::Decimal;

use payroll_engine::api::{AppState, create_router};
use payroll_engine::calculation::{
    InvalidRecordPolicy, PayrollRecord, compute_payroll_breakdown, run_payroll,
};
use payroll_engine::config::{ConfigLoader, StatutoryConfig};
use payroll_engine::models::{CompensationInput, PayrollPeriod, TaxPolicy};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

/// Creates a test state with loaded configuration.
fn create_test_state() -> AppState {
    let config = ConfigLoader::load("./config/ng_paye_2024").expect("Failed to load config");
    AppState::new(config)
}

/// Spreads salaries across every bracket, from ₦20,000 to ₦5,020,000.
fn create_records(count: usize) -> Vec<PayrollRecord> {
    (0..count)
        .map(|i| {
            let basic = Decimal::new(20_000 + (i as i64 % 500) * 10_000, 0);
            let allowances = Decimal::new((i as i64 % 7) * 12_345, 2);
            PayrollRecord::new(format!("emp_{:05}", i), basic, allowances)
        })
        .collect()
}

/// Benchmark: one breakdown, both PAYE variants.
fn bench_single_breakdown(c: &mut Criterion) {
    let config = StatutoryConfig::nigeria_2024();
    let input = CompensationInput::new(Decimal::new(300_000, 0), Decimal::new(50_000, 0))
        .expect("valid input");

    let mut group = c.benchmark_group("single_breakdown");
    for (name, policy) in [
        ("gross", TaxPolicy::GROSS),
        ("consolidated_relief", TaxPolicy::CONSOLIDATED_RELIEF),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| compute_payroll_breakdown(black_box(&input), &config, policy))
        });
    }
    group.finish();
}

/// Benchmark: one request through the router.
fn bench_calculate_endpoint(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = serde_json::json!({
        "employee_id": "emp_bench_001",
        "period": "2024-06",
        "basic_salary": "300000",
        "allowances": "50000"
    })
    .to_string();

    c.bench_function("calculate_endpoint", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/payroll/calculate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: payroll runs of increasing size.
fn bench_payroll_run(c: &mut Criterion) {
    let config = StatutoryConfig::nigeria_2024();
    let period = PayrollPeriod::new(2024, 6).expect("valid period");

    let mut group = c.benchmark_group("payroll_run");
    // Reduce sample size for large batches to keep benchmark time reasonable
    group.sample_size(20);

    for count in [10usize, 100, 1000] {
        let records = create_records(count);
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("employees", count), &records, |b, records| {
            b.iter(|| {
                run_payroll(
                    period,
                    black_box(records),
                    &config,
                    TaxPolicy::GROSS,
                    InvalidRecordPolicy::Skip,
                )
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_breakdown,
    bench_calculate_endpoint,
    bench_payroll_run,
);
criterion_main!(benches);
