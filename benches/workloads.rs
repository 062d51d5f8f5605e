//! Workload benchmarks for the conversion cache.
//!
//! Run with: `cargo bench --bench workloads`
//!
//! Replays year streams with different access patterns against caches of
//! several sizes, reporting throughput through criterion and hit rate on
//! stdout.
//!
//! For micro-ops (get/set latency), see: `cargo bench --bench ops`

mod common;

use std::hint::black_box;

use common::workload::{YearPattern, YearStream, run_hit_rate};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use erakit::cache::ConversionCache;
use erakit::era::EraRegistry;

const SPAN: u32 = 500;
const OPS: usize = 200_000;
const SEED: u64 = 42;
const CAPACITIES: [usize; 3] = [32, 128, 1024];

// ============================================================================
// Workload definitions
// ============================================================================

fn workloads() -> Vec<(&'static str, YearPattern)> {
    vec![
        ("uniform", YearPattern::Uniform),
        (
            "recent_years_90_10",
            YearPattern::RecentBias {
                recent: SPAN / 10,
                share: 0.9,
            },
        ),
        ("sweep", YearPattern::Sweep),
        ("zipf_0.99", YearPattern::Zipf { exponent: 0.99 }),
    ]
}

fn be(ce: i64) -> i64 {
    ce + 543
}

// ============================================================================
// Hit rate
// ============================================================================

fn report_hit_rates() {
    println!("\n{:<22} {:>10} {:>10}", "workload", "capacity", "hit rate");
    for (name, pattern) in workloads() {
        for capacity in CAPACITIES {
            let cache = ConversionCache::new(capacity);
            let years = YearStream::new(SPAN, pattern, SEED);
            let rate = run_hit_rate(&cache, EraRegistry::BE, years, OPS, be);
            println!("{name:<22} {capacity:>10} {:>9.2}%", rate * 100.0);
        }
    }
}

// ============================================================================
// Throughput
// ============================================================================

fn bench_workloads(c: &mut Criterion) {
    report_hit_rates();

    let mut group = c.benchmark_group("workload_throughput");
    group.throughput(Throughput::Elements(OPS as u64));

    for (name, pattern) in workloads() {
        for capacity in CAPACITIES {
            group.bench_with_input(
                BenchmarkId::new(name, capacity),
                &capacity,
                |b, &capacity| {
                    b.iter(|| {
                        let cache = ConversionCache::new(capacity);
                        let years = YearStream::new(SPAN, pattern, SEED);
                        black_box(run_hit_rate(&cache, EraRegistry::BE, years, OPS, be))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_workloads);
criterion_main!(benches);
