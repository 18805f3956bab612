//! Detection Benchmark Suite
//!
//! # Scenarios
//!
//! 1. **Chain**: worst case for ascending order
//!    - P(i) waits on P(i+1), only the last process can start
//!    - Ascending finishes one process per pass (n passes)
//!    - Descending finishes everything in one pass
//!
//! 2. **Ring Deadlock**: nobody can move
//!    - Single pass, every comparison fails
//!
//! 3. **Independent**: every request already satisfiable
//!    - Single productive pass

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use stalemate_core::domain::detector::{Detector, PassOrder};
use stalemate_core::domain::resources::ResourceState;

// ============================================================================
// Scenario Builders
// ============================================================================

/// P(i) holds one unit of R(i) and wants one unit of R(i+1)
fn chain(n: usize) -> ResourceState {
    let allocation = (0..n)
        .map(|i| (0..n).map(|j| i64::from(i == j)).collect())
        .collect();
    let request = (0..n)
        .map(|i| (0..n).map(|j| i64::from(j == i + 1)).collect())
        .collect();
    ResourceState::new(n, n, allocation, request, vec![0; n]).unwrap()
}

/// Like `chain`, but the last process wants R0, closing the ring
fn ring(n: usize) -> ResourceState {
    let allocation = (0..n)
        .map(|i| (0..n).map(|j| i64::from(i == j)).collect())
        .collect();
    let request = (0..n)
        .map(|i| (0..n).map(|j| i64::from(j == (i + 1) % n)).collect())
        .collect();
    ResourceState::new(n, n, allocation, request, vec![0; n]).unwrap()
}

fn independent(n: usize, m: usize) -> ResourceState {
    let allocation = vec![vec![1; m]; n];
    let request = vec![vec![1; m]; n];
    ResourceState::new(n, m, allocation, request, vec![1; m]).unwrap()
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain");

    for n in [8, 32, 128] {
        let state = chain(n);
        for order in [PassOrder::Ascending, PassOrder::Descending] {
            let detector = Detector::with_order(order);
            group.bench_with_input(BenchmarkId::new(order.name(), n), &state, |b, state| {
                b.iter(|| detector.detect(black_box(state)))
            });
        }
    }

    group.finish();
}

fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_deadlock");

    for n in [8, 32, 128] {
        let state = ring(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &state, |b, state| {
            b.iter(|| Detector::new().detect(black_box(state)))
        });
    }

    group.finish();
}

fn bench_independent(c: &mut Criterion) {
    let state = independent(256, 16);
    c.bench_function("independent_256x16", |b| {
        b.iter(|| Detector::new().run(black_box(&state)))
    });
}

criterion_group!(benches, bench_chain, bench_ring, bench_independent);
criterion_main!(benches);
