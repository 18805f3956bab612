//! Kani Formal Verification Proofs
//!
//! Bounded proofs over symbolic 3×2 snapshots (entries kept small so the
//! solver stays fast). Run with `cargo kani -p stalemate-core`.

#![cfg(kani)]

use super::oracle::fixed_point;
use super::types::*;

const N: usize = 3;
const M: usize = 2;
const MAX_UNITS: u64 = 3;

fn any_matrix() -> Vec<Vec<u64>> {
    let mut rows = Vec::with_capacity(N);
    for _ in 0..N {
        let mut row = Vec::with_capacity(M);
        for _ in 0..M {
            let units: u64 = kani::any();
            kani::assume(units <= MAX_UNITS);
            row.push(units);
        }
        rows.push(row);
    }
    rows
}

fn any_vector() -> Vec<u64> {
    let mut row = Vec::with_capacity(M);
    for _ in 0..M {
        let units: u64 = kani::any();
        kani::assume(units <= MAX_UNITS);
        row.push(units);
    }
    row
}

/// Visiting order never changes the verdict or the final Work vector
#[kani::proof]
#[kani::unwind(8)]
fn proof_pass_order_independent() {
    let allocation = any_matrix();
    let request = any_matrix();
    let available = any_vector();

    let ascending = fixed_point(&allocation, &request, &available, PassOrder::Ascending);
    let descending = fixed_point(&allocation, &request, &available, PassOrder::Descending);

    kani::assert(ascending.verdict == descending.verdict, "Verdict must not depend on order");
    kani::assert(ascending.work == descending.work, "Fixed-point Work must not depend on order");
}

/// A process holding nothing is never reported
#[kani::proof]
#[kani::unwind(8)]
fn proof_zero_allocation_never_deadlocked() {
    let mut allocation = any_matrix();
    let request = any_matrix();
    let available = any_vector();

    let idle: usize = kani::any();
    kani::assume(idle < N);
    allocation[idle] = vec![0; M];

    let detection = fixed_point(&allocation, &request, &available, PassOrder::Ascending);

    kani::assert(
        !detection.verdict.deadlocked().iter().any(|p| p.as_usize() == idle),
        "Zero-allocation process must be finished",
    );
}

/// Every process is finished at most once, and passes are bounded
#[kani::proof]
#[kani::unwind(8)]
fn proof_completion_bounded() {
    let allocation = any_matrix();
    let request = any_matrix();
    let available = any_vector();

    let detection = fixed_point(&allocation, &request, &available, PassOrder::Ascending);

    kani::assert(
        detection.completion_order.len() + detection.verdict.deadlocked().len() == N,
        "Finished and deadlocked partition the processes",
    );
    kani::assert(detection.passes <= N + 1, "At most n productive passes plus one");
}
