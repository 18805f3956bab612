//! DeadlockOracle - Fixed-Point Reachability over a ResourceState
//!
//! # Algorithm
//!
//! ```text
//! Work   := Available
//! Finish := [Allocation[i] == 0 for each i]
//!
//! repeat
//!     progress := false
//!     for i in pass order:
//!         if !Finish[i] && Request[i] <= Work:
//!             Work      := Work + Allocation[i]
//!             Finish[i] := true
//!             progress  := true
//! until !progress
//!
//! Deadlocked := { i : !Finish[i] }
//! ```
//!
//! A release is visible to every process visited after it, including later
//! processes of the same pass. The finished set only grows and Work only
//! grows, so the fixed point is the unique maximal set reachable by any
//! release order: at most `n` productive passes plus one final pass, each
//! O(n·m).

use tracing::{debug, trace};

use super::types::{Detection, PassOrder, Verdict};
use crate::domain::resources::{ProcessId, ResourceState};

/// Deadlock detector
///
/// Stateless apart from its pass order; every call allocates its own Work
/// and Finish vectors, so one detector may be shared across threads.
///
/// # Example
///
/// ```rust
/// use stalemate_core::domain::detector::{Detector, PassOrder, Verdict};
/// use stalemate_core::domain::resources::{ProcessId, ResourceState};
///
/// // P0 and P1 each hold what the other one wants
/// let state = ResourceState::new(
///     2,
///     2,
///     vec![vec![1, 0], vec![0, 1]],
///     vec![vec![0, 1], vec![1, 0]],
///     vec![0, 0],
/// ).unwrap();
///
/// let verdict = Detector::with_order(PassOrder::Descending).detect(&state);
/// assert_eq!(verdict, Verdict::Deadlocked(vec![ProcessId(0), ProcessId(1)]));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Detector {
    order: PassOrder,
}

impl Detector {
    /// Detector visiting processes in ascending index order
    pub fn new() -> Self {
        Self::default()
    }

    /// Detector with an explicit pass order
    pub fn with_order(order: PassOrder) -> Self {
        Self { order }
    }

    /// Configured pass order
    pub fn order(&self) -> PassOrder {
        self.order
    }

    /// Decide which processes can never finish
    pub fn detect(&self, state: &ResourceState) -> Verdict {
        self.run(state).into_verdict()
    }

    /// Run the fixed point and keep its diagnostics
    pub fn run(&self, state: &ResourceState) -> Detection {
        let detection = fixed_point(
            state.allocation_matrix(),
            state.request_matrix(),
            state.available_vector(),
            self.order,
        );

        debug!(
            n = state.n(),
            m = state.m(),
            passes = detection.passes,
            order = %self.order,
            verdict = %detection.verdict,
            "detection complete"
        );

        detection
    }
}

/// Detect with the default (ascending) detector
pub fn detect(state: &ResourceState) -> Verdict {
    Detector::new().detect(state)
}

/// The fixed point itself, over raw rows
///
/// Callers guarantee `allocation` and `request` have the same number of
/// rows and that every row and `available` share one length.
pub(crate) fn fixed_point(
    allocation: &[Vec<u64>],
    request: &[Vec<u64>],
    available: &[u64],
    order: PassOrder,
) -> Detection {
    let n = allocation.len();
    let mut work = available.to_vec();

    // Holding nothing blocks nobody
    let mut finish: Vec<bool> = allocation
        .iter()
        .map(|row| row.iter().all(|&units| units == 0))
        .collect();
    let mut completion_order: Vec<ProcessId> = (0..n)
        .filter(|&i| finish[i])
        .map(ProcessId)
        .collect();

    let visit: Vec<usize> = match order {
        PassOrder::Ascending => (0..n).collect(),
        PassOrder::Descending => (0..n).rev().collect(),
    };

    let mut passes = 0;
    loop {
        passes += 1;
        let mut progress = false;

        for &i in &visit {
            if finish[i] || !satisfiable(&request[i], &work) {
                continue;
            }

            release(&mut work, &allocation[i]);
            finish[i] = true;
            completion_order.push(ProcessId(i));
            progress = true;

            trace!(process = %ProcessId(i), pass = passes, ?work, "process can finish");
        }

        if !progress {
            break;
        }
    }

    let deadlocked: Vec<ProcessId> = (0..n)
        .filter(|&i| !finish[i])
        .map(ProcessId)
        .collect();

    let verdict = if deadlocked.is_empty() {
        Verdict::NoDeadlock
    } else {
        Verdict::Deadlocked(deadlocked)
    };

    Detection {
        verdict,
        completion_order,
        passes,
        work,
    }
}

/// `request <= work` component-wise
#[inline]
fn satisfiable(request: &[u64], work: &[u64]) -> bool {
    request.iter().zip(work).all(|(r, w)| r <= w)
}

/// `work += allocation`, saturating
///
/// Saturation never turns an unsatisfiable comparison into a satisfiable
/// one: a saturated entry is already above every representable request.
#[inline]
fn release(work: &mut [u64], allocation: &[u64]) {
    for (w, a) in work.iter_mut().zip(allocation) {
        *w = w.saturating_add(*a);
    }
}
