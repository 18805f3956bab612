//! Stalemate - Multi-Instance Deadlock Detection
//!
//! # Overview
//!
//! `stalemate-core` decides whether a snapshot of a resource-allocation
//! system is deadlocked. Given per-process holdings (Allocation),
//! outstanding requests (Request) and free units (Available), it computes
//! which processes can eventually finish and reports the rest.
//!
//! # Layered Architecture
//!
//! - **Domain**: [`ResourceState`] and the fixed-point [`Detector`]
//! - **Infrastructure**: text/JSON loading and report rendering
//! - **Adapters**: the batch runner connecting the two
//!
//! # Detection Laws
//!
//! - **D-001**: Seeding - a process holding nothing is finished up front
//! - **D-002**: Release - a finished process returns its whole allocation to Work
//! - **D-003**: Order Independence - the verdict does not depend on pass order
//! - **D-004**: Monotonicity - more Available never deadlocks more processes
//!
//! # Usage
//!
//! ```rust
//! use stalemate_core::{detect, ProcessId, ResourceState, Verdict};
//!
//! let state = ResourceState::new(
//!     3,
//!     2,
//!     vec![vec![1, 0], vec![0, 1], vec![0, 0]],
//!     vec![vec![0, 1], vec![1, 0], vec![1, 1]],
//!     vec![0, 0],
//! ).unwrap();
//!
//! assert_eq!(detect(&state), Verdict::Deadlocked(vec![ProcessId(0), ProcessId(1)]));
//! ```
//!
//! # Formal Verification
//!
//! Bounded Kani proofs live in `domain::detector::proof` and are compiled
//! only under `cfg(kani)`.

#![warn(missing_docs)]
#![warn(clippy::all)]

// Layers
pub mod adapters;
pub mod domain;
pub mod infrastructure;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// Re-export Primary Types
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

// Domain types
pub use domain::{
    detect,
    Detection,
    Detector,
    PassOrder,
    ProcessId,
    ResourceId,
    ResourceState,
    StateError,
    Verdict,
};

// Infrastructure types
pub use infrastructure::{InputFormat, LoadError, PresentOptions};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
