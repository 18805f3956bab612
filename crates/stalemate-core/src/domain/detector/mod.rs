//! Deadlock Detection
//!
//! # Architecture
//!
//! ```text
//! ResourceState ──► Detector::run ──► Detection { verdict, completion_order, passes, work }
//!                        │
//!                        └─► Detector::detect ──► Verdict
//! ```
//!
//! The detector is a pure function of the snapshot: no I/O, no shared
//! state, always terminates. Malformed snapshots are rejected when the
//! [`ResourceState`](crate::domain::resources::ResourceState) is built, so
//! detection itself has no error path.

pub mod oracle;
pub mod types;

#[cfg(kani)]
pub mod proof;

// Re-exports
pub use oracle::{detect, Detector};
pub use types::{Detection, PassOrder, Verdict};
