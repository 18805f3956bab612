//! Resource Snapshots
//!
//! # Architecture
//!
//! A [`ResourceState`] is the read-only input of one detection run:
//!
//! ```text
//! ResourceState
//!   ├─ n, m                 (process count, resource type count)
//!   ├─ allocation: n × m    (units held by process i of type j)
//!   ├─ request:    n × m    (units wanted, not yet granted)
//!   └─ available:  m        (units held by nobody)
//! ```
//!
//! Construction validates dimensions and signs once; after that the state
//! is never mutated, so any number of detector calls may read it
//! concurrently.

pub mod state;
pub mod types;

// Re-exports
pub use state::ResourceState;
pub use types::*;
