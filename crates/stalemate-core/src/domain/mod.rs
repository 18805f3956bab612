//! Domain Layer
//!
//! # Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    Domain Layer                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │                                                             │
//! │  Resources Module              Detector Module              │
//! │  ├─ ResourceState              ├─ Detector                  │
//! │  ├─ ProcessId / ResourceId     ├─ Verdict                   │
//! │  └─ StateError                 ├─ Detection                 │
//! │                                └─ PassOrder                 │
//! │                                                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in this layer knows how a snapshot was produced or how a
//! verdict is shown.

pub mod detector;
pub mod resources;

// Re-export detector types
pub use detector::{detect, Detection, Detector, PassOrder, Verdict};

// Re-export resource types
pub use resources::{ProcessId, ResourceId, ResourceState, Section, StateError};
