//! Adapters Layer - Wiring the Domain to its Collaborators
//!
//! The batch runner takes input paths through the loader, runs the
//! detector, and hands the result to the presenter. The domain never
//! sees a path or a string.

pub mod batch;

// Re-exports
pub use batch::{
    analyze_path, run_sequential, Analysis, BatchConfig, BatchConfigBuilder, BatchSummary,
    OutputFormat, Outcome, DEFAULT_INPUTS,
};
