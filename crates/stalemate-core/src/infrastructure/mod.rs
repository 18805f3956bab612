//! Infrastructure Layer - Input and Output Formats
//!
//! # Responsibilities
//! - Parsing snapshots (whitespace text, JSON)
//! - Rendering reports (classic text tables, JSON lines)
//!
//! Nothing here makes decisions about deadlock; it only moves snapshots
//! and verdicts across the process boundary.

pub mod loader;
pub mod presenter;

// Re-exports
pub use loader::{load_path, parse_reader, parse_str, InputFormat, LoadError};
pub use presenter::{render_json, render_text, PresentOptions, StateTable, TraceReport, VerdictReport};
