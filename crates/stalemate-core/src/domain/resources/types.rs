//! Core Types for Resource Snapshots

use std::fmt;

use serde::{Deserialize, Serialize};

/// Process identifier (row index into Allocation/Request)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProcessId(pub usize);

impl ProcessId {
    /// Create a new process identifier
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying usize value
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ProcessId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Resource type identifier (column index into Allocation/Request/Available)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub usize);

impl ResourceId {
    /// Create a new resource identifier
    #[inline(always)]
    pub const fn new(id: usize) -> Self {
        Self(id)
    }

    /// Get the underlying usize value
    #[inline(always)]
    pub const fn as_usize(self) -> usize {
        self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "R{}", self.0)
    }
}

/// The structure of a snapshot an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// Process/resource counts
    Header,
    /// Allocation matrix
    Allocation,
    /// Request matrix
    Request,
    /// Available vector
    Available,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Allocation => "allocation",
            Self::Request => "request",
            Self::Available => "available",
        };
        f.write_str(name)
    }
}

/// Construction errors for [`ResourceState`](super::ResourceState)
///
/// Construction is all-or-nothing: a state that fails any check is never
/// observable by the detector.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// Process or resource count is zero (or negative in the source)
    #[error("invalid dimensions: n={n}, m={m} (both must be positive)")]
    InvalidDimensions {
        /// Declared process count
        n: i64,
        /// Declared resource type count
        m: i64,
    },

    /// A matrix or vector does not match the declared dimensions
    #[error("invalid dimensions: {section}{} has length {found}, expected {expected}", row_suffix(.row))]
    ShapeMismatch {
        /// Offending structure
        section: Section,
        /// Offending row, `None` for the row count itself or the Available vector
        row: Option<usize>,
        /// Declared length
        expected: usize,
        /// Supplied length
        found: usize,
    },

    /// An entry is negative
    #[error("negative entry {value} in {section}{} column {column}", row_suffix(.row))]
    NegativeEntry {
        /// Offending structure
        section: Section,
        /// Offending row, `None` for the Available vector
        row: Option<usize>,
        /// Offending column
        column: usize,
        /// The negative value
        value: i64,
    },
}

impl StateError {
    /// Whether this is a dimension error (`InvalidDimensions` class)
    pub fn is_dimension_error(&self) -> bool {
        matches!(self, Self::InvalidDimensions { .. } | Self::ShapeMismatch { .. })
    }
}

fn row_suffix(row: &Option<usize>) -> String {
    match row {
        Some(r) => format!(" row {}", r),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(ProcessId::new(3).to_string(), "P3");
        assert_eq!(ResourceId::new(0).to_string(), "R0");
    }

    #[test]
    fn test_error_messages() {
        let err = StateError::ShapeMismatch {
            section: Section::Request,
            row: Some(2),
            expected: 3,
            found: 1,
        };
        assert_eq!(
            err.to_string(),
            "invalid dimensions: request row 2 has length 1, expected 3"
        );

        let err = StateError::NegativeEntry {
            section: Section::Available,
            row: None,
            column: 1,
            value: -4,
        };
        assert_eq!(err.to_string(), "negative entry -4 in available column 1");
        assert!(!err.is_dimension_error());
    }
}
