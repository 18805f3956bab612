//! ResourceState - Validated Allocation/Request/Available Snapshot

use serde::{Deserialize, Serialize};

use super::types::*;

/// An immutable snapshot of a resource-allocation system
///
/// # Invariants
///
/// - `n > 0` and `m > 0`
/// - `allocation` and `request` are exactly `n × m`
/// - `available` has exactly `m` entries
/// - every entry is non-negative (stored unsigned after validation)
///
/// No conservation law (`available + Σ allocation == total`) is checked;
/// that is a property of whoever produced the snapshot.
///
/// # Example
///
/// ```rust
/// use stalemate_core::domain::resources::ResourceState;
///
/// let state = ResourceState::new(
///     2,
///     1,
///     vec![vec![1], vec![0]],
///     vec![vec![0], vec![1]],
///     vec![0],
/// ).unwrap();
///
/// assert_eq!(state.n(), 2);
/// assert_eq!(state.allocation(0, 0), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawResourceState")]
pub struct ResourceState {
    n: usize,
    m: usize,
    allocation: Vec<Vec<u64>>,
    request: Vec<Vec<u64>>,
    available: Vec<u64>,
}

impl ResourceState {
    /// Build a validated snapshot
    ///
    /// Entries are accepted as signed integers so that negative values can
    /// be rejected rather than silently wrapped.
    ///
    /// # Errors
    /// - `InvalidDimensions`: `n` or `m` is zero
    /// - `ShapeMismatch`: a matrix/vector length disagrees with `n`/`m`
    /// - `NegativeEntry`: any entry is below zero
    pub fn new(
        n: usize,
        m: usize,
        allocation: Vec<Vec<i64>>,
        request: Vec<Vec<i64>>,
        available: Vec<i64>,
    ) -> Result<Self, StateError> {
        if n == 0 || m == 0 {
            return Err(StateError::InvalidDimensions {
                n: n as i64,
                m: m as i64,
            });
        }

        check_matrix_shape(Section::Allocation, &allocation, n, m)?;
        check_matrix_shape(Section::Request, &request, n, m)?;
        if available.len() != m {
            return Err(StateError::ShapeMismatch {
                section: Section::Available,
                row: None,
                expected: m,
                found: available.len(),
            });
        }

        let allocation = unsigned_matrix(Section::Allocation, allocation)?;
        let request = unsigned_matrix(Section::Request, request)?;
        let available = unsigned_row(Section::Available, None, available)?;

        Ok(Self {
            n,
            m,
            allocation,
            request,
            available,
        })
    }

    /// Convert signed header counts into dimensions
    ///
    /// # Errors
    /// - `InvalidDimensions`: either count is zero or negative
    pub fn checked_dimensions(n: i64, m: i64) -> Result<(usize, usize), StateError> {
        match (usize::try_from(n), usize::try_from(m)) {
            (Ok(rows), Ok(cols)) if rows > 0 && cols > 0 => Ok((rows, cols)),
            _ => Err(StateError::InvalidDimensions { n, m }),
        }
    }

    /// Number of processes
    #[inline(always)]
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of resource types
    #[inline(always)]
    pub fn m(&self) -> usize {
        self.m
    }

    /// Units of resource `j` held by process `i`
    ///
    /// # Panics
    /// If `i >= n` or `j >= m`.
    #[inline]
    pub fn allocation(&self, i: usize, j: usize) -> u64 {
        self.allocation[i][j]
    }

    /// Units of resource `j` requested (not yet granted) by process `i`
    ///
    /// # Panics
    /// If `i >= n` or `j >= m`.
    #[inline]
    pub fn request(&self, i: usize, j: usize) -> u64 {
        self.request[i][j]
    }

    /// Unallocated units of resource `j`
    ///
    /// # Panics
    /// If `j >= m`.
    #[inline]
    pub fn available(&self, j: usize) -> u64 {
        self.available[j]
    }

    /// Allocation row of process `i`
    #[inline]
    pub fn allocation_row(&self, i: usize) -> &[u64] {
        &self.allocation[i]
    }

    /// Request row of process `i`
    #[inline]
    pub fn request_row(&self, i: usize) -> &[u64] {
        &self.request[i]
    }

    /// The whole Available vector
    #[inline]
    pub fn available_vector(&self) -> &[u64] {
        &self.available
    }

    /// Allocation matrix, one row per process
    pub fn allocation_matrix(&self) -> &[Vec<u64>] {
        &self.allocation
    }

    /// Request matrix, one row per process
    pub fn request_matrix(&self) -> &[Vec<u64>] {
        &self.request
    }

    /// Iterate process identifiers `P0..Pn`
    pub fn processes(&self) -> impl Iterator<Item = ProcessId> + '_ {
        (0..self.n).map(ProcessId)
    }

    /// Iterate resource identifiers `R0..Rm`
    pub fn resources(&self) -> impl Iterator<Item = ResourceId> + '_ {
        (0..self.m).map(ResourceId)
    }
}

fn check_matrix_shape(
    section: Section,
    matrix: &[Vec<i64>],
    n: usize,
    m: usize,
) -> Result<(), StateError> {
    if matrix.len() != n {
        return Err(StateError::ShapeMismatch {
            section,
            row: None,
            expected: n,
            found: matrix.len(),
        });
    }

    match matrix.iter().position(|row| row.len() != m) {
        Some(i) => Err(StateError::ShapeMismatch {
            section,
            row: Some(i),
            expected: m,
            found: matrix[i].len(),
        }),
        None => Ok(()),
    }
}

fn unsigned_matrix(section: Section, matrix: Vec<Vec<i64>>) -> Result<Vec<Vec<u64>>, StateError> {
    matrix
        .into_iter()
        .enumerate()
        .map(|(i, row)| unsigned_row(section, Some(i), row))
        .collect()
}

fn unsigned_row(section: Section, row: Option<usize>, values: Vec<i64>) -> Result<Vec<u64>, StateError> {
    values
        .into_iter()
        .enumerate()
        .map(|(column, value)| {
            u64::try_from(value).map_err(|_| StateError::NegativeEntry {
                section,
                row,
                column,
                value,
            })
        })
        .collect()
}

/// Unvalidated wire shape; only reachable through `TryFrom`
#[derive(Deserialize)]
struct RawResourceState {
    n: i64,
    m: i64,
    allocation: Vec<Vec<i64>>,
    request: Vec<Vec<i64>>,
    available: Vec<i64>,
}

impl TryFrom<RawResourceState> for ResourceState {
    type Error = StateError;

    fn try_from(raw: RawResourceState) -> Result<Self, Self::Error> {
        let (n, m) = Self::checked_dimensions(raw.n, raw.m)?;
        Self::new(n, m, raw.allocation, raw.request, raw.available)
    }
}
