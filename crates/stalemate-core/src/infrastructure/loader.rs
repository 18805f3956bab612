//! Snapshot Loader
//!
//! Builds a [`ResourceState`] from its text or JSON representation.
//!
//! # Text Format
//!
//! Whitespace-delimited integers; line breaks carry no meaning:
//!
//! ```text
//! n m
//! <n rows of m integers>   Allocation, row i = process i
//! <n rows of m integers>   Request,    row i = process i
//! <m integers>             Available
//! ```
//!
//! # JSON Format
//!
//! A serialized `ResourceState`:
//! `{"n": 2, "m": 1, "allocation": [[1], [0]], "request": [[0], [1]], "available": [0]}`

use std::io::Read;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::domain::resources::{ResourceState, Section, StateError};

/// Loader errors
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The input could not be read
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read (`-` for a reader)
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// The stream ran out of integers
    #[error("unexpected end of input in {section}: expected {expected} integers, found {found}")]
    UnexpectedEnd {
        /// Section being read
        section: Section,
        /// Integers the section needs
        expected: usize,
        /// Integers present before the end
        found: usize,
    },

    /// A token is not an integer
    #[error("invalid token {token:?} at position {position}: expected an integer")]
    InvalidToken {
        /// The offending token
        token: String,
        /// 1-based token index
        position: usize,
    },

    /// JSON could not be decoded (or failed validation)
    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// Integers were well-formed but describe an invalid snapshot
    #[error(transparent)]
    State(#[from] StateError),
}

/// Representation of a snapshot on disk
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Whitespace-delimited integers
    Text,
    /// Serialized `ResourceState`
    Json,
}

impl InputFormat {
    /// Pick the format from a file extension (`.json` → JSON, anything else → text)
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }

    /// Decode a snapshot in this format
    ///
    /// # Errors
    /// Any [`LoadError`] except `Io`.
    pub fn parse(self, input: &str) -> Result<ResourceState, LoadError> {
        match self {
            Self::Text => parse_str(input),
            Self::Json => Ok(serde_json::from_str(input)?),
        }
    }
}

/// Parse the text format
///
/// # Errors
/// - `UnexpectedEnd` / `InvalidToken`: malformed stream
/// - `State`: dimensions or entries rejected by [`ResourceState::new`]
pub fn parse_str(input: &str) -> Result<ResourceState, LoadError> {
    let mut tokens = Tokens::new(input);

    let header = tokens.section(Section::Header, 2)?;
    let (n, m) = ResourceState::checked_dimensions(header[0], header[1])?;

    let allocation = tokens.matrix(Section::Allocation, n, m)?;
    let request = tokens.matrix(Section::Request, n, m)?;
    let available = tokens.section(Section::Available, m)?;

    let trailing = tokens.remaining();
    if trailing > 0 {
        warn!(trailing, "ignoring tokens after the available vector");
    }

    let state = ResourceState::new(n, m, allocation, request, available)?;
    debug!(n, m, "parsed snapshot");
    Ok(state)
}

/// Parse the text format from a reader
///
/// # Errors
/// As [`parse_str`], plus `Io` when the reader fails.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<ResourceState, LoadError> {
    let mut input = String::new();
    reader
        .read_to_string(&mut input)
        .map_err(|source| LoadError::Io {
            path: PathBuf::from("-"),
            source,
        })?;
    parse_str(&input)
}

/// Read and decode a snapshot file, choosing the format by extension
///
/// # Errors
/// `Io` if the file cannot be read, otherwise as [`InputFormat::parse`].
pub fn load_path(path: &Path) -> Result<ResourceState, LoadError> {
    let input = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let format = InputFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading snapshot");
    format.parse(&input)
}

/// Integer token stream with position tracking
struct Tokens<'a> {
    inner: std::str::SplitWhitespace<'a>,
    position: usize,
}

impl<'a> Tokens<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            inner: input.split_whitespace(),
            position: 0,
        }
    }

    fn section(&mut self, section: Section, expected: usize) -> Result<Vec<i64>, LoadError> {
        let mut values = Vec::new();
        while values.len() < expected {
            let Some(token) = self.inner.next() else {
                return Err(LoadError::UnexpectedEnd {
                    section,
                    expected,
                    found: values.len(),
                });
            };
            self.position += 1;

            let value = token.parse::<i64>().map_err(|_| LoadError::InvalidToken {
                token: token.to_string(),
                position: self.position,
            })?;
            values.push(value);
        }
        Ok(values)
    }

    fn matrix(&mut self, section: Section, n: usize, m: usize) -> Result<Vec<Vec<i64>>, LoadError> {
        let expected = n.saturating_mul(m);
        let flat = self.section(section, expected)?;
        Ok(flat.chunks(m).map(<[i64]>::to_vec).collect())
    }

    fn remaining(self) -> usize {
        self.inner.count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference_layout() {
        let input = "3 2\n1 0\n0 1\n0 0\n0 1\n1 0\n1 1\n0 0\n";
        let state = parse_str(input).unwrap();

        assert_eq!((state.n(), state.m()), (3, 2));
        assert_eq!(state.allocation_row(1), &[0, 1]);
        assert_eq!(state.request_row(2), &[1, 1]);
        assert_eq!(state.available_vector(), &[0, 0]);
    }

    #[test]
    fn test_line_breaks_not_significant() {
        let flat = parse_str("1 2 3 4 5 6 7 8").unwrap();
        let ragged = parse_str("1\n2 3\n4 5 6\n\n7\t8\n").unwrap();
        assert_eq!(flat, ragged);
        assert_eq!(flat.available_vector(), &[7, 8]);
    }

    #[test]
    fn test_missing_integers() {
        let err = parse_str("2 2\n1 0\n0 1\n0 0\n").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnexpectedEnd { section: Section::Request, expected: 4, found: 2 }
        ));

        let err = parse_str("").unwrap_err();
        assert!(matches!(
            err,
            LoadError::UnexpectedEnd { section: Section::Header, expected: 2, found: 0 }
        ));
    }

    #[test]
    fn test_invalid_token() {
        let err = parse_str("1 1\n0\nx\n0\n").unwrap_err();
        match err {
            LoadError::InvalidToken { token, position } => {
                assert_eq!(token, "x");
                assert_eq!(position, 4);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_negative_values_surface_as_state_errors() {
        let err = parse_str("-1 2").unwrap_err();
        assert!(matches!(err, LoadError::State(StateError::InvalidDimensions { n: -1, m: 2 })));

        let err = parse_str("1 1 0 -2 0").unwrap_err();
        assert!(matches!(err, LoadError::State(StateError::NegativeEntry { .. })));
    }

    #[test]
    fn test_trailing_tokens_ignored() {
        let state = parse_str("1 1 0 0 0 99 100").unwrap();
        assert_eq!(state.available(0), 0);
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(InputFormat::from_path(Path::new("a/state.JSON")), InputFormat::Json);
        assert_eq!(InputFormat::from_path(Path::new("input.txt")), InputFormat::Text);
        assert_eq!(InputFormat::from_path(Path::new("input")), InputFormat::Text);
    }

    #[test]
    fn test_parse_reader() {
        let state = parse_reader("1 1 3 0 1".as_bytes()).unwrap();
        assert_eq!(state.allocation(0, 0), 3);
    }
}
