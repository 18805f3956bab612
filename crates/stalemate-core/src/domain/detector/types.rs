//! Detector Types

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::resources::ProcessId;

/// Outcome of one detection run
///
/// `Deadlocked` carries exactly the processes left unfinished at the fixed
/// point, in ascending index order. It is never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "status", content = "processes", rename_all = "snake_case")]
pub enum Verdict {
    /// Every process can eventually finish
    NoDeadlock,
    /// These processes can never finish
    Deadlocked(Vec<ProcessId>),
}

impl Verdict {
    /// Whether any process is deadlocked
    #[inline]
    pub fn is_deadlocked(&self) -> bool {
        matches!(self, Self::Deadlocked(_))
    }

    /// The deadlocked processes (empty for `NoDeadlock`)
    pub fn deadlocked(&self) -> &[ProcessId] {
        match self {
            Self::NoDeadlock => &[],
            Self::Deadlocked(processes) => processes,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDeadlock => write!(f, "no deadlock"),
            Self::Deadlocked(processes) => {
                write!(f, "deadlocked: ")?;
                for (i, p) in processes.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", p)?;
                }
                Ok(())
            }
        }
    }
}

/// Order in which processes are visited within one pass
///
/// The final verdict does not depend on this; only the completion order
/// and the number of passes do.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassOrder {
    /// `P0, P1, ..., Pn-1`
    #[default]
    Ascending,
    /// `Pn-1, ..., P1, P0`
    Descending,
}

impl PassOrder {
    /// Human-readable name
    pub fn name(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

impl fmt::Display for PassOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Verdict plus the diagnostics of the run that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Detection {
    /// The verdict
    pub verdict: Verdict,
    /// Processes in the order they were marked finished
    ///
    /// Zero-allocation processes come first (ascending), followed by the
    /// processes released during the passes. No process appears twice.
    pub completion_order: Vec<ProcessId>,
    /// Full passes executed, including the last pass that made no progress
    pub passes: usize,
    /// Work vector at the fixed point
    pub work: Vec<u64>,
}

impl Detection {
    /// Consume the diagnostics, keeping only the verdict
    pub fn into_verdict(self) -> Verdict {
        self.verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verdict_accessors() {
        let verdict = Verdict::Deadlocked(vec![ProcessId(0), ProcessId(1)]);
        assert!(verdict.is_deadlocked());
        assert_eq!(verdict.deadlocked(), &[ProcessId(0), ProcessId(1)]);
        assert_eq!(verdict.to_string(), "deadlocked: P0, P1");

        assert!(!Verdict::NoDeadlock.is_deadlocked());
        assert!(Verdict::NoDeadlock.deadlocked().is_empty());
    }

    #[test]
    fn test_verdict_json_shape() {
        let json = serde_json::to_string(&Verdict::Deadlocked(vec![ProcessId(2)])).unwrap();
        assert_eq!(json, r#"{"status":"deadlocked","processes":[2]}"#);

        let json = serde_json::to_string(&Verdict::NoDeadlock).unwrap();
        assert_eq!(json, r#"{"status":"no_deadlock"}"#);
    }
}
