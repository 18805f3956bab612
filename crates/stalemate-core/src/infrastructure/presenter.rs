//! Report Rendering
//!
//! Text output reproduces the classic detector report byte for byte:
//!
//! ```text
//! Allocated
//!   R0 R1
//! P0 1  0
//! Available
//!   R0 R1
//!   0  0
//! Requested
//!   R0 R1
//! P0 0  1
//!
//! System is deadlocked, the deadlocked processes are:
//! P0
//! ```

use std::fmt;

use serde::Serialize;

use crate::domain::detector::{Detection, Verdict};
use crate::domain::resources::{ProcessId, ResourceState};

/// Separator printed after each report in text mode
pub const SEPARATOR: &str = "---------------------------------------";

/// Displays the Allocation, Available and Request tables
pub struct StateTable<'a>(pub &'a ResourceState);

impl fmt::Display for StateTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.0;

        writeln!(f, "Allocated")?;
        write_header(f, state)?;
        write_matrix(f, state.allocation_matrix())?;

        writeln!(f, "Available")?;
        write_header(f, state)?;
        write!(f, "  ")?;
        write_row(f, state.available_vector())?;

        writeln!(f, "Requested")?;
        write_header(f, state)?;
        write_matrix(f, state.request_matrix())
    }
}

fn write_header(f: &mut fmt::Formatter<'_>, state: &ResourceState) -> fmt::Result {
    write!(f, "  ")?;
    for resource in state.resources() {
        write!(f, "{} ", resource)?;
    }
    writeln!(f)
}

fn write_matrix(f: &mut fmt::Formatter<'_>, matrix: &[Vec<u64>]) -> fmt::Result {
    for (i, row) in matrix.iter().enumerate() {
        write!(f, "{} ", ProcessId(i))?;
        write_row(f, row)?;
    }
    Ok(())
}

fn write_row(f: &mut fmt::Formatter<'_>, row: &[u64]) -> fmt::Result {
    for units in row {
        write!(f, "{}  ", units)?;
    }
    writeln!(f)
}

/// Displays the verdict lines, preceded by a blank line
pub struct VerdictReport<'a>(pub &'a Verdict);

impl fmt::Display for VerdictReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f)?;
        match self.0 {
            Verdict::NoDeadlock => writeln!(f, "No deadlock is detected."),
            Verdict::Deadlocked(processes) => {
                writeln!(f, "System is deadlocked, the deadlocked processes are:")?;
                for process in processes {
                    writeln!(f, "{}", process)?;
                }
                Ok(())
            }
        }
    }
}

/// Displays how the fixed point was reached
pub struct TraceReport<'a>(pub &'a Detection);

impl fmt::Display for TraceReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let detection = self.0;

        write!(f, "Completion order:")?;
        for process in &detection.completion_order {
            write!(f, " {}", process)?;
        }
        writeln!(f)?;
        writeln!(f, "Passes: {}", detection.passes)?;

        write!(f, "Final work:")?;
        for units in &detection.work {
            write!(f, " {}", units)?;
        }
        writeln!(f)
    }
}

/// Rendering switches for text reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresentOptions {
    /// Print the three state tables
    pub show_state: bool,
    /// Print completion order, pass count and final Work
    pub show_trace: bool,
}

impl Default for PresentOptions {
    fn default() -> Self {
        Self {
            show_state: true,
            show_trace: false,
        }
    }
}

/// Text report for one snapshot
pub fn render_text(
    source: &str,
    state: &ResourceState,
    detection: &Detection,
    options: PresentOptions,
) -> String {
    let mut out = format!("Processing file: {}\n", source);
    if options.show_state {
        out.push_str(&StateTable(state).to_string());
    }
    out.push_str(&VerdictReport(&detection.verdict).to_string());
    if options.show_trace {
        out.push_str(&TraceReport(detection).to_string());
    }
    out.push_str(SEPARATOR);
    out.push('\n');
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    source: &'a str,
    state: &'a ResourceState,
    verdict: &'a Verdict,
    completion_order: &'a [ProcessId],
    passes: usize,
    work: &'a [u64],
}

/// JSON report for one snapshot (a single line)
///
/// # Errors
/// Only if serialization itself fails.
pub fn render_json(
    source: &str,
    state: &ResourceState,
    detection: &Detection,
) -> Result<String, serde_json::Error> {
    serde_json::to_string(&JsonReport {
        source,
        state,
        verdict: &detection.verdict,
        completion_order: &detection.completion_order,
        passes: detection.passes,
        work: &detection.work,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::detector::Detector;

    fn mutual_hold() -> ResourceState {
        ResourceState::new(
            2,
            2,
            vec![vec![1, 0], vec![0, 1]],
            vec![vec![0, 1], vec![1, 0]],
            vec![0, 0],
        )
        .unwrap()
    }

    #[test]
    fn test_state_table_layout() {
        let expected = concat!(
            "Allocated\n",
            "  R0 R1 \n",
            "P0 1  0  \n",
            "P1 0  1  \n",
            "Available\n",
            "  R0 R1 \n",
            "  0  0  \n",
            "Requested\n",
            "  R0 R1 \n",
            "P0 0  1  \n",
            "P1 1  0  \n",
        );
        assert_eq!(StateTable(&mutual_hold()).to_string(), expected);
    }

    #[test]
    fn test_verdict_lines() {
        assert_eq!(
            VerdictReport(&Verdict::NoDeadlock).to_string(),
            "\nNo deadlock is detected.\n"
        );
        assert_eq!(
            VerdictReport(&Verdict::Deadlocked(vec![ProcessId(0), ProcessId(3)])).to_string(),
            "\nSystem is deadlocked, the deadlocked processes are:\nP0\nP3\n"
        );
    }

    #[test]
    fn test_render_text_quiet_with_trace() {
        let state = mutual_hold();
        let detection = Detector::new().run(&state);
        let options = PresentOptions {
            show_state: false,
            show_trace: true,
        };

        let text = render_text("in.txt", &state, &detection, options);
        assert_eq!(
            text,
            "Processing file: in.txt\n\
             \nSystem is deadlocked, the deadlocked processes are:\nP0\nP1\n\
             Completion order:\nPasses: 1\nFinal work: 0 0\n\
             ---------------------------------------\n"
        );
    }

    #[test]
    fn test_render_json() {
        let state = mutual_hold();
        let detection = Detector::new().run(&state);

        let json = render_json("in.txt", &state, &detection).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["source"], "in.txt");
        assert_eq!(value["verdict"]["status"], "deadlocked");
        assert_eq!(value["verdict"]["processes"], serde_json::json!([0, 1]));
        assert_eq!(value["state"]["available"], serde_json::json!([0, 0]));
        assert_eq!(value["passes"], 1);
    }
}
