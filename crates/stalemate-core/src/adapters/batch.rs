//! Batch Runner - Loader → Detector → Presenter
//!
//! Each snapshot is handled independently: a file that fails to load is
//! reported and the batch moves on.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::domain::detector::{Detection, Detector, PassOrder};
use crate::domain::resources::ResourceState;
use crate::infrastructure::loader::{load_path, LoadError};
use crate::infrastructure::presenter::{render_json, render_text, PresentOptions};

/// The input list used when none is given
pub const DEFAULT_INPUTS: [&str; 4] = ["input.txt", "input2.txt", "input3.txt", "input4.txt"];

/// Report encoding
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Classic tables and verdict lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Batch configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchConfig {
    /// Detector used for every snapshot
    pub detector: Detector,
    /// Text rendering switches
    pub present: PresentOptions,
    /// Report encoding
    pub format: OutputFormat,
}

impl BatchConfig {
    /// Start a builder from the defaults
    pub fn builder() -> BatchConfigBuilder {
        BatchConfigBuilder::new()
    }
}

/// Builder for [`BatchConfig`]
///
/// # Example
///
/// ```rust
/// use stalemate_core::adapters::{BatchConfig, OutputFormat};
/// use stalemate_core::domain::PassOrder;
///
/// let config = BatchConfig::builder()
///     .order(PassOrder::Descending)
///     .show_state(false)
///     .format(OutputFormat::Json)
///     .build();
///
/// assert_eq!(config.detector.order(), PassOrder::Descending);
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchConfigBuilder {
    order: PassOrder,
    present: PresentOptions,
    format: OutputFormat,
}

impl BatchConfigBuilder {
    /// Builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pass order
    pub fn order(mut self, order: PassOrder) -> Self {
        self.order = order;
        self
    }

    /// Print (or hide) the state tables
    pub fn show_state(mut self, show: bool) -> Self {
        self.present.show_state = show;
        self
    }

    /// Print (or hide) the completion trace
    pub fn show_trace(mut self, show: bool) -> Self {
        self.present.show_trace = show;
        self
    }

    /// Set the report encoding
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Build the configuration
    pub fn build(self) -> BatchConfig {
        BatchConfig {
            detector: Detector::with_order(self.order),
            present: self.present,
            format: self.format,
        }
    }
}

/// A loaded snapshot and its detection
#[derive(Debug, Clone)]
pub struct Analysis {
    /// The snapshot
    pub state: ResourceState,
    /// The detection run over it
    pub detection: Detection,
}

/// Result of handling one input
#[derive(Debug)]
pub struct Outcome {
    /// Where the snapshot came from
    pub source: PathBuf,
    /// Analysis, or why the snapshot could not be loaded
    pub result: Result<Analysis, LoadError>,
}

impl Outcome {
    /// Whether the snapshot loaded and turned out deadlocked
    pub fn is_deadlocked(&self) -> bool {
        matches!(&self.result, Ok(analysis) if analysis.detection.verdict.is_deadlocked())
    }

    /// Render this outcome for standard output
    ///
    /// Load failures render as `Could not load file: <path>: <error>`.
    pub fn render(&self, config: &BatchConfig) -> String {
        let source = self.source.display().to_string();
        match &self.result {
            Ok(analysis) => match config.format {
                OutputFormat::Text => {
                    render_text(&source, &analysis.state, &analysis.detection, config.present)
                }
                OutputFormat::Json => {
                    match render_json(&source, &analysis.state, &analysis.detection) {
                        Ok(line) => format!("{}\n", line),
                        Err(err) => format!("Could not render file: {}: {}\n", source, err),
                    }
                }
            },
            Err(err) => format!("Could not load file: {}: {}\n", source, err),
        }
    }
}

/// Load one snapshot and run the detector over it
pub fn analyze_path(path: &Path, detector: &Detector) -> Outcome {
    let result = load_path(path).map(|state| {
        let detection = detector.run(&state);
        Analysis { state, detection }
    });

    match &result {
        Ok(analysis) => info!(
            source = %path.display(),
            verdict = %analysis.detection.verdict,
            "snapshot analyzed"
        ),
        Err(err) => error!(source = %path.display(), %err, "snapshot could not be loaded"),
    }

    Outcome {
        source: path.to_path_buf(),
        result,
    }
}

/// Totals over a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    /// Snapshots analyzed successfully
    pub analyzed: usize,
    /// Analyzed snapshots that were deadlocked
    pub deadlocked: usize,
    /// Inputs that could not be loaded
    pub failed: usize,
}

impl BatchSummary {
    /// Account for one outcome
    pub fn record(&mut self, outcome: &Outcome) {
        match &outcome.result {
            Ok(_) => {
                self.analyzed += 1;
                if outcome.is_deadlocked() {
                    self.deadlocked += 1;
                }
            }
            Err(_) => self.failed += 1,
        }
    }
}

/// Analyze every path in order on the current thread
pub fn run_sequential(paths: &[PathBuf], config: &BatchConfig) -> (Vec<Outcome>, BatchSummary) {
    let mut summary = BatchSummary::default();
    let outcomes: Vec<Outcome> = paths
        .iter()
        .map(|path| {
            let outcome = analyze_path(path, &config.detector);
            summary.record(&outcome);
            outcome
        })
        .collect();
    (outcomes, summary)
}
