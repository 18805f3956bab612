use std::io::Write;
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use tokio::sync::Semaphore;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use stalemate_core::adapters::{analyze_path, BatchConfig, BatchSummary, OutputFormat, Outcome, DEFAULT_INPUTS};
use stalemate_core::domain::PassOrder;

/// Stalemate deadlock detector
/// Reads allocation/request snapshots and reports deadlocked processes
#[derive(Parser, Debug)]
#[command(name = "stalemate", version)]
#[command(about = "Multi-instance deadlock detection over resource snapshots", long_about = None)]
struct Cli {
    /// Snapshot files (`.json` is decoded as JSON, anything else as whitespace text).
    /// Defaults to input.txt input2.txt input3.txt input4.txt
    files: Vec<PathBuf>,

    /// Report encoding
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Order in which processes are visited within a pass
    #[arg(long, value_enum, default_value_t = Order::Ascending)]
    order: Order,

    /// Print only the verdict, not the state tables
    #[arg(short, long)]
    quiet: bool,

    /// Print completion order, pass count and final work vector
    #[arg(long)]
    trace: bool,

    /// Snapshots analyzed concurrently (defaults to available parallelism)
    #[arg(short, long, value_parser = clap::value_parser!(u16).range(1..))]
    jobs: Option<u16>,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG wins if set
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Order {
    Ascending,
    Descending,
}

impl Cli {
    fn batch_config(&self) -> BatchConfig {
        let order = match self.order {
            Order::Ascending => PassOrder::Ascending,
            Order::Descending => PassOrder::Descending,
        };
        let format = match self.format {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
        };

        BatchConfig::builder()
            .order(order)
            .show_state(!self.quiet)
            .show_trace(self.trace)
            .format(format)
            .build()
    }

    fn inputs(&self) -> Vec<PathBuf> {
        if self.files.is_empty() {
            DEFAULT_INPUTS.iter().map(PathBuf::from).collect()
        } else {
            self.files.clone()
        }
    }

    fn jobs(&self) -> usize {
        match self.jobs {
            Some(jobs) => usize::from(jobs),
            None => std::thread::available_parallelism()
                .map(NonZeroUsize::get)
                .unwrap_or(1),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Analyze every input on the blocking pool, at most `jobs` at a time,
/// and write the reports in input order
async fn run<W: Write>(
    paths: Vec<PathBuf>,
    config: BatchConfig,
    jobs: usize,
    out: &mut W,
) -> Result<BatchSummary> {
    let semaphore = Arc::new(Semaphore::new(jobs));
    let mut handles = Vec::with_capacity(paths.len());

    for path in paths {
        let permit = Arc::clone(&semaphore)
            .acquire_owned()
            .await
            .context("Job limiter closed")?;
        let detector = config.detector;

        handles.push(tokio::task::spawn_blocking(move || {
            let _permit = permit;
            analyze_path(&path, &detector)
        }));
    }

    let mut summary = BatchSummary::default();
    for handle in handles {
        let outcome: Outcome = handle.await.context("Detection task panicked")?;
        summary.record(&outcome);
        out.write_all(outcome.render(&config).as_bytes())
            .context("Failed to write report")?;
    }
    out.flush().context("Failed to flush report")?;

    Ok(summary)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.batch_config();
    let paths = cli.inputs();
    let jobs = cli.jobs();

    info!("stalemate v{}", stalemate_core::VERSION);
    debug!(inputs = paths.len(), jobs, ?config, "starting batch");

    let total = paths.len();
    let stdout = std::io::stdout();
    let summary = run(paths, config, jobs, &mut stdout.lock()).await?;

    info!(
        analyzed = summary.analyzed,
        deadlocked = summary.deadlocked,
        failed = summary.failed,
        "batch complete"
    );

    if summary.failed > 0 {
        bail!("{} of {} inputs could not be loaded", summary.failed, total);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["stalemate"]).unwrap();

        assert_eq!(cli.inputs(), DEFAULT_INPUTS.iter().map(PathBuf::from).collect::<Vec<_>>());
        assert_eq!(cli.batch_config(), BatchConfig::default());
        assert!(cli.jobs() >= 1);
    }

    #[test]
    fn test_flags_map_to_config() {
        let cli = Cli::try_parse_from([
            "stalemate", "--format", "json", "--order", "descending", "-q", "--trace", "-j", "2", "a.txt",
        ])
        .unwrap();

        let config = cli.batch_config();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.detector.order(), PassOrder::Descending);
        assert!(!config.present.show_state);
        assert!(config.present.show_trace);
        assert_eq!(cli.jobs(), 2);
        assert_eq!(cli.inputs(), vec![PathBuf::from("a.txt")]);
    }

    #[test]
    fn test_zero_jobs_rejected() {
        assert!(Cli::try_parse_from(["stalemate", "--jobs", "0"]).is_err());
    }

    #[tokio::test]
    async fn test_run_keeps_input_order() {
        let dir = tempfile::tempdir().unwrap();
        let first = dir.path().join("first.txt");
        let second = dir.path().join("second.txt");
        std::fs::write(&first, "2 2 1 0 0 1 0 1 1 0 0 0").unwrap();
        std::fs::write(&second, "1 1 0 5 0").unwrap();
        let missing = dir.path().join("missing.txt");

        let config = BatchConfig::builder().show_state(false).build();
        let mut out = Vec::new();
        let summary = run(vec![first, missing, second], config, 2, &mut out).await.unwrap();

        assert_eq!(summary.analyzed, 2);
        assert_eq!(summary.deadlocked, 1);
        assert_eq!(summary.failed, 1);

        let text = String::from_utf8(out).unwrap();
        let deadlock = text.find("System is deadlocked").unwrap();
        let failure = text.find("Could not load file").unwrap();
        let clean = text.find("No deadlock is detected.").unwrap();
        assert!(deadlock < failure && failure < clean);
    }
}
