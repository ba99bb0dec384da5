use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueEnum};
use loadflow::model::CaseRecords;
use loadflow::{printpf, runpf_with, PFOpt, PrintProgress, ProgressMonitor};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum Format {
    /// Plain-text report.
    Table,
    /// Bus, line and summary records as JSON.
    Json,
}

/// Newton-Raphson AC load flow.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JSON case file with "buses" (11-field) and "lines" (6-field) records.
    case: PathBuf,

    /// System base (MVA).
    #[arg(long, default_value_t = 100.0)]
    base_mva: f64,

    /// Mismatch tolerance (p.u.).
    #[arg(long, default_value_t = 1e-5)]
    tolerance: f64,

    /// Maximum number of Newton iterations.
    #[arg(long, default_value_t = 100)]
    max_it: usize,

    #[arg(long, value_enum, default_value_t = Format::Table)]
    format: Format,

    /// Print the mismatch of every iteration to stderr.
    #[arg(long)]
    progress: bool,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // log records are forwarded to the subscriber, RUST_LOG overrides -v
    let level = match cli.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(level.into())
                .from_env_lossy(),
        )
        .with_writer(io::stderr)
        .init();

    let text = fs::read_to_string(&cli.case)
        .with_context(|| format!("reading case file {}", cli.case.display()))?;
    let case: CaseRecords = serde_json::from_str(&text)
        .with_context(|| format!("parsing case file {}", cli.case.display()))?;
    let model = case.to_model()?;

    let mpopt = PFOpt {
        base_mva: cli.base_mva,
        tolerance: cli.tolerance,
        max_it: cli.max_it,
    };
    let progress = PrintProgress {};
    let progress: Option<&dyn ProgressMonitor> = if cli.progress {
        Some(&progress)
    } else {
        None
    };

    let results = runpf_with(&model, &mpopt, &loadflow::linsolve::DenseLU, progress)?;
    if !results.converged() {
        log::warn!(
            "power flow did not converge in {} iterations",
            results.iterations()
        );
    }

    match cli.format {
        Format::Table => printpf(&results, io::stdout().lock())?,
        Format::Json => {
            serde_json::to_writer_pretty(io::stdout().lock(), &results)?;
            println!();
        }
    }
    Ok(())
}
