//! Process command - extract records from a single report.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use freefloat_core::{ErrorLog, FileProcessor, ProcessOutcome};

use super::load_config;

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input PDF report
    #[arg(required = true)]
    input: PathBuf,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

pub async fn run(
    args: ProcessArgs,
    config_path: Option<&Path>,
    error_log: ErrorLog,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?.with_dirs(None, args.output_dir);

    if !args.input.is_file() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    pb.set_message(format!("Processing {}", args.input.display()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let processor = FileProcessor::new(config, error_log);
    let input = args.input.clone();
    let outcome = tokio::task::spawn_blocking(move || processor.process_one(&input)).await?;

    pb.finish_and_clear();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        print_outcome(&outcome);
        println!(
            "{} Finished in {:.2}s",
            style("ℹ").blue(),
            start.elapsed().as_secs_f64()
        );
    }

    if !outcome.success {
        anyhow::bail!("No records extracted from {}", args.input.display());
    }
    Ok(())
}

pub(crate) fn print_outcome(outcome: &ProcessOutcome) {
    match &outcome.output {
        Some(output) if outcome.degraded => println!(
            "{} {} -> {} ({} records, with warnings)",
            style("!").yellow(),
            outcome.source.display(),
            output.display(),
            outcome.records
        ),
        Some(output) => println!(
            "{} {} -> {} ({} records)",
            style("✓").green(),
            outcome.source.display(),
            output.display(),
            outcome.records
        ),
        None => println!("{} {} failed", style("✗").red(), outcome.source.display()),
    }

    if let Some(log) = &outcome.error_log {
        println!("   see {}", style(log.display()).dim());
    }
}
