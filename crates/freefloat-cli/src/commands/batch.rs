//! Batch command - process every report in a directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use freefloat_core::{ErrorLog, FileProcessor, ProcessOutcome};

use super::load_config;
use super::process::print_outcome;

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input directory (default: from config)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,
}

pub async fn run(
    args: BatchArgs,
    config_path: Option<&Path>,
    error_log: ErrorLog,
) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?.with_dirs(args.input_dir, args.output_dir);
    let input_dir = config.paths.input_dir.clone();
    let processor = FileProcessor::new(config, error_log);

    let files = match processor.list_documents(&input_dir) {
        Ok(files) => files,
        Err(e) => {
            error!("Failed to list PDF files in {}: {}", input_dir.display(), e);
            return Ok(());
        }
    };

    if files.is_empty() {
        warn!("No PDF files found in {}", input_dir.display());
        return Ok(());
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let outcomes = tokio::task::spawn_blocking({
        let pb = pb.clone();
        move || {
            let mut outcomes = Vec::with_capacity(files.len());
            for path in &files {
                outcomes.push(processor.process_one(path));
                pb.inc(1);
            }
            outcomes
        }
    })
    .await?;

    pb.finish_and_clear();
    print_summary(&outcomes, start);
    Ok(())
}

fn print_summary(outcomes: &[ProcessOutcome], start: Instant) {
    for outcome in outcomes {
        print_outcome(outcome);
    }

    let successful = outcomes.iter().filter(|o| o.success).count();
    let degraded = outcomes.iter().filter(|o| o.success && o.degraded).count();
    let failed = outcomes.len() - successful;

    println!();
    println!(
        "{} Processed {} files in {:.2}s",
        style("✓").green(),
        outcomes.len(),
        start.elapsed().as_secs_f64()
    );
    println!(
        "   {} successful ({} with warnings), {} failed",
        style(successful).green(),
        style(degraded).yellow(),
        style(failed).red()
    );
}
