//! Watch command - process reports as they appear in the input directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Args;
use console::style;
use notify::{Event, EventKind, RecursiveMode, Watcher};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use freefloat_core::{should_process, ErrorLog, FileEvent, FileEventKind, FileProcessor};

use super::load_config;
use super::process::print_outcome;

/// Arguments for the watch command.
#[derive(Args)]
pub struct WatchArgs {
    /// Input directory to watch (default: from config)
    #[arg(short, long)]
    input_dir: Option<PathBuf>,

    /// Output directory (default: from config)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Process reports already in the input directory before watching
    #[arg(long)]
    process_existing: bool,
}

pub async fn run(
    args: WatchArgs,
    config_path: Option<&Path>,
    error_log: ErrorLog,
) -> anyhow::Result<()> {
    let config = load_config(config_path)?.with_dirs(args.input_dir, args.output_dir);
    let input_dir = config.paths.input_dir.clone();
    if !input_dir.is_dir() {
        anyhow::bail!("Input directory not found: {}", input_dir.display());
    }

    let processor = Arc::new(FileProcessor::new(config, error_log));

    if args.process_existing {
        let processor = Arc::clone(&processor);
        let dir = input_dir.clone();
        let outputs = tokio::task::spawn_blocking(move || processor.process_all(&dir)).await?;
        info!("Processed {} existing files", outputs.len());
    }

    let (tx, mut rx) = mpsc::channel(100);
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
        if let Err(e) = tx.blocking_send(res) {
            debug!("Dropped file event: {}", e);
        }
    })?;
    watcher.watch(&input_dir, RecursiveMode::NonRecursive)?;

    println!(
        "{} Watching {} for new PDF files. Press Ctrl+C to stop.",
        style("ℹ").blue(),
        input_dir.display()
    );

    let shutdown = tokio::signal::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => {
                info!("Stopping watcher");
                break;
            }
            received = rx.recv() => {
                let Some(res) = received else {
                    break;
                };
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        warn!("Watch error: {}", e);
                        continue;
                    }
                };

                // One document at a time: the error log scope is exclusive.
                for file_event in file_events(&event) {
                    if !should_process(&file_event) {
                        continue;
                    }
                    info!("New file detected: {}", file_event.path.display());
                    let processor = Arc::clone(&processor);
                    let outcome =
                        tokio::task::spawn_blocking(move || processor.process_one(&file_event.path))
                            .await?;
                    print_outcome(&outcome);
                }
            }
        }
    }

    drop(watcher);
    Ok(())
}

/// Translate a notify event into create/modify notifications.
fn file_events(event: &Event) -> Vec<FileEvent> {
    let kind = match event.kind {
        EventKind::Create(_) => FileEventKind::Created,
        EventKind::Modify(_) => FileEventKind::Modified,
        _ => return Vec::new(),
    };

    event
        .paths
        .iter()
        .map(|path| FileEvent {
            path: path.clone(),
            is_dir: path.is_dir(),
            kind,
        })
        .collect()
}
