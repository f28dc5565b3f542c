//! CLI application for free float report extraction.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use freefloat_core::ErrorLog;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use commands::{batch, config, process, watch};

/// Extract free float tables from Central Depository PDF reports
#[derive(Parser)]
#[command(name = "freefloat")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process a single PDF report
    Process(process::ProcessArgs),

    /// Process every PDF report in the input directory
    Batch(batch::BatchArgs),

    /// Watch the input directory and process new reports
    Watch(watch::WatchArgs),

    /// Manage configuration
    Config(config::ConfigArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Console output plus the per-document error log sink
    let error_log = ErrorLog::new();
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(level),
        )
        .with(error_log.layer())
        .try_init()?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Process(args) => process::run(args, config_path, error_log).await,
        Commands::Batch(args) => batch::run(args, config_path, error_log).await,
        Commands::Watch(args) => watch::run(args, config_path, error_log).await,
        Commands::Config(args) => config::run(args, config_path).await,
    }
}
