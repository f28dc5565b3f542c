//! Subcommand implementations.

pub mod batch;
pub mod config;
pub mod process;
pub mod watch;

use std::path::{Path, PathBuf};

use anyhow::Context;
use freefloat_core::FreeFloatConfig;

/// `<config dir>/freefloat/config.json`.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("freefloat")
        .join("config.json")
}

/// Load the configuration named with `--config`, else the default file if it
/// exists, else built-in defaults.
pub fn load_config(config_path: Option<&Path>) -> anyhow::Result<FreeFloatConfig> {
    if let Some(path) = config_path {
        return FreeFloatConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()));
    }

    let path = default_config_path();
    if path.exists() {
        FreeFloatConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))
    } else {
        Ok(FreeFloatConfig::default())
    }
}
