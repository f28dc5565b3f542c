//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for freefloat.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FreeFloatConfig {
    /// Input/output directories.
    pub paths: PathsConfig,

    /// Output file configuration.
    pub output: OutputConfig,
}

/// Directory configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Directory scanned (and watched) for PDF reports.
    pub input_dir: PathBuf,

    /// Directory receiving CSV/XLSX files and error logs.
    pub output_dir: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("input"),
            output_dir: PathBuf::from("output"),
        }
    }
}

/// Output file configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Prefix CSV files with a UTF-8 byte-order mark (spreadsheet compatibility).
    pub write_csv_bom: bool,

    /// Also write an `.xlsx` workbook next to each CSV.
    pub write_xlsx: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_csv_bom: true,
            write_xlsx: true,
        }
    }
}

impl FreeFloatConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Override directories, keeping configured values where `None`.
    pub fn with_dirs(mut self, input_dir: Option<PathBuf>, output_dir: Option<PathBuf>) -> Self {
        if let Some(dir) = input_dir {
            self.paths.input_dir = dir;
        }
        if let Some(dir) = output_dir {
            self.paths.output_dir = dir;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: FreeFloatConfig =
            serde_json::from_str(r#"{"output": {"write_xlsx": false}}"#).unwrap();

        assert!(!config.output.write_xlsx);
        assert!(config.output.write_csv_bom);
        assert_eq!(config.paths.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_with_dirs_overrides() {
        let config = FreeFloatConfig::default()
            .with_dirs(Some(PathBuf::from("/in")), None);

        assert_eq!(config.paths.input_dir, PathBuf::from("/in"));
        assert_eq!(config.paths.output_dir, PathBuf::from("output"));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = FreeFloatConfig::default();
        config.output.write_csv_bom = false;
        config.save(&path).unwrap();

        let loaded = FreeFloatConfig::from_file(&path).unwrap();
        assert!(!loaded.output.write_csv_bom);
    }
}
