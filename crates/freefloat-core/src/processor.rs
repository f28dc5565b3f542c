//! Per-document orchestration and directory batches.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::error::{FreeFloatError, Result};
use crate::extract::{ExtractionResult, PageExtractor};
use crate::logging::ErrorLog;
use crate::models::FreeFloatConfig;
use crate::output::write_outputs;
use crate::pdf::{DocumentDecoder, PdfDecoder};

/// Result of processing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessOutcome {
    /// The input document.
    pub source: PathBuf,
    /// Whether output files were written.
    pub success: bool,
    /// Path of the CSV file on success.
    pub output: Option<PathBuf>,
    /// Number of records written.
    pub records: usize,
    /// Whether any anomaly occurred.
    pub degraded: bool,
    /// Retained error log, if any.
    pub error_log: Option<PathBuf>,
}

impl ProcessOutcome {
    fn failed(source: &Path, error_log: Option<PathBuf>) -> Self {
        Self {
            source: source.to_path_buf(),
            success: false,
            output: None,
            records: 0,
            degraded: true,
            error_log,
        }
    }
}

/// Drives extraction and output for documents in the configured directories.
pub struct FileProcessor<D: DocumentDecoder = PdfDecoder> {
    config: FreeFloatConfig,
    decoder: D,
    extractor: PageExtractor,
    error_log: ErrorLog,
}

impl FileProcessor<PdfDecoder> {
    /// Create a processor decoding PDFs from disk.
    ///
    /// `error_log` must be the log whose [`layer`](ErrorLog::layer) is
    /// installed in the active subscriber.
    pub fn new(config: FreeFloatConfig, error_log: ErrorLog) -> Self {
        Self {
            config,
            decoder: PdfDecoder::new(),
            extractor: PageExtractor::new(),
            error_log,
        }
    }
}

impl<D: DocumentDecoder> FileProcessor<D> {
    /// Replace the document decoder.
    pub fn with_decoder<E: DocumentDecoder>(self, decoder: E) -> FileProcessor<E> {
        FileProcessor {
            config: self.config,
            decoder,
            extractor: self.extractor,
            error_log: self.error_log,
        }
    }

    pub fn with_extractor(mut self, extractor: PageExtractor) -> Self {
        self.extractor = extractor;
        self
    }

    pub fn error_log(&self) -> &ErrorLog {
        &self.error_log
    }

    /// Process a single document.
    ///
    /// Never fails: every problem is logged and reported through the
    /// returned outcome so that batch and watch loops keep going.
    pub fn process_one(&self, path: &Path) -> ProcessOutcome {
        let output_dir = &self.config.paths.output_dir;
        if let Err(e) = fs::create_dir_all(output_dir) {
            error!("Failed to create output directory {}: {}", output_dir.display(), e);
            return ProcessOutcome::failed(path, None);
        }

        let stem = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "document".to_string());

        if !self.error_log.is_installed() {
            warn!(
                "Error log layer is not installed, no error log will be kept for {}",
                path.display()
            );
        }

        let scope = match self.error_log.open(output_dir, &stem) {
            Ok(scope) => scope,
            Err(e) => {
                error!("Failed to open error log for {}: {}", path.display(), e);
                return ProcessOutcome::failed(path, None);
            }
        };

        info!("Processing file: {}", path.display());

        let extracted = match self.extract(path) {
            Ok(result) => {
                for anomaly in &result.anomalies {
                    debug!("Anomaly in {}: {}", stem, anomaly);
                    scope.mark_error();
                }
                Some(result)
            }
            Err(e) => {
                error!("Error processing PDF {}: {}", path.display(), e);
                scope.mark_error();
                None
            }
        };

        let error_log = scope.close();
        if let Some(log) = &error_log {
            info!("Errors were logged to {}", log.display());
        }

        let Some(result) = extracted.filter(|r| !r.records.is_empty()) else {
            error!("Failed to extract data from {}", path.display());
            return ProcessOutcome::failed(path, error_log);
        };

        match write_outputs(output_dir, &result.report_date, &result.records, &self.config.output) {
            Ok(written) => {
                info!(
                    "Saved {} records to {}",
                    result.records.len(),
                    written.csv.display()
                );
                ProcessOutcome {
                    source: path.to_path_buf(),
                    success: true,
                    output: Some(written.csv),
                    records: result.records.len(),
                    degraded: result.degraded(),
                    error_log,
                }
            }
            Err(e) => {
                error!("Failed to write output for {}: {}", path.display(), e);
                ProcessOutcome::failed(path, error_log)
            }
        }
    }

    /// PDF files directly inside `dir`, sorted by path.
    pub fn list_documents(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Err(FreeFloatError::Io(io::Error::new(
                io::ErrorKind::NotFound,
                format!("{} is not a directory", dir.display()),
            )));
        }

        let pattern = format!("{}/*.pdf", Pattern::escape(&dir.to_string_lossy()));
        let options = MatchOptions {
            case_sensitive: false,
            ..Default::default()
        };

        let entries = glob::glob_with(&pattern, options)
            .map_err(|e| FreeFloatError::Config(format!("invalid input pattern: {}", e)))?;

        let mut documents = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| FreeFloatError::Io(e.into()))?;
            if path.is_file() {
                documents.push(path);
            }
        }
        documents.sort();
        Ok(documents)
    }

    /// Process every PDF in `dir`, returning the CSV paths written.
    pub fn process_all(&self, dir: &Path) -> Vec<PathBuf> {
        let documents = match self.list_documents(dir) {
            Ok(documents) => documents,
            Err(e) => {
                error!("Failed to list PDF files in {}: {}", dir.display(), e);
                return Vec::new();
            }
        };

        if documents.is_empty() {
            warn!("No PDF files found in {}", dir.display());
            return Vec::new();
        }

        info!("Found {} PDF files to process", documents.len());
        documents
            .iter()
            .filter_map(|path| self.process_one(path).output)
            .collect()
    }

    fn extract(&self, path: &Path) -> Result<ExtractionResult> {
        let document = self.decoder.open(path)?;
        Ok(self.extractor.extract(&document)?)
    }
}
