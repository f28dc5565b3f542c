//! Core library for Central Depository free float report extraction.
//!
//! This crate provides:
//! - PDF page decoding and text table detection
//! - The free float record grammar (wrapped rows, dates, issuer counts)
//! - Page-by-page extraction with anomaly tracking
//! - Per-document error logs that survive only when something went wrong
//! - CSV/XLSX output and directory batch processing

pub mod error;
pub mod extract;
pub mod grammar;
pub mod logging;
pub mod models;
pub mod output;
pub mod pdf;
pub mod processor;
pub mod watch;

pub use error::{FreeFloatError, Result};
pub use extract::{Anomaly, ExtractionResult, PageExtractor};
pub use logging::{ErrorLog, ErrorScope};
pub use models::{FreeFloatConfig, Record};
pub use pdf::{DocumentDecoder, Page, PageSource, PdfDecoder, Table};
pub use processor::{FileProcessor, ProcessOutcome};
pub use watch::{should_process, FileEvent, FileEventKind};
