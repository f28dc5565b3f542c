//! Extraction result and anomaly types.

use std::fmt;

use serde::Serialize;

use crate::models::Record;

/// A recoverable problem found while extracting a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Anomaly {
    /// No report date in the document; `fallback` was used instead.
    DateMissing { fallback: String },
    /// Table detection failed on a page; its text was used instead.
    TableMissing { page: u32 },
    /// A table row did not match the record grammar.
    RowRejected { page: u32, text: String },
    /// The footer issuer count differs from the number of records.
    CountMismatch { expected: u64, actual: usize },
    /// Nothing could be extracted.
    NoRecords,
}

impl fmt::Display for Anomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DateMissing { fallback } => write!(f, "no report date, using {}", fallback),
            Self::TableMissing { page } => write!(f, "no table on page {}", page),
            Self::RowRejected { page, text } => write!(f, "rejected row on page {}: {}", page, text),
            Self::CountMismatch { expected, actual } => {
                write!(f, "expected {} emitents, extracted {}", expected, actual)
            }
            Self::NoRecords => write!(f, "no records extracted"),
        }
    }
}

/// Records extracted from one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Records in document order.
    pub records: Vec<Record>,
    /// `DD-MM-YYYY` report date, or the fallback date.
    pub report_date: String,
    /// Whether `report_date` came from the document.
    pub date_found: bool,
    /// Issuer count declared in the footer.
    pub expected_count: Option<u64>,
    /// Anomalies in the order they were found.
    pub anomalies: Vec<Anomaly>,
}

impl ExtractionResult {
    /// True if any anomaly occurred.
    pub fn degraded(&self) -> bool {
        !self.anomalies.is_empty()
    }

    /// Number of rows rejected by the grammar.
    pub fn rejected_rows(&self) -> usize {
        self.anomalies
            .iter()
            .filter(|a| matches!(a, Anomaly::RowRejected { .. }))
            .count()
    }
}
