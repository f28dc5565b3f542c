//! Page-by-page record extraction.

mod result;

pub use result::{Anomaly, ExtractionResult};

use chrono::{Local, NaiveDate};
use tracing::{debug, error, info, warn};

use crate::grammar::{
    extract_emitent_count, extract_report_date, format_report_date, join_cells, parse_line,
    HEADER_TEXT, TABLE_HEADER_TOKENS, TEXT_SKIP_MARKERS,
};
use crate::models::Record;
use crate::pdf::{self, PageSource, Table};

/// Extracts free float records from a decoded document.
#[derive(Debug, Clone, Default)]
pub struct PageExtractor {
    /// Date used when the document carries none; `None` means today.
    fallback_date: Option<NaiveDate>,
}

/// Mutable state of one extraction run.
#[derive(Default)]
struct Collected {
    records: Vec<Record>,
    expected_count: Option<u64>,
    anomalies: Vec<Anomaly>,
}

impl Collected {
    fn capture_count(&mut self, line: &str) -> bool {
        match extract_emitent_count(line) {
            Some(count) => {
                info!("Found emitent count: {}", count);
                self.expected_count = Some(count);
                true
            }
            None => false,
        }
    }
}

impl PageExtractor {
    /// Create a new extractor falling back to the current date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed fallback date instead of today.
    pub fn with_fallback_date(mut self, date: NaiveDate) -> Self {
        self.fallback_date = Some(date);
        self
    }

    /// Run the date pass, the record pass and the count check.
    ///
    /// Only decoder failures are returned as errors; every other problem is
    /// recorded as an [`Anomaly`] on the result.
    pub fn extract<S>(&self, source: &S) -> pdf::Result<ExtractionResult>
    where
        S: PageSource + ?Sized,
    {
        let mut collected = Collected::default();
        let page_count = source.page_count();

        let report_date = match self.find_report_date(source)? {
            Some(date) => {
                info!("Extracted date: {}", date);
                Some(date)
            }
            None => None,
        };
        let date_found = report_date.is_some();
        let report_date = report_date.unwrap_or_else(|| {
            let fallback = self.fallback_date();
            warn!("No date found in PDF. Using current date: {}", fallback);
            collected.anomalies.push(Anomaly::DateMissing {
                fallback: fallback.clone(),
            });
            fallback
        });

        for page in 1..=page_count {
            match source.extract_table(page)? {
                Some(table) if !table.is_empty() => {
                    self.collect_table(page, &table, &mut collected);
                }
                _ => {
                    warn!("No table found on page {}, trying with raw text", page);
                    collected.anomalies.push(Anomaly::TableMissing { page });
                    if let Some(text) = source.extract_text(page)? {
                        self.collect_text(page, &text, &mut collected);
                    }
                }
            }
        }

        let actual = collected.records.len();
        if actual == 0 {
            error!("No data extracted from the PDF. Please check the format.");
            collected.anomalies.push(Anomaly::NoRecords);
        } else if let Some(expected) = collected.expected_count {
            if expected != actual as u64 {
                warn!(
                    "Extracted {} rows but PDF indicates {} emitents. Some data may be missing.",
                    actual, expected
                );
                collected.anomalies.push(Anomaly::CountMismatch { expected, actual });
            }
        }

        debug!(
            "Extraction finished: {} records, {} anomalies",
            actual,
            collected.anomalies.len()
        );

        Ok(ExtractionResult {
            records: collected.records,
            report_date,
            date_found,
            expected_count: collected.expected_count,
            anomalies: collected.anomalies,
        })
    }

    fn find_report_date<S>(&self, source: &S) -> pdf::Result<Option<String>>
    where
        S: PageSource + ?Sized,
    {
        for page in 1..=source.page_count() {
            let Some(text) = source.extract_text(page)? else {
                continue;
            };
            if !text.contains(HEADER_TEXT) {
                continue;
            }
            if let Some(date) = extract_report_date(Some(&text)) {
                return Ok(Some(date));
            }
        }
        Ok(None)
    }

    fn collect_table(&self, page: u32, table: &Table, collected: &mut Collected) {
        for (i, row) in table.iter().enumerate() {
            if row.is_empty() {
                continue;
            }

            // Skip the header row if detected
            if i == 0 && is_header_row(row) {
                continue;
            }

            let row_text = join_cells(row);
            if collected.capture_count(&row_text) {
                continue;
            }

            match parse_line(&row_text) {
                Ok(record) => collected.records.push(record),
                Err(e) => {
                    warn!("Failed to parse row on page {} ({}): {}", page, e, row_text);
                    collected.anomalies.push(Anomaly::RowRejected {
                        page,
                        text: row_text,
                    });
                }
            }
        }
    }

    fn collect_text(&self, page: u32, text: &str, collected: &mut Collected) {
        for line in text.split('\n') {
            if TEXT_SKIP_MARKERS.iter().any(|m| line.contains(m)) {
                continue;
            }
            if collected.capture_count(line) {
                continue;
            }

            match parse_line(line) {
                Ok(record) => collected.records.push(record),
                Err(e) => debug!("Ignoring text line on page {}: {}", page, e),
            }
        }
    }

    fn fallback_date(&self) -> String {
        let date = self
            .fallback_date
            .unwrap_or_else(|| Local::now().date_naive());
        format_report_date(date)
    }
}

fn is_header_row(row: &[Option<String>]) -> bool {
    let first = row.first().and_then(|c| c.as_deref()).unwrap_or("");
    TABLE_HEADER_TOKENS.iter().any(|t| first.contains(t))
}
