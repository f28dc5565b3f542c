//! Report date and footer count extraction.

use chrono::NaiveDate;

use super::patterns::{EMITENT_COUNT, REPORT_DATE};

/// Format of report dates and output file stems.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Extract the `DD-MM-YYYY` report date following "към дата:".
pub fn extract_report_date(text: Option<&str>) -> Option<String> {
    let text = text?;
    if text.is_empty() {
        return None;
    }

    REPORT_DATE
        .captures(text)
        .map(|caps| caps[1].to_string())
}

/// Extract the declared number of issuers from a footer line.
pub fn extract_emitent_count(line: &str) -> Option<u64> {
    EMITENT_COUNT
        .captures(line)
        .and_then(|caps| caps[1].parse().ok())
}

/// Format a date the way report dates are printed.
pub fn format_report_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
