//! Regex patterns and fixed phrases of the Central Depository free float report.

use lazy_static::lazy_static;
use regex::Regex;

/// Country prefix that starts every emission code.
pub const EMISSION_CODE_MARKER: &str = "BG";

/// Report title line carrying the report date.
///
/// The source documents spell "флoут" with a Latin `o`; keep it byte-exact.
pub const HEADER_TEXT: &str =
    "Фрий флoут на публичните дружества регистрирани в Централен Депозитар към дата:";

/// Tokens identifying the table header row.
pub const TABLE_HEADER_TOKENS: [&str; 2] = ["Емитент", "Емисия"];

/// Lines containing any of these are never data rows in the text fallback.
pub const TEXT_SKIP_MARKERS: [&str; 4] = ["Емитент", "Емисия", "Фрий флoут", "към дата"];

lazy_static! {
    // Company, emission code and the three integer columns
    pub static ref ROW_PATTERN: Regex = Regex::new(
        r"^(?P<company>.+?)\s+(?P<emission_code>BG\S+)\s+(?P<total_shares>[0-9]+)\s+(?P<free_float>[0-9]+)\s+(?P<shareholders>[0-9]+)$"
    ).unwrap();

    // "към дата: 31-12-2024"
    pub static ref REPORT_DATE: Regex = Regex::new(
        r"към дата:\s*([0-9]{2}-[0-9]{2}-[0-9]{4})"
    ).unwrap();

    // Footer: "245 Брой емитенти"
    pub static ref EMITENT_COUNT: Regex = Regex::new(
        r"([0-9]+)\s+Брой\s+емитенти"
    ).unwrap();
}
