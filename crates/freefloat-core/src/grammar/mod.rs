//! Record grammar for the free float table.
//!
//! Turns one reconstructed text line into a validated [`Record`](crate::Record)
//! and recognises the report date and the footer issuer count.

pub mod dates;
pub mod patterns;
pub mod row;

pub use dates::{extract_emitent_count, extract_report_date, format_report_date, DATE_FORMAT};
pub use patterns::{EMISSION_CODE_MARKER, HEADER_TEXT, TABLE_HEADER_TOKENS, TEXT_SKIP_MARKERS};
pub use row::{join_cells, parse_line, reconstruct_line};
