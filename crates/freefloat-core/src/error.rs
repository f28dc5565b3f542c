//! Error types for the freefloat-core library.

use thiserror::Error;

/// Main error type for the freefloat library.
#[derive(Error, Debug)]
pub enum FreeFloatError {
    /// PDF decoding error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF decoding.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from a page.
    #[error("failed to extract text from page {page}: {reason}")]
    TextExtraction { page: u32, reason: String },

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),

    /// Failed to read the file.
    #[error("failed to read PDF: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while turning a text line into a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    /// The candidate line was empty or whitespace only.
    #[error("empty row")]
    EmptyRow,

    /// The reconstructed line does not match the record grammar.
    #[error("unexpected row format: {text}")]
    RowRejected { text: String },

    /// A numeric field could not be represented.
    #[error("failed to parse {field}: {value}")]
    Parse { field: String, value: String },
}

/// Errors related to writing CSV/XLSX output.
#[derive(Error, Debug)]
pub enum OutputError {
    /// CSV serialization failed.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// XLSX serialization failed.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Refusing to write an empty record set.
    #[error("no records to write")]
    Empty,
}

/// Errors related to the per-document error log.
#[derive(Error, Debug)]
pub enum LogError {
    /// Another document's scope is still attached.
    #[error("error log scope already open for {0}")]
    ScopeBusy(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the freefloat library.
pub type Result<T> = std::result::Result<T, FreeFloatError>;
