//! PDF decoding: per-page text and table access.

mod extractor;
#[cfg(test)]
pub(crate) mod fixtures;
mod table;

pub use extractor::{PdfDecoder, PdfDocument};
pub use table::TableFinder;

use std::path::Path;

use crate::error::PdfError;

/// Ordered rows of possibly-null cell strings.
pub type Table = Vec<Vec<Option<String>>>;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Per-page access to a decoded document.
///
/// Pages are numbered from 1.
pub trait PageSource {
    /// Get the number of pages.
    fn page_count(&self) -> u32;

    /// Plain text of a page, `None` when the page has no text layer.
    fn extract_text(&self, page: u32) -> Result<Option<String>>;

    /// Table detected on a page, `None` when detection failed.
    fn extract_table(&self, page: u32) -> Result<Option<Table>>;
}

/// Opens documents from disk.
pub trait DocumentDecoder {
    /// The decoded document type.
    type Document: PageSource;

    /// Open and decode a document.
    fn open(&self, path: &Path) -> Result<Self::Document>;
}

/// A page whose text and table are already known.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    /// Plain text of the page.
    pub text: Option<String>,
    /// Table detected on the page.
    pub table: Option<Table>,
}

impl Page {
    /// A page with text only; table detection failed.
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            table: None,
        }
    }

    /// A page with both a text layer and a detected table.
    pub fn with_table(text: impl Into<String>, table: Table) -> Self {
        Self {
            text: Some(text.into()),
            table: Some(table),
        }
    }
}

impl PageSource for [Page] {
    fn page_count(&self) -> u32 {
        self.len() as u32
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        Ok(page_at(self, page)?.text.clone())
    }

    fn extract_table(&self, page: u32) -> Result<Option<Table>> {
        Ok(page_at(self, page)?.table.clone())
    }
}

impl PageSource for Vec<Page> {
    fn page_count(&self) -> u32 {
        self.as_slice().page_count()
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        self.as_slice().extract_text(page)
    }

    fn extract_table(&self, page: u32) -> Result<Option<Table>> {
        self.as_slice().extract_table(page)
    }
}

fn page_at(pages: &[Page], page: u32) -> Result<&Page> {
    page.checked_sub(1)
        .and_then(|idx| pages.get(idx as usize))
        .ok_or(PdfError::InvalidPage(page))
}
