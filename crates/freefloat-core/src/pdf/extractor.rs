//! PDF page decoding.
//!
//! lopdf validates the file and removes empty-password encryption;
//! pdf-extract lays out the text of every page, keeping cells of one table
//! row on one line.

use std::fs;
use std::path::Path;

use lopdf::Document;
use tracing::{debug, trace};

use super::{DocumentDecoder, PageSource, Result, Table, TableFinder};
use crate::error::PdfError;

/// Decoder producing [`PdfDocument`]s from files on disk.
#[derive(Debug, Clone, Default)]
pub struct PdfDecoder {
    table_finder: TableFinder,
}

impl PdfDecoder {
    /// Create a new PDF decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a PDF held in memory.
    pub fn load(&self, data: &[u8]) -> Result<PdfDocument> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        // Handle PDFs with empty password encryption
        let texts = if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            let mut decrypted = Vec::new();
            doc.save_to(&mut decrypted)
                .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
            layout_pages(&decrypted)?
        } else {
            layout_pages(data)?
        };

        debug!("Loaded PDF with {} pages", texts.len());
        Ok(PdfDocument {
            pages: texts,
            table_finder: self.table_finder.clone(),
        })
    }
}

fn layout_pages(data: &[u8]) -> Result<Vec<String>> {
    let texts = pdf_extract::extract_text_from_mem_by_pages(data)
        .map_err(|e| PdfError::Parse(format!("failed to lay out page text: {}", e)))?;

    if texts.is_empty() {
        return Err(PdfError::NoPages);
    }
    Ok(texts)
}

impl DocumentDecoder for PdfDecoder {
    type Document = PdfDocument;

    fn open(&self, path: &Path) -> Result<PdfDocument> {
        let data = fs::read(path)?;
        self.load(&data)
    }
}

/// A decoded PDF document.
///
/// Page text is laid out once on load; tables are detected from it on demand.
pub struct PdfDocument {
    pages: Vec<String>,
    table_finder: TableFinder,
}

impl PdfDocument {
    fn page_text(&self, page: u32) -> Result<&str> {
        page.checked_sub(1)
            .and_then(|idx| self.pages.get(idx as usize))
            .map(String::as_str)
            .ok_or(PdfError::InvalidPage(page))
    }
}

impl PageSource for PdfDocument {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn extract_text(&self, page: u32) -> Result<Option<String>> {
        let text = self.page_text(page)?;
        trace!("Page {} yielded {} chars of text", page, text.len());

        if text.trim().is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }

    fn extract_table(&self, page: u32) -> Result<Option<Table>> {
        Ok(self.table_finder.find(self.page_text(page)?))
    }
}
