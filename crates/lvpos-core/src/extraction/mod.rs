pub mod pdftotext;

use crate::error::LvError;

/// Content extracted from a single page of a PDF.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 1-based page number.
    pub page_number: usize,
    /// Text lines in reading order.
    pub lines: Vec<String>,
    /// Optional grid of table cells (rows of cells) detected on the page.
    /// Only the first cell is consulted, as the boxed page header.
    pub header_table: Option<Vec<Vec<String>>>,
}

impl PageContent {
    pub fn new(page_number: usize, lines: Vec<String>) -> Self {
        PageContent {
            page_number,
            lines,
            header_table: None,
        }
    }

    /// Text of the first cell of the header table, if any.
    pub fn header_cell(&self) -> Option<&str> {
        self.header_table
            .as_ref()?
            .first()?
            .first()
            .map(|s| s.as_str())
            .filter(|s| !s.trim().is_empty())
    }
}

/// Trait for PDF text extraction backends.
pub trait PdfExtractor: Send + Sync {
    /// Extract text content from PDF bytes, returning one PageContent per page.
    fn extract_pages(&self, pdf_bytes: &[u8]) -> Result<Vec<PageContent>, LvError>;

    /// Name of this extraction backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
