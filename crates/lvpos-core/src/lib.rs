pub mod error;
pub mod extraction;
pub mod metadata;
pub mod model;
pub mod parsing;
pub mod postprocess;
pub mod rules;

use error::LvError;
use extraction::{PageContent, PdfExtractor};
use model::{DocumentMetadata, HeaderMetadata, PositionTable};
use parsing::cleanup::DescriptionCleaner;
use parsing::PositionAssembler;
use rules::schema::CleanupRules;

/// Main API entry point: extract the position table of an LV PDF.
///
/// The contracting company is read from the first page header and used to
/// strip letterhead and signature blocks out of descriptions.
pub fn extract_positions(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    rules: &CleanupRules,
) -> Result<PositionTable, LvError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    let header = metadata::header::header_for_page(&pages, 1)?;
    if header.company.is_none() {
        tracing::debug!("no company in first page header, company blocks are kept");
    }
    positions_from_pages(&pages, header.company.as_deref(), rules)
}

/// Run the position pipeline over already extracted pages.
pub fn positions_from_pages(
    pages: &[PageContent],
    company: Option<&str>,
    rules: &CleanupRules,
) -> Result<PositionTable, LvError> {
    let mut assembler = PositionAssembler::new(DescriptionCleaner::new(company), rules);
    for page in pages {
        assembler.feed_page(page);
    }
    let (mut rows, skipped_lines) = assembler.finish();

    postprocess::run(&mut rows, rules)?;

    tracing::info!(
        pages = pages.len(),
        positions = rows.len(),
        skipped = skipped_lines.len(),
        "extracted positions"
    );

    Ok(PositionTable {
        rows,
        skipped_lines,
    })
}

/// Extract cover, header and remark metadata of an LV PDF.
pub fn extract_metadata(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<DocumentMetadata, LvError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    metadata::document_metadata(&pages)
}

/// Extract the header of one page (1-based) of an LV PDF.
pub fn extract_page_header(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
    page_number: usize,
) -> Result<HeaderMetadata, LvError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    metadata::header::header_for_page(&pages, page_number)
}

/// Extract the header of every page that carries one, tagged with its
/// 1-based page number.
pub fn extract_all_headers(
    pdf_bytes: &[u8],
    extractor: &dyn PdfExtractor,
) -> Result<Vec<(usize, HeaderMetadata)>, LvError> {
    let pages = extractor.extract_pages(pdf_bytes)?;
    Ok(metadata::header::all_headers(&pages))
}
