//! Cover page, page header and remark extraction.
//!
//! The position pipeline only needs the contracting company from the first
//! page header; the rest is returned to callers as document metadata.

pub mod cover;
pub mod header;
pub mod notes;

use crate::error::LvError;
use crate::extraction::PageContent;
use crate::model::DocumentMetadata;

/// Collect cover, first-page header and remarks of a document.
pub fn document_metadata(pages: &[PageContent]) -> Result<DocumentMetadata, LvError> {
    let header = header::header_for_page(pages, 1)?;
    let cover = cover::extract_cover(&pages[0]);
    let remarks = notes::extract_remarks(pages, header.total_header_data.as_deref());

    Ok(DocumentMetadata {
        cover,
        header,
        remarks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_out_of_range() {
        let err = document_metadata(&[]).unwrap_err();
        assert!(matches!(err, LvError::PageOutOfRange { page: 1, total: 0 }));
    }

    #[test]
    fn test_document_metadata() {
        let pages = vec![PageContent::new(
            1,
            vec![
                "Bau Müller GmbH -- Hauptstraße 12 Seite: 1".into(),
                "Projekt: Neubau".into(),
                "Vorbemerkungen : Baustelle ist eingerichtet. AUSSCHREIBUNG".into(),
            ],
        )];
        let meta = document_metadata(&pages).unwrap();
        assert_eq!(meta.header.company.as_deref(), Some("Bau Müller GmbH"));
        assert_eq!(meta.cover.project.as_deref(), Some("Neubau"));
        assert_eq!(
            meta.remarks.preliminary.as_deref(),
            Some("Baustelle ist eingerichtet.")
        );
    }
}
