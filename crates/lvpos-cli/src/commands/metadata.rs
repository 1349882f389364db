use lvpos_core::error::LvError;
use lvpos_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(pdf_file: PathBuf, output_format: &str) -> Result<(), LvError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let meta = lvpos_core::extract_metadata(&pdf_bytes, &extractor)?;

    match output_format {
        "json" => output::json::print(&meta)?,
        _ => println!("{}", output::table::format_metadata(&meta)),
    }
    Ok(())
}

pub fn header(pdf_file: PathBuf, page: usize, output_format: &str) -> Result<(), LvError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let header = lvpos_core::extract_page_header(&pdf_bytes, &extractor, page)?;

    match output_format {
        "json" => output::json::print(&header)?,
        _ => println!("{}", output::table::format_header(&header)),
    }
    Ok(())
}

pub fn all_headers(pdf_file: PathBuf, output_format: &str) -> Result<(), LvError> {
    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let headers = lvpos_core::extract_all_headers(&pdf_bytes, &extractor)?;

    match output_format {
        "json" => output::json::print(&headers)?,
        _ => println!("{}", output::table::format_all_headers(&headers)),
    }
    Ok(())
}
