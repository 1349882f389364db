use lvpos_core::error::LvError;
use lvpos_core::extraction::pdftotext::PdftotextExtractor;
use std::path::PathBuf;

use crate::output;

pub fn run(
    pdf_file: PathBuf,
    output_format: &str,
    output_file: Option<PathBuf>,
    rules_file: Option<PathBuf>,
    preset: Option<String>,
) -> Result<(), LvError> {
    let rules = lvpos_core::rules::select_rules(rules_file.as_deref(), preset.as_deref())?;

    let pdf_bytes = std::fs::read(&pdf_file)?;
    let extractor = PdftotextExtractor::new();
    let table = lvpos_core::extract_positions(&pdf_bytes, &extractor, &rules)?;

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            let json = serde_json::to_string_pretty(&table)?;
            std::fs::write(&path, json)?;
            eprintln!(
                "Extracted {} position(s), written to {}",
                table.rows.len(),
                path.display()
            );
            if !table.skipped_lines.is_empty() {
                eprintln!(
                    "  {} boilerplate line(s) dropped",
                    table.skipped_lines.len()
                );
            }
        }
        None => match output_format {
            "json" => output::json::print(&table)?,
            _ => println!("{}", output::table::format_positions(&table)),
        },
    }

    Ok(())
}
