use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum LvError {
    #[error("PDF extraction failed: {0}")]
    Extraction(String),

    #[error("pdftotext not found. Install poppler: brew install poppler (macOS) or apt install poppler-utils (Linux)")]
    PdftotextNotFound,

    #[error("pdftotext failed with exit code {code}: {stderr}")]
    PdftotextFailed { code: i32, stderr: String },

    #[error("Page {page} is out of range (valid 1–{total})")]
    PageOutOfRange { page: usize, total: usize },

    #[error("no header text found on page {page}")]
    MissingHeader { page: usize },

    #[error("position '{position}' on page {page} cannot be split into two integer levels")]
    InvalidPosition { position: String, page: usize },

    #[error("failed to load cleanup rules from {path}: {reason}")]
    RulesLoad { path: PathBuf, reason: String },

    #[error("invalid cleanup rules: {0}")]
    RulesInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
