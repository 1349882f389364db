use serde::{Deserialize, Serialize};

/// Document-family specific strings used to drop noise from extracted positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CleanupRules {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Lines starting with one of these never reach a detailed description
    /// (running totals, mail links, repeated project labels).
    #[serde(default)]
    pub description_skip_prefixes: Vec<String>,
    /// Cell values produced from garbled glyph runs; replaced by missing.
    #[serde(default)]
    pub placeholders: Vec<String>,
    /// Section hints starting with one of these are letterhead, not hints.
    #[serde(default)]
    pub letterhead_prefixes: Vec<String>,
}
