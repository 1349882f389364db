use crate::parsing::number::parse_amount;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity of a position: the raw text as read from the line, or the
/// coerced number after post-processing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(v) => write!(f, "{v}"),
            Quantity::Text(s) => write!(f, "{s}"),
        }
    }
}

/// One line-item of the bill of quantities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub section: Option<String>,
    pub section_hint: Option<String>,
    /// Composite identifier such as `3...12`.
    pub position: String,
    pub main_description: Option<String>,
    pub detailed_description: Option<String>,
    pub quantity: Option<Quantity>,
    pub unit: Option<String>,
    /// 1-based page of the line that opened the position.
    pub page: usize,
    pub position_level_1: Option<i32>,
    pub position_level_2: Option<i32>,
}

impl Position {
    pub fn new(position: impl Into<String>, page: usize) -> Self {
        Position {
            section: None,
            section_hint: None,
            position: position.into(),
            main_description: None,
            detailed_description: None,
            quantity: None,
            unit: None,
            page,
            position_level_1: None,
            position_level_2: None,
        }
    }
}

/// A line dropped by the description blocklist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkippedLine {
    pub page: usize,
    pub text: String,
    pub reason: String,
}

/// Result of a position extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionTable {
    pub rows: Vec<Position>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_lines: Vec<SkippedLine>,
}

/// Fields parsed from the repeating page header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderMetadata {
    /// Normalized header text up to the page counter, used to strip
    /// repeated headers from running text.
    pub total_header_data: Option<String>,
    /// Contracting company (`Unternehmen`).
    pub company: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub fax: Option<String>,
    pub email: Option<String>,
    pub project_name: Option<String>,
    pub date: Option<String>,
    pub lv: Option<String>,
}

impl HeaderMetadata {
    pub fn is_empty(&self) -> bool {
        *self == HeaderMetadata::default()
    }
}

/// Administrative fields from the cover page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverMetadata {
    /// `Projekt`
    pub project: Option<String>,
    /// `Bauherr`
    pub client: Option<String>,
    /// `Bauantragsplanung`
    pub permit_planning: Option<String>,
    /// `Ausführungsplanung`
    pub execution_planning: Option<String>,
    /// `Bauleitung`
    pub site_management: Option<String>,
    /// `Ausführungszeitraum`, may span several lines.
    pub execution_period: Option<String>,
    /// `Ausführungsbeginn`
    pub execution_start: Option<String>,
    /// `Angebotssumme Netto`
    pub offer_net: Option<String>,
    /// `Mehrwertsteuer (19 %)`
    pub vat: Option<String>,
    /// `Angebotssumme Brutto`
    pub offer_gross: Option<String>,
    /// `Angebotsabgabe`, the submission block up to the `ANGEBOT` title.
    pub submission: Option<String>,
    /// `Bieter`
    pub bidder: Option<String>,
    /// `LV`
    pub lv: Option<String>,
}

impl CoverMetadata {
    pub fn net_total(&self) -> Option<Decimal> {
        self.offer_net.as_deref().and_then(parse_amount)
    }

    pub fn vat_amount(&self) -> Option<Decimal> {
        self.vat.as_deref().and_then(parse_amount)
    }

    pub fn gross_total(&self) -> Option<Decimal> {
        self.offer_gross.as_deref().and_then(parse_amount)
    }
}

/// Preliminary and closing remarks of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remarks {
    /// `Vorbemerkungen`
    pub preliminary: Option<String>,
    /// `Schlussbemerkungen`
    pub closing: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    pub cover: CoverMetadata,
    /// Header of the first page.
    pub header: HeaderMetadata,
    pub remarks: Remarks,
}
