//! Line-level pattern matchers.
//!
//! Each matcher looks at one trimmed line in isolation. The priority in which
//! they are tried lives in [`super::PositionAssembler`].

use regex::Regex;
use std::sync::LazyLock;

static SECTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+)\s+([A-Za-zÄÖÜäöüß\s\-]+)$").unwrap());

static POSITION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+\.\.\.\d+)\s+(.*)").unwrap());

// A digit or dot run with at most one comma fraction. Space-grouped
// numbers are not matched here even though the normalizer accepts them.
static QUANTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([\d.]+(?:,\d+)?)\s+(\S+)").unwrap());

/// How a line was consumed by the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    SectionHeader,
    PositionStart,
    QuantityUnit,
    SectionHint,
    Description,
    /// Dropped by the description blocklist.
    Boilerplate,
    /// No section and no open position: nothing to attach the line to.
    Unassigned,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionHeader<'a> {
    pub number: &'a str,
    pub name: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionStart<'a> {
    pub id: &'a str,
    pub description: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantityUnit<'a> {
    pub quantity: &'a str,
    pub unit: &'a str,
}

/// `12 Maurerarbeiten`: a number followed only by letters, spaces and hyphens.
pub fn match_section_header(line: &str) -> Option<SectionHeader<'_>> {
    let caps = SECTION_RE.captures(line)?;
    Some(SectionHeader {
        number: caps.get(1)?.as_str(),
        name: caps.get(2)?.as_str().trim(),
    })
}

/// `1...2 Mauerwerk`: an ellipsis-joined id followed by the main description.
pub fn match_position_start(line: &str) -> Option<PositionStart<'_>> {
    let caps = POSITION_RE.captures(line)?;
    Some(PositionStart {
        id: caps.get(1)?.as_str(),
        description: caps.get(2)?.as_str().trim(),
    })
}

/// `3,50 m3`: a quantity token followed by a unit token.
pub fn match_quantity_unit(line: &str) -> Option<QuantityUnit<'_>> {
    let caps = QUANTITY_RE.captures(line)?;
    Some(QuantityUnit {
        quantity: caps.get(1)?.as_str(),
        unit: caps.get(2)?.as_str(),
    })
}

/// Return the blocklist prefix the line starts with, if any.
pub fn boilerplate_prefix<'p>(line: &str, prefixes: &'p [String]) -> Option<&'p str> {
    prefixes
        .iter()
        .find(|p| line.starts_with(p.as_str()))
        .map(|p| p.as_str())
}
