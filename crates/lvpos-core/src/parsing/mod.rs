pub mod cleanup;
pub mod lines;
pub mod number;

use crate::extraction::PageContent;
use crate::model::{Position, Quantity, SkippedLine};
use crate::rules::schema::CleanupRules;
use cleanup::DescriptionCleaner;
use lines::{
    boilerplate_prefix, match_position_start, match_quantity_unit, match_section_header,
    LineClass,
};

/// Where the assembler stands between two lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    /// Before the first section header.
    NoSection,
    /// After a section header, no position open yet.
    InSection,
    /// A position is open and collecting lines.
    InPosition,
}

type LineHandler = fn(&mut PositionAssembler, &str, usize) -> Option<LineClass>;

/// Tried in order for every line; the first handler returning `Some` consumes it.
const HANDLERS: [LineHandler; 5] = [
    PositionAssembler::on_section_header,
    PositionAssembler::on_position_start,
    PositionAssembler::on_quantity_unit,
    PositionAssembler::on_section_hint,
    PositionAssembler::on_description,
];

/// Turns the ordered line stream of one document into position records.
///
/// State carries across page boundaries, so a position opened at the bottom
/// of a page keeps collecting its quantity and description on the next one.
/// Use a fresh assembler per document.
pub struct PositionAssembler {
    cleaner: DescriptionCleaner,
    skip_prefixes: Vec<String>,
    section: Option<String>,
    pending_hint: String,
    current: Option<Position>,
    rows: Vec<Position>,
    skipped: Vec<SkippedLine>,
}

impl PositionAssembler {
    pub fn new(cleaner: DescriptionCleaner, rules: &CleanupRules) -> Self {
        PositionAssembler {
            cleaner,
            skip_prefixes: rules.description_skip_prefixes.clone(),
            section: None,
            pending_hint: String::new(),
            current: None,
            rows: Vec::new(),
            skipped: Vec::new(),
        }
    }

    pub fn state(&self) -> AssemblyState {
        match (&self.section, &self.current) {
            (_, Some(_)) => AssemblyState::InPosition,
            (Some(_), None) => AssemblyState::InSection,
            (None, None) => AssemblyState::NoSection,
        }
    }

    /// Feed every non-blank line of a page.
    pub fn feed_page(&mut self, page: &PageContent) {
        for line in &page.lines {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            self.feed_line(line, page.page_number);
        }
    }

    /// Classify one trimmed line and apply it to the state.
    pub fn feed_line(&mut self, line: &str, page: usize) -> LineClass {
        HANDLERS
            .iter()
            .find_map(|handler| handler(self, line, page))
            .unwrap_or(LineClass::Unassigned)
    }

    /// Close the open position and hand back everything collected.
    pub fn finish(mut self) -> (Vec<Position>, Vec<SkippedLine>) {
        self.finalize_current();
        (self.rows, self.skipped)
    }

    fn on_section_header(&mut self, line: &str, _page: usize) -> Option<LineClass> {
        let header = match_section_header(line)?;
        self.finalize_current();
        tracing::debug!(number = header.number, name = header.name, "section header");
        self.section = Some(header.name.to_string());
        self.pending_hint.clear();
        Some(LineClass::SectionHeader)
    }

    fn on_position_start(&mut self, line: &str, page: usize) -> Option<LineClass> {
        let start = match_position_start(line)?;
        self.finalize_current();

        let mut position = Position::new(start.id, page);
        position.section = self.section.clone();
        position.section_hint = take_non_empty(&mut self.pending_hint);
        position.main_description = Some(start.description.to_string());
        self.current = Some(position);
        Some(LineClass::PositionStart)
    }

    fn on_quantity_unit(&mut self, line: &str, _page: usize) -> Option<LineClass> {
        let current = self.current.as_mut()?;
        let qty = match_quantity_unit(line)?;
        current.quantity = Some(Quantity::Text(qty.quantity.to_string()));
        current.unit = Some(qty.unit.to_string());
        Some(LineClass::QuantityUnit)
    }

    fn on_section_hint(&mut self, line: &str, _page: usize) -> Option<LineClass> {
        if self.section.is_none() || self.current.is_some() {
            return None;
        }
        append_spaced(&mut self.pending_hint, line);
        Some(LineClass::SectionHint)
    }

    fn on_description(&mut self, line: &str, page: usize) -> Option<LineClass> {
        let Some(current) = self.current.as_mut() else {
            return Some(LineClass::Unassigned);
        };

        if let Some(prefix) = boilerplate_prefix(line, &self.skip_prefixes) {
            tracing::trace!(page, prefix, "dropped boilerplate line");
            self.skipped.push(SkippedLine {
                page,
                text: line.to_string(),
                reason: format!("starts with '{prefix}'"),
            });
            return Some(LineClass::Boilerplate);
        }

        let description = current.detailed_description.get_or_insert_with(String::new);
        append_spaced(description, line);
        Some(LineClass::Description)
    }

    fn finalize_current(&mut self) {
        let Some(mut position) = self.current.take() else {
            return;
        };

        position.detailed_description = position
            .detailed_description
            .take()
            .map(|raw| self.cleaner.clean(&raw))
            .filter(|cleaned| !cleaned.is_empty());

        tracing::trace!(
            position = %position.position,
            page = position.page,
            "finalized position"
        );
        self.rows.push(position);
    }
}

fn append_spaced(buf: &mut String, line: &str) {
    if !buf.is_empty() {
        buf.push(' ');
    }
    buf.push_str(line);
}

fn take_non_empty(buf: &mut String) -> Option<String> {
    let taken = std::mem::take(buf);
    let trimmed = taken.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::default_rules;

    fn assembler() -> PositionAssembler {
        PositionAssembler::new(DescriptionCleaner::new(None), &default_rules())
    }

    fn run(lines: &[&str]) -> Vec<Position> {
        let mut asm = assembler();
        for line in lines {
            asm.feed_line(line, 1);
        }
        asm.finish().0
    }

    #[test]
    fn test_hint_then_position_then_quantity() {
        let rows = run(&["10 Erdarbeiten", "some hint", "1...1 Aushub", "3,50 m3"]);
        assert_eq!(rows.len(), 1);
        let p = &rows[0];
        assert_eq!(p.section.as_deref(), Some("Erdarbeiten"));
        assert_eq!(p.section_hint.as_deref(), Some("some hint"));
        assert_eq!(p.position, "1...1");
        assert_eq!(p.main_description.as_deref(), Some("Aushub"));
        assert_eq!(p.quantity, Some(Quantity::Text("3,50".into())));
        assert_eq!(p.unit.as_deref(), Some("m3"));
        assert_eq!(p.detailed_description, None);
    }

    #[test]
    fn test_hint_not_accumulated_while_position_open() {
        let rows = run(&[
            "10 Erdarbeiten",
            "1...1 Aushub",
            "Boden Klasse 3-5",
            "1...2 Verfüllen",
        ]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].section_hint, None);
        assert_eq!(rows[0].detailed_description.as_deref(), Some("Boden Klasse 3-5"));
        assert_eq!(rows[1].section_hint, None);
    }

    #[test]
    fn test_hint_lines_joined_with_space() {
        let rows = run(&["2 Beton", "Alle Betone", "nach DIN 1045", "2...1 Fundament"]);
        assert_eq!(rows[0].section_hint.as_deref(), Some("Alle Betone nach DIN 1045"));
    }

    #[test]
    fn test_section_header_before_position_priority() {
        let mut asm = assembler();
        assert_eq!(asm.feed_line("12 Maurerarbeiten", 1), LineClass::SectionHeader);
        assert_eq!(asm.state(), AssemblyState::InSection);
        assert_eq!(asm.feed_line("1...2 Mauerwerk", 1), LineClass::PositionStart);
        assert_eq!(asm.state(), AssemblyState::InPosition);
        // Would also satisfy the quantity pattern, but a section header wins.
        assert_eq!(asm.feed_line("13 Putzarbeiten", 1), LineClass::SectionHeader);
        assert_eq!(asm.state(), AssemblyState::InSection);
        let (rows, _) = asm.finish();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].section.as_deref(), Some("Maurerarbeiten"));
    }

    #[test]
    fn test_states_and_unassigned_lines() {
        let mut asm = assembler();
        assert_eq!(asm.state(), AssemblyState::NoSection);
        assert_eq!(asm.feed_line("Deckblatt Bauvorhaben", 1), LineClass::Unassigned);
        assert_eq!(asm.feed_line("3,50 m3", 1), LineClass::Unassigned);
        assert_eq!(asm.state(), AssemblyState::NoSection);
        assert!(asm.finish().0.is_empty());
    }

    #[test]
    fn test_quantity_without_open_position_becomes_hint() {
        let rows = run(&["1 Erdarbeiten", "3,50 m3", "1...1 Aushub"]);
        assert_eq!(rows[0].section_hint.as_deref(), Some("3,50 m3"));
        assert_eq!(rows[0].quantity, None);
    }

    #[test]
    fn test_position_before_any_section() {
        let rows = run(&["1...1 Baustelleneinrichtung", "1,00 psch"]);
        assert_eq!(rows[0].section, None);
        assert_eq!(rows[0].unit.as_deref(), Some("psch"));
    }

    #[test]
    fn test_integer_quantity_with_word_unit_reads_as_section() {
        // "1 psch" has the shape of a section header, which is tried first.
        let rows = run(&["1...1 Baustelleneinrichtung", "1 psch"]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].quantity, None);
    }

    #[test]
    fn test_boilerplate_lines_dropped_and_recorded() {
        let mut asm = assembler();
        for line in [
            "1 Erdarbeiten",
            "1...1 Aushub",
            "Oberboden abtragen",
            "Übertrag: 1.200,00",
            "Summe 1 Erdarbeiten",
            "mailto:info@example.de",
            "Projekt: Neubau",
            "und lagern",
        ] {
            asm.feed_line(line, 3);
        }
        let (rows, skipped) = asm.finish();
        assert_eq!(
            rows[0].detailed_description.as_deref(),
            Some("Oberboden abtragen und lagern")
        );
        assert_eq!(skipped.len(), 4);
        assert!(skipped.iter().all(|s| s.page == 3));
        assert_eq!(skipped[0].reason, "starts with 'Übertrag'");
    }

    #[test]
    fn test_description_cleaned_to_none() {
        let rows = run(&[
            "1 Erdarbeiten",
            "1...1 Aushub",
            "Zwischenstand Übertrag 500,00",
            "Position Menge/Einheit EP (EUR) GP (EUR)",
        ]);
        // "Zwischenstand" survives, the carried-forward block does not.
        assert_eq!(rows[0].detailed_description.as_deref(), Some("Zwischenstand"));

        let rows = run(&["1 Erdarbeiten", "1...1 Aushub", "ÜÜbertrag EP (EUR) GP (EUR)"]);
        assert_eq!(rows[0].detailed_description, None);
    }

    #[test]
    fn test_page_continuity() {
        let mut asm = assembler();
        asm.feed_page(&PageContent::new(
            4,
            vec!["7 Dach".into(), "7...3 Dachlatten".into(), "  ".into()],
        ));
        asm.feed_page(&PageContent::new(
            5,
            vec!["Nadelholz S10".into(), "120,5 m".into()],
        ));
        let (rows, _) = asm.finish();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].page, 4);
        assert_eq!(rows[0].quantity, Some(Quantity::Text("120,5".into())));
        assert_eq!(rows[0].unit.as_deref(), Some("m"));
        assert_eq!(rows[0].detailed_description.as_deref(), Some("Nadelholz S10"));
    }

    #[test]
    fn test_each_position_emitted_once() {
        let rows = run(&[
            "1 Erdarbeiten",
            "1...1 A",
            "1...2 B",
            "2 Beton",
            "2...1 C",
        ]);
        let ids: Vec<&str> = rows.iter().map(|p| p.position.as_str()).collect();
        assert_eq!(ids, vec!["1...1", "1...2", "2...1"]);
        assert_eq!(rows[2].section.as_deref(), Some("Beton"));
    }
}
