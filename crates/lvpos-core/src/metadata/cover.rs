use crate::extraction::PageContent;
use crate::model::CoverMetadata;
use regex::Regex;
use std::sync::LazyLock;

// The submission block runs across lines up to the document title.
static SUBMISSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?si)Angebotsabgabe\s*:\s*(.*?)\s*(ANGEBOT)\b").unwrap());

static LV_PAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(.*?)\s+Seite:").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CoverField {
    Project,
    Client,
    PermitPlanning,
    ExecutionPlanning,
    SiteManagement,
    ExecutionPeriod,
    ExecutionStart,
    OfferNet,
    Vat,
    OfferGross,
    Bidder,
    Lv,
}

/// Labels in matching order; the first label a line starts with wins.
const LABELS: &[(&str, CoverField)] = &[
    ("Projekt", CoverField::Project),
    ("Bauherr", CoverField::Client),
    ("Bauantragsplanung", CoverField::PermitPlanning),
    ("Ausführungsplanung", CoverField::ExecutionPlanning),
    ("Bauleitung", CoverField::SiteManagement),
    ("Ausführungszeitraum", CoverField::ExecutionPeriod),
    ("Ausführungsbeginn", CoverField::ExecutionStart),
    ("Angebotssumme Netto", CoverField::OfferNet),
    ("Mehrwertsteuer (19 %)", CoverField::Vat),
    ("Angebotssumme Brutto", CoverField::OfferGross),
    ("Bieter", CoverField::Bidder),
    ("LV", CoverField::Lv),
];

impl CoverField {
    /// Fields whose value continues on following unlabeled lines.
    fn is_multiline(self) -> bool {
        matches!(self, CoverField::ExecutionPeriod)
    }

    fn slot(self, meta: &mut CoverMetadata) -> &mut Option<String> {
        match self {
            CoverField::Project => &mut meta.project,
            CoverField::Client => &mut meta.client,
            CoverField::PermitPlanning => &mut meta.permit_planning,
            CoverField::ExecutionPlanning => &mut meta.execution_planning,
            CoverField::SiteManagement => &mut meta.site_management,
            CoverField::ExecutionPeriod => &mut meta.execution_period,
            CoverField::ExecutionStart => &mut meta.execution_start,
            CoverField::OfferNet => &mut meta.offer_net,
            CoverField::Vat => &mut meta.vat,
            CoverField::OfferGross => &mut meta.offer_gross,
            CoverField::Bidder => &mut meta.bidder,
            CoverField::Lv => &mut meta.lv,
        }
    }
}

/// Extract the administrative fields of the cover page.
pub fn extract_cover(page: &PageContent) -> CoverMetadata {
    let mut meta = CoverMetadata::default();
    let mut text = page.lines.join("\n");

    let submission = SUBMISSION_RE.captures(&text).map(|caps| {
        let value = caps
            .get(1)
            .map(|m| {
                m.as_str()
                    .lines()
                    .map(str::trim)
                    .filter(|l| !l.is_empty())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();
        let start = caps.get(0).map_or(0, |m| m.start());
        let end = caps.get(2).map_or(start, |m| m.start());
        (value, start..end)
    });

    if let Some((value, span)) = submission {
        meta.submission = if value.is_empty() { None } else { Some(value) };
        // Cut the block but keep the title for the line pass.
        text.replace_range(span, "");
    }

    let mut current: Option<CoverField> = None;
    for line in text.lines() {
        let line = line.trim();

        if let Some((field, value)) = match_label(line) {
            let value = if field == CoverField::Lv {
                cut_page_counter(value)
            } else {
                value
            };
            *field.slot(&mut meta) = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
            current = Some(field);
            continue;
        }

        if let Some(field) = current.filter(|f| f.is_multiline()) {
            if !line.is_empty() && !line.starts_with("Angebotsabgabe") {
                let slot = field.slot(&mut meta);
                match slot {
                    Some(existing) => {
                        existing.push(' ');
                        existing.push_str(line);
                    }
                    None => *slot = Some(line.to_string()),
                }
            }
        }
    }

    meta
}

/// Match `Label: value` (whitespace allowed before the colon).
fn match_label(line: &str) -> Option<(CoverField, &str)> {
    LABELS
        .iter()
        .find_map(|(label, field)| strip_label(line, label).map(|v| (*field, v)))
}

fn strip_label<'a>(line: &'a str, label: &str) -> Option<&'a str> {
    let rest = line.strip_prefix(label)?.trim_start();
    let value = rest.strip_prefix(':')?;
    Some(value.trim())
}

fn cut_page_counter(value: &str) -> &str {
    LV_PAGE_RE
        .captures(value)
        .and_then(|caps| caps.get(1))
        .map_or(value, |m| m.as_str().trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn cover(lines: &[&str]) -> CoverMetadata {
        extract_cover(&PageContent::new(
            1,
            lines.iter().map(|s| s.to_string()).collect(),
        ))
    }

    #[test]
    fn test_basic_fields() {
        let meta = cover(&[
            "Projekt: Neubau Kita Sonnenschein",
            "Bauherr : Stadt Musterhausen",
            "Bauleitung: Ingenieurbüro Wagner und Koll",
            "Bieter:",
            "Angebotssumme Netto: 12.345,67 EUR",
            "Mehrwertsteuer (19 %): 2.345,68 EUR",
            "Angebotssumme Brutto: 14.691,35 EUR",
        ]);
        assert_eq!(meta.project.as_deref(), Some("Neubau Kita Sonnenschein"));
        assert_eq!(meta.client.as_deref(), Some("Stadt Musterhausen"));
        assert_eq!(meta.site_management.as_deref(), Some("Ingenieurbüro Wagner und Koll"));
        assert_eq!(meta.bidder, None);
        assert_eq!(meta.net_total(), Some(dec!(12345.67)));
        assert_eq!(meta.vat_amount(), Some(dec!(2345.68)));
        assert_eq!(meta.gross_total(), Some(dec!(14691.35)));
    }

    #[test]
    fn test_lv_cut_before_page_counter() {
        let meta = cover(&["LV: 003 Rohbau Seite: 1"]);
        assert_eq!(meta.lv.as_deref(), Some("003 Rohbau"));
    }

    #[test]
    fn test_execution_period_multiline() {
        let meta = cover(&[
            "Ausführungszeitraum: 01.03.2024",
            "bis 30.09.2024",
            "",
            "in zwei Bauabschnitten",
            "Ausführungsbeginn: 01.03.2024",
            "nicht angehängt",
        ]);
        assert_eq!(
            meta.execution_period.as_deref(),
            Some("01.03.2024 bis 30.09.2024 in zwei Bauabschnitten")
        );
        assert_eq!(meta.execution_start.as_deref(), Some("01.03.2024"));
    }

    #[test]
    fn test_submission_block_up_to_title() {
        let meta = cover(&[
            "Projekt: Sporthalle",
            "Angebotsabgabe: 15.04.2024, 10:00 Uhr",
            "  Rathaus, Zimmer 12  ",
            "ANGEBOT",
            "Bieter: Bau Müller GmbH",
        ]);
        assert_eq!(
            meta.submission.as_deref(),
            Some("15.04.2024, 10:00 Uhr Rathaus, Zimmer 12")
        );
        assert_eq!(meta.project.as_deref(), Some("Sporthalle"));
        assert_eq!(meta.bidder.as_deref(), Some("Bau Müller GmbH"));
    }

    #[test]
    fn test_label_requires_colon() {
        let meta = cover(&["Projektleitung Herr Maier", "Bauherrin: Frau Schulz"]);
        assert_eq!(meta.project, None);
        assert_eq!(meta.client, None);
    }

    #[test]
    fn test_empty_page() {
        assert_eq!(cover(&[]), CoverMetadata::default());
    }
}
