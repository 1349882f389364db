use crate::extraction::PageContent;
use crate::model::Remarks;
use regex::Regex;
use std::sync::LazyLock;

const PRELIMINARY_START: &str = "Vorbemerkungen :";
const PRELIMINARY_END: &str = "AUSSCHREIBUNG";
const CLOSING_START: &str = "Schlussbemerkungen";
const CLOSING_END: &str = "Ort, Datum";

static PAGE_COUNTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Seite:\s*\d+").unwrap());

static TABLE_CAPTION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)Position\s+Menge/Einheit\s+EP\s*\([A-Z]{3}\)\s+GP\s*\([A-Z]{3}\)").unwrap()
});

/// Extract preliminary and closing remarks from the whole document.
///
/// `header_text` is the page header repeated on every page; it is cut out
/// of the remarks together with page counters and table captions.
pub fn extract_remarks(pages: &[PageContent], header_text: Option<&str>) -> Remarks {
    let text = full_text(pages);
    let extract = |start: &str, end: &str| {
        text_between(&text, start, end).and_then(|s| clean_remark(&s, header_text))
    };
    Remarks {
        preliminary: extract(PRELIMINARY_START, PRELIMINARY_END),
        closing: extract(CLOSING_START, CLOSING_END),
    }
}

/// All page text joined with single spaces.
fn full_text(pages: &[PageContent]) -> String {
    pages
        .iter()
        .flat_map(|p| p.lines.iter())
        .flat_map(|l| l.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Text after the first `start` keyword up to the next `end` keyword.
fn text_between(text: &str, start: &str, end: &str) -> Option<String> {
    let pattern = format!(
        r"(?is){}\s*[:\-–]?\s*(.*?){}\b",
        regex::escape(start),
        regex::escape(end)
    );
    let re = Regex::new(&pattern).ok()?;
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
}

fn clean_remark(text: &str, header_text: Option<&str>) -> Option<String> {
    let mut cleaned = text.to_string();

    if let Some(header) = header_text.filter(|h| !h.is_empty()) {
        if let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(header))) {
            cleaned = re.replace_all(&cleaned, "").into_owned();
        }
    }
    cleaned = PAGE_COUNTER_RE.replace_all(&cleaned, "").into_owned();
    cleaned = TABLE_CAPTION_RE.replace_all(&cleaned, "").into_owned();

    let cleaned = cleaned.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
