use crate::error::LvError;
use crate::extraction::PageContent;
use crate::model::HeaderMetadata;
use regex::Regex;
use std::sync::LazyLock;

/// Number of leading text lines treated as the header when the page has no
/// header table.
const HEADER_LINES: usize = 6;

static PART_SEPARATOR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s*--\s*").unwrap());

static CITY_TAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(Tel\.?:.*|Fax\.?:.*|E-?mail:.*)").unwrap());

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"Tel\.?:\s*([+\d\s/()-]+)").unwrap());

static FAX_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"Fax\.?:\s*([+\d\s/()-]+)").unwrap());

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"([\w.-]+@[\w.-]+)").unwrap());

static PROJECT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Projekt\s*:\s*(.+?)(?:\s+(\d{1,2}[./-]\d{1,2}[./-]\d{2,4}))?(?:\s+LV:|$)").unwrap()
});

static LV_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)LV\s*:\s*(.*?)\s*(?:Seite\b|$)").unwrap());

/// Header of page `page_number` (1-based).
///
/// Asking for a page outside the document is an error. A page whose header
/// cannot be read degrades to an empty header with a warning.
pub fn header_for_page(pages: &[PageContent], page_number: usize) -> Result<HeaderMetadata, LvError> {
    if page_number == 0 || page_number > pages.len() {
        return Err(LvError::PageOutOfRange {
            page: page_number,
            total: pages.len(),
        });
    }
    Ok(extract_header(&pages[page_number - 1]))
}

/// Headers of all pages that carry one, keyed by page number.
pub fn all_headers(pages: &[PageContent]) -> Vec<(usize, HeaderMetadata)> {
    pages
        .iter()
        .map(|page| (page.page_number, extract_header(page)))
        .filter(|(_, header)| !header.is_empty())
        .collect()
}

/// Parse the header of a single page, logging and swallowing failures.
pub fn extract_header(page: &PageContent) -> HeaderMetadata {
    match try_extract_header(page) {
        Ok(header) => header,
        Err(e) => {
            tracing::warn!(page = page.page_number, error = %e, "header extraction failed");
            HeaderMetadata::default()
        }
    }
}

/// Parse the header of a single page.
pub fn try_extract_header(page: &PageContent) -> Result<HeaderMetadata, LvError> {
    let text = header_text(page).ok_or(LvError::MissingHeader {
        page: page.page_number,
    })?;
    Ok(parse_header_text(&text))
}

/// Raw header text: the first header table cell, else the first lines.
fn header_text(page: &PageContent) -> Option<String> {
    if let Some(cell) = page.header_cell() {
        return Some(cell.to_string());
    }
    let lines: Vec<&str> = page.lines.iter().take(HEADER_LINES).map(|s| s.as_str()).collect();
    let text = lines.join("\n");
    if text.trim().is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Parse a header such as
/// `Firma -- Straße 1 -- 12345 Ort Tel.: 0123/456 ... Projekt: Neubau 01.02.2024 LV: 001 Seite: 2`.
pub fn parse_header_text(raw: &str) -> HeaderMetadata {
    let mut header = HeaderMetadata::default();

    let before_page = raw.split("Seite").next().unwrap_or_default();
    header.total_header_data = non_empty(normalize_ws(before_page));

    let text = normalize_ws(raw);
    let parts: Vec<&str> = PART_SEPARATOR_RE
        .split(&text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    header.company = parts.first().and_then(|p| non_empty(p.to_string()));
    header.street = parts.get(1).and_then(|p| non_empty(p.to_string()));
    header.city = parts
        .get(2)
        .and_then(|p| non_empty(CITY_TAIL_RE.replace(p, "").trim().to_string()));

    for part in &parts {
        let lower = part.to_lowercase();
        if lower.contains("tel") {
            if let Some(phone) = first_group(&PHONE_RE, part) {
                header.phone = Some(phone);
            }
        }
        if lower.contains("fax") {
            if let Some(fax) = first_group(&FAX_RE, part) {
                header.fax = Some(fax);
            }
        }
        if part.contains('@') {
            if let Some(email) = first_group(&EMAIL_RE, part) {
                header.email = Some(email);
            }
        }
    }

    if let Some(caps) = PROJECT_RE.captures(&text) {
        header.project_name = caps.get(1).and_then(|m| non_empty(m.as_str().trim().to_string()));
        header.date = caps.get(2).map(|m| m.as_str().trim().to_string());
    }

    header.lv = first_group(&LV_RE, &text);

    header
}

fn first_group(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| non_empty(m.as_str().trim().to_string()))
}

fn normalize_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
