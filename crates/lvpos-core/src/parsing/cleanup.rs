use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// Two-column currency caption that closes every page footer.
const PRICE_FOOTER: &str = r"EP\s*\(EUR\)\s*GP\s*\(EUR\)";

/// Caption of the signature field on the closing page.
const SIGNATURE_CAPTION: &str = "Firmenstempel, rechtsverbindliche Unterschrift";

/// Compiled size limit for one company block pattern (the regex default).
const COMPANY_PATTERN_SIZE_LIMIT: usize = 10 * (1 << 20);

// Letters may be doubled by the text layer ("Üübbertrag").
static CARRY_OVER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?is)Ü+\s*b+e+r+t+r+a+g+:*.*?{PRICE_FOOTER}")).unwrap()
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Strips recurring page furniture out of accumulated description text.
#[derive(Debug, Clone, Default)]
pub struct DescriptionCleaner {
    company_blocks: Vec<Regex>,
}

impl DescriptionCleaner {
    /// Build a cleaner for a document issued by `company`.
    ///
    /// Without a company name only the carried-forward block is removed.
    pub fn new(company: Option<&str>) -> Self {
        Self::with_size_limit(company, COMPANY_PATTERN_SIZE_LIMIT)
    }

    fn with_size_limit(company: Option<&str>, size_limit: usize) -> Self {
        let Some(name) = company else {
            return DescriptionCleaner::default();
        };
        let Some(pattern) = company_pattern(name) else {
            return DescriptionCleaner::default();
        };

        let company_blocks = [PRICE_FOOTER.to_string(), regex::escape(SIGNATURE_CAPTION)]
            .iter()
            .filter_map(|end| {
                RegexBuilder::new(&format!("(?is){pattern}.*?{end}"))
                    .size_limit(size_limit)
                    .build()
                    .map_err(|e| {
                        tracing::warn!(company = name, error = %e, "company block pattern dropped");
                    })
                    .ok()
            })
            .collect();

        DescriptionCleaner { company_blocks }
    }

    /// Remove boilerplate blocks and collapse whitespace.
    pub fn clean(&self, text: &str) -> String {
        let mut s = CARRY_OVER_RE.replace_all(text, " ").into_owned();
        for re in &self.company_blocks {
            s = re.replace_all(&s, " ").into_owned();
        }
        WHITESPACE_RE.replace_all(&s, " ").trim().to_string()
    }
}

/// Company name as a pattern where any gap between words may be any
/// whitespace run, including none.
fn company_pattern(company: &str) -> Option<String> {
    let words: Vec<String> = company.split_whitespace().map(regex::escape).collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(r"\s*"))
    }
}
