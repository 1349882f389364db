pub mod builtin;
pub mod schema;

use crate::error::LvError;
use schema::CleanupRules;
use std::path::Path;

/// Load cleanup rules from a JSON file.
pub fn load_rules(path: &Path) -> Result<CleanupRules, LvError> {
    let content = std::fs::read_to_string(path).map_err(|e| LvError::RulesLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_rules(&content, path)
}

/// Parse cleanup rules from a JSON string.
pub fn parse_rules(json: &str, source: &Path) -> Result<CleanupRules, LvError> {
    let rules: CleanupRules = serde_json::from_str(json).map_err(|e| LvError::RulesLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_rules(&rules)?;
    Ok(rules)
}

/// Pick the rules for a run: a rule file wins over a preset name, and
/// without either the built-in default applies.
pub fn select_rules(path: Option<&Path>, preset: Option<&str>) -> Result<CleanupRules, LvError> {
    match (path, preset) {
        (Some(path), _) => load_rules(path),
        (None, Some(name)) => builtin::load_preset(name),
        (None, None) => Ok(builtin::default_rules()),
    }
}

/// Validate that a rule set is well-formed.
///
/// Empty strings are rejected everywhere: an empty skip prefix would match
/// every line and an empty letterhead prefix every hint.
pub fn validate_rules(rules: &CleanupRules) -> Result<(), LvError> {
    if rules.name.trim().is_empty() {
        return Err(LvError::RulesInvalid("name must not be empty".into()));
    }

    let lists = [
        ("description_skip_prefixes", &rules.description_skip_prefixes),
        ("placeholders", &rules.placeholders),
        ("letterhead_prefixes", &rules.letterhead_prefixes),
    ];
    for (field, values) in lists {
        if values.iter().any(|v| v.trim().is_empty()) {
            return Err(LvError::RulesInvalid(format!(
                "{field} must not contain empty entries"
            )));
        }
    }

    Ok(())
}
