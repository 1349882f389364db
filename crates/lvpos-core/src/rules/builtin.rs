use crate::error::LvError;
use crate::rules::schema::CleanupRules;
use std::sync::LazyLock;

pub const DEFAULT_RULES_JSON: &str = include_str!("../../../../rules/lv-default.json");

/// Available predefined rule sets.
pub const PRESETS: &[&str] = &["default"];

static DEFAULT_RULES: LazyLock<CleanupRules> = LazyLock::new(|| {
    serde_json::from_str(DEFAULT_RULES_JSON).expect("embedded lv-default.json is valid")
});

/// The rules shipped with the crate.
pub fn default_rules() -> CleanupRules {
    DEFAULT_RULES.clone()
}

/// Load a predefined rule set by name.
pub fn load_preset(name: &str) -> Result<CleanupRules, LvError> {
    match name {
        "default" => Ok(default_rules()),
        _ => Err(LvError::RulesInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
