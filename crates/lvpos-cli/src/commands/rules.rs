use lvpos_core::error::LvError;
use lvpos_core::rules::builtin;
use lvpos_core::rules::schema::CleanupRules;
use std::path::Path;

pub fn show(preset: &str) -> Result<(), LvError> {
    println!("Available presets: {}\n", builtin::PRESETS.join(", "));

    let rules = builtin::load_preset(preset)?;
    print_rules(&rules);
    println!("\nCustom rule files use the same JSON fields:\n");
    println!("{}", serde_json::to_string_pretty(&rules)?);
    Ok(())
}

pub fn validate(file: &Path) -> Result<(), LvError> {
    let rules = lvpos_core::rules::load_rules(file)?;

    println!("Rule file '{}' (v{}) is valid.", rules.name, rules.version);
    print_rules(&rules);

    // Not errors, but probably not what the author meant
    let mut warnings = Vec::new();
    if rules.description_skip_prefixes.is_empty() {
        warnings.push("no skip prefixes: running totals stay in descriptions".to_string());
    }
    for p in &rules.placeholders {
        if p.trim() != p {
            warnings.push(format!(
                "placeholder '{p}' has surrounding whitespace and never matches a trimmed cell"
            ));
        }
    }

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for w in &warnings {
            println!("  - {w}");
        }
    }

    Ok(())
}

fn print_rules(rules: &CleanupRules) {
    println!("{} (version {})", rules.name, rules.version);
    if let Some(ref desc) = rules.description {
        println!("  {desc}");
    }
    print_list("Skip prefixes", &rules.description_skip_prefixes);
    print_list("Placeholders", &rules.placeholders);
    print_list("Letterhead prefixes", &rules.letterhead_prefixes);
}

fn print_list(label: &str, items: &[String]) {
    if items.is_empty() {
        println!("  {label}: (none)");
    } else {
        let quoted: Vec<String> = items.iter().map(|s| format!("\"{s}\"")).collect();
        println!("  {label}: {}", quoted.join(", "));
    }
}
