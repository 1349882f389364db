//! Table-wide transforms applied to assembled positions.
//!
//! The steps run in a fixed order and each one is idempotent, so running the
//! pipeline on an already processed table changes nothing.

use crate::error::LvError;
use crate::model::{Position, Quantity};
use crate::parsing::number::coerce_f64;
use crate::rules::schema::CleanupRules;
use std::collections::BTreeMap;

/// Run all post-processing steps in order.
pub fn run(rows: &mut [Position], rules: &CleanupRules) -> Result<(), LvError> {
    derive_position_levels(rows)?;
    remove_placeholders(rows, &rules.placeholders);
    sanitize_hints(rows, &rules.letterhead_prefixes);
    coerce_types(rows);
    propagate_hints(rows);
    Ok(())
}

/// Split `A...B` into `position_level_1 = A` and `position_level_2 = B`.
///
/// Fails on the first identifier whose first or last dot-separated token is
/// not an integer.
pub fn derive_position_levels(rows: &mut [Position]) -> Result<(), LvError> {
    for row in rows.iter_mut() {
        let (level_1, level_2) =
            split_levels(&row.position).ok_or_else(|| LvError::InvalidPosition {
                position: row.position.clone(),
                page: row.page,
            })?;
        row.position_level_1 = Some(level_1);
        row.position_level_2 = Some(level_2);
    }
    Ok(())
}

fn split_levels(position: &str) -> Option<(i32, i32)> {
    let mut tokens = position.split('.');
    let first = tokens.next()?.trim().parse().ok()?;
    let last = match tokens.next_back() {
        Some(token) => token.trim().parse().ok()?,
        None => first,
    };
    Some((first, last))
}

/// Replace known placeholder values with missing, in every text column.
pub fn remove_placeholders(rows: &mut [Position], placeholders: &[String]) {
    if placeholders.is_empty() {
        return;
    }
    let is_placeholder = |s: &str| placeholders.iter().any(|p| p == s);

    for row in rows.iter_mut() {
        for field in text_fields(row) {
            if field.as_deref().is_some_and(is_placeholder) {
                *field = None;
            }
        }
        if matches!(&row.quantity, Some(Quantity::Text(s)) if is_placeholder(s.as_str())) {
            row.quantity = None;
        }
    }
}

/// Clear section hints that are really company letterhead.
pub fn sanitize_hints(rows: &mut [Position], letterhead_prefixes: &[String]) {
    for row in rows.iter_mut() {
        let is_letterhead = row
            .section_hint
            .as_deref()
            .is_some_and(|hint| letterhead_prefixes.iter().any(|p| hint.starts_with(p.as_str())));
        if is_letterhead {
            row.section_hint = None;
        }
    }
}

/// Normalize textual quantities to numbers and blank text to missing.
///
/// A quantity that does not parse after normalization becomes missing.
pub fn coerce_types(rows: &mut [Position]) {
    for row in rows.iter_mut() {
        row.quantity = match row.quantity.take() {
            Some(Quantity::Text(s)) => coerce_f64(&s).map(Quantity::Number),
            other => other,
        };

        for field in text_fields(row) {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
    }
}

/// Within each `position_level_1` group, forward-fill then backward-fill
/// `section_hint` in row order.
pub fn propagate_hints(rows: &mut [Position]) {
    let mut groups: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, row) in rows.iter().enumerate() {
        if let Some(level) = row.position_level_1 {
            groups.entry(level).or_default().push(i);
        }
    }

    for indices in groups.values() {
        let mut last: Option<String> = None;
        for &i in indices {
            let slot = &mut rows[i].section_hint;
            if slot.is_none() {
                *slot = last.clone();
            } else {
                last = slot.clone();
            }
        }

        let mut next: Option<String> = None;
        for &i in indices.iter().rev() {
            let slot = &mut rows[i].section_hint;
            if slot.is_none() {
                *slot = next.clone();
            } else {
                next = slot.clone();
            }
        }
    }
}

fn text_fields(row: &mut Position) -> [&mut Option<String>; 5] {
    [
        &mut row.section,
        &mut row.section_hint,
        &mut row.main_description,
        &mut row.detailed_description,
        &mut row.unit,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::builtin::default_rules;

    fn pos(id: &str, hint: Option<&str>) -> Position {
        let mut p = Position::new(id, 1);
        p.section_hint = hint.map(String::from);
        p
    }

    #[test]
    fn test_position_levels() {
        let mut rows = vec![pos("3...12", None), pos("10...1", None)];
        derive_position_levels(&mut rows).unwrap();
        assert_eq!(rows[0].position_level_1, Some(3));
        assert_eq!(rows[0].position_level_2, Some(12));
        assert_eq!(rows[1].position_level_1, Some(10));
        assert_eq!(rows[1].position_level_2, Some(1));
    }

    #[test]
    fn test_position_levels_invalid_is_error() {
        let mut rows = vec![pos("1...1", None), pos("A...2", None)];
        rows[1].page = 7;
        let err = derive_position_levels(&mut rows).unwrap_err();
        match err {
            LvError::InvalidPosition { position, page } => {
                assert_eq!(position, "A...2");
                assert_eq!(page, 7);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_position_levels_trailing_dots_is_error() {
        let mut rows = vec![pos("4...", None)];
        assert!(derive_position_levels(&mut rows).is_err());
    }

    #[test]
    fn test_remove_placeholders() {
        let mut rows = vec![pos("1...1", Some("________"))];
        rows[0].unit = Some("___ ________ ____________".into());
        rows[0].quantity = Some(Quantity::Text("________".into()));
        rows[0].main_description = Some("Aushub ________".into());
        remove_placeholders(&mut rows, &default_rules().placeholders);
        assert_eq!(rows[0].section_hint, None);
        assert_eq!(rows[0].unit, None);
        assert_eq!(rows[0].quantity, None);
        // Only whole-cell matches are placeholders.
        assert_eq!(rows[0].main_description.as_deref(), Some("Aushub ________"));
    }

    #[test]
    fn test_sanitize_letterhead_hint() {
        let mut rows = vec![
            pos("1...1", Some("Ingenieurbüro Wagner und Koll GmbH, Hauptstraße 1")),
            pos("1...2", Some("Arbeiten im Bestand")),
        ];
        sanitize_hints(&mut rows, &default_rules().letterhead_prefixes);
        assert_eq!(rows[0].section_hint, None);
        assert_eq!(rows[1].section_hint.as_deref(), Some("Arbeiten im Bestand"));
    }

    #[test]
    fn test_coerce_quantities() {
        let mut rows = vec![pos("1...1", None), pos("1...2", None), pos("1...3", None)];
        rows[0].quantity = Some(Quantity::Text("3,50".into()));
        rows[1].quantity = Some(Quantity::Text("1.2.3x".into()));
        rows[2].quantity = Some(Quantity::Number(7.25));
        rows[2].unit = Some("  ".into());
        coerce_types(&mut rows);
        assert_eq!(rows[0].quantity, Some(Quantity::Number(3.5)));
        assert_eq!(rows[1].quantity, None);
        assert_eq!(rows[2].quantity, Some(Quantity::Number(7.25)));
        assert_eq!(rows[2].unit, None);
    }

    #[test]
    fn test_propagate_hint_backward_within_group() {
        let mut rows = vec![
            pos("3...1", None),
            pos("3...2", Some("Hinweis Gruppe 3")),
            pos("4...1", None),
        ];
        derive_position_levels(&mut rows).unwrap();
        propagate_hints(&mut rows);
        assert_eq!(rows[0].section_hint.as_deref(), Some("Hinweis Gruppe 3"));
        assert_eq!(rows[1].section_hint.as_deref(), Some("Hinweis Gruppe 3"));
        assert_eq!(rows[2].section_hint, None);
    }

    #[test]
    fn test_propagate_forward_fill_prefers_previous() {
        let mut rows = vec![
            pos("2...1", Some("A")),
            pos("2...2", None),
            pos("2...3", Some("B")),
            pos("2...4", None),
        ];
        derive_position_levels(&mut rows).unwrap();
        propagate_hints(&mut rows);
        let hints: Vec<_> = rows.iter().map(|r| r.section_hint.as_deref()).collect();
        assert_eq!(hints, vec![Some("A"), Some("A"), Some("B"), Some("B")]);
    }

    #[test]
    fn test_run_is_idempotent() {
        let mut rows = vec![
            pos("1...1", Some("Ingenieurbüro Wagner und Koll")),
            pos("1...2", Some("Hinweis")),
            pos("2...1", None),
        ];
        rows[0].quantity = Some(Quantity::Text("1.234,5".into()));
        rows[1].quantity = Some(Quantity::Text("________".into()));
        rows[2].quantity = Some(Quantity::Text("3.350.000".into()));

        let rules = default_rules();
        run(&mut rows, &rules).unwrap();
        let once = rows.clone();
        run(&mut rows, &rules).unwrap();
        assert_eq!(rows, once);

        assert_eq!(rows[0].quantity, Some(Quantity::Number(1234.5)));
        assert_eq!(rows[0].section_hint.as_deref(), Some("Hinweis"));
        assert_eq!(rows[1].quantity, None);
        assert_eq!(rows[2].quantity, Some(Quantity::Number(3_350_000.0)));
    }
}
