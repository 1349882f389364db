use lvpos_core::model::{DocumentMetadata, HeaderMetadata, PositionTable};

const DESCRIPTION_WIDTH: usize = 60;

pub fn format_positions(table: &PositionTable) -> String {
    let mut out = String::new();

    if table.rows.is_empty() {
        out.push_str("No positions found.\n");
        return out;
    }

    let id_width = table
        .rows
        .iter()
        .map(|p| p.position.len())
        .max()
        .unwrap_or(8)
        .max(8);

    let mut current_section: Option<Option<&str>> = None;
    let mut current_hint: Option<&str> = None;

    for p in &table.rows {
        let section = p.section.as_deref();
        if current_section != Some(section) {
            if current_section.is_some() {
                out.push('\n');
            }
            out.push_str(&format!("=== {} ===\n", section.unwrap_or("(no section)")));
            current_section = Some(section);
            current_hint = None;
        }

        if let Some(hint) = p.section_hint.as_deref() {
            if current_hint != Some(hint) {
                out.push_str(&format!("  Hinweis: {}\n", truncate(hint, 72)));
                current_hint = Some(hint);
            }
        }

        let quantity = p
            .quantity
            .as_ref()
            .map(|q| q.to_string())
            .unwrap_or_else(|| "-".into());
        out.push_str(&format!(
            "  {:<id_width$}  {:>10} {:<6}  p.{:<3}  {}\n",
            p.position,
            quantity,
            p.unit.as_deref().unwrap_or(""),
            p.page,
            truncate(p.main_description.as_deref().unwrap_or(""), DESCRIPTION_WIDTH),
        ));
    }

    out.push_str(&format!("\n{} position(s)", table.rows.len()));
    if !table.skipped_lines.is_empty() {
        out.push_str(&format!(
            ", {} boilerplate line(s) dropped",
            table.skipped_lines.len()
        ));
    }
    out.push('\n');

    out
}

pub fn format_metadata(meta: &DocumentMetadata) -> String {
    let mut out = String::new();

    out.push_str("=== Cover ===\n");
    let cover = &meta.cover;
    for (label, value) in [
        ("Project", &cover.project),
        ("Client", &cover.client),
        ("Permit planning", &cover.permit_planning),
        ("Execution planning", &cover.execution_planning),
        ("Site management", &cover.site_management),
        ("Execution period", &cover.execution_period),
        ("Execution start", &cover.execution_start),
        ("Offer net", &cover.offer_net),
        ("VAT", &cover.vat),
        ("Offer gross", &cover.offer_gross),
        ("Submission", &cover.submission),
        ("Bidder", &cover.bidder),
        ("LV", &cover.lv),
    ] {
        push_field(&mut out, label, value.as_deref());
    }

    out.push_str("\n=== Header (page 1) ===\n");
    out.push_str(&format_header(&meta.header));

    out.push_str("\n=== Remarks ===\n");
    push_field(&mut out, "Preliminary", meta.remarks.preliminary.as_deref());
    push_field(&mut out, "Closing", meta.remarks.closing.as_deref());

    out
}

pub fn format_header(header: &HeaderMetadata) -> String {
    let mut out = String::new();
    if header.is_empty() {
        out.push_str("  (no header found)\n");
        return out;
    }
    for (label, value) in [
        ("Company", &header.company),
        ("Street", &header.street),
        ("City", &header.city),
        ("Phone", &header.phone),
        ("Fax", &header.fax),
        ("E-mail", &header.email),
        ("Project", &header.project_name),
        ("Date", &header.date),
        ("LV", &header.lv),
    ] {
        push_field(&mut out, label, value.as_deref());
    }
    out
}

pub fn format_all_headers(headers: &[(usize, HeaderMetadata)]) -> String {
    if headers.is_empty() {
        return "No page headers found.\n".to_string();
    }
    let mut out = String::new();
    for (i, (page, header)) in headers.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("=== Page {page} ===\n"));
        out.push_str(&format_header(header));
    }
    out
}

fn push_field(out: &mut String, label: &str, value: Option<&str>) {
    out.push_str(&format!("  {:<20} {}\n", format!("{label}:"), value.unwrap_or("-")));
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let cut: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{cut}...")
}
