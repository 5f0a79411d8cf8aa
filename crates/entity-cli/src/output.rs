//! Table rendering for command output.

use std::sync::Arc;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use entity_core::{CompanyRecord, DatabaseStats, Decision, ResolutionResult};

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

/// One row per company, in the order given.
pub fn companies_table(records: &[Arc<CompanyRecord>]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Name"),
        header_cell("Country"),
        header_cell("LEI"),
        header_cell("Normalized"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    for record in records {
        table.add_row(vec![
            Cell::new(record.name()),
            Cell::new(record.country()),
            optional_cell(record.lei()),
            dim_cell(record.name_norm()),
        ]);
    }
    table
}

/// Decision summary followed by the top `top` candidates.
pub fn render_resolution(result: &ResolutionResult, top: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Query: {}\n", result.query));
    out.push_str(&format!("Normalized: {}\n", result.normalized));
    if let Some(country) = &result.country {
        out.push_str(&format!("Country hint: {country}\n"));
    }
    out.push_str(&format!("Decision: {}\n", result.decision));
    match result.final_record() {
        Some(record) => out.push_str(&format!(
            "Final: {} ({})\n",
            record.name(),
            record.country()
        )),
        None => out.push_str("Final: -\n"),
    }
    if result.matches.is_empty() {
        out.push_str("No candidates.\n");
        return out;
    }

    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Name"),
        header_cell("Country"),
        header_cell("Score"),
        header_cell("Signals"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Right);
    for (rank, candidate) in result.matches.iter().take(top).enumerate() {
        let name = if rank == 0 {
            decision_cell(candidate.record.name(), result.decision)
        } else {
            Cell::new(candidate.record.name())
        };
        table.add_row(vec![
            Cell::new(rank + 1),
            name,
            Cell::new(candidate.record.country()),
            Cell::new(format!("{:.3}", candidate.score)),
            dim_cell(candidate.explain()),
        ]);
    }
    out.push_str(&table.to_string());
    out.push('\n');
    let hidden = result.matches.len().saturating_sub(top);
    if hidden > 0 {
        out.push_str(&format!("... {hidden} more candidate(s)\n"));
    }
    out
}

/// Summary counts plus a per-country breakdown.
pub fn stats_tables(stats: &DatabaseStats) -> (Table, Table) {
    let mut summary = Table::new();
    summary.set_header(vec![header_cell("Metric"), header_cell("Value")]);
    apply_table_style(&mut summary);
    align_column(&mut summary, 1, CellAlignment::Right);
    let sources = if stats.sources.is_empty() {
        "-".to_string()
    } else {
        stats
            .sources
            .iter()
            .map(|path| path.display().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    };
    let rows: [(&str, String); 9] = [
        ("Records", stats.index.records.to_string()),
        ("Countries", stats.index.countries.to_string()),
        ("Distinct names", stats.index.distinct_keys.to_string()),
        ("Tokens", stats.index.tokens.to_string()),
        ("With LEI", stats.index.with_lei.to_string()),
        ("Skipped rows", stats.skipped_rows.to_string()),
        ("Dropped LEIs", stats.invalid_leis.to_string()),
        ("Loaded at", stats.loaded_at.to_rfc3339()),
        ("Sources", sources),
    ];
    for (label, value) in rows {
        summary.add_row(vec![Cell::new(label), Cell::new(value)]);
    }
    summary.add_row(vec![
        Cell::new("Fingerprint"),
        dim_cell(&stats.fingerprint),
    ]);

    let mut countries = Table::new();
    countries.set_header(vec![header_cell("Country"), header_cell("Records")]);
    apply_table_style(&mut countries);
    align_column(&mut countries, 0, CellAlignment::Center);
    align_column(&mut countries, 1, CellAlignment::Right);
    for (code, count) in &stats.by_country {
        countries.add_row(vec![Cell::new(code), Cell::new(count)]);
    }
    (summary, countries)
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn decision_cell(label: &str, decision: Decision) -> Cell {
    let color = match decision {
        Decision::Accepted => Color::Green,
        Decision::Ambiguous => Color::Yellow,
        Decision::Rejected => Color::Red,
    };
    Cell::new(label).fg(color).add_attribute(Attribute::Bold)
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value.to_string()).add_attribute(Attribute::Dim)
}
