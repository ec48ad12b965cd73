use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use crate::types::ConvertReport;

/// Prints the post-conversion summary: source paths and one table row per
/// output artifact.
pub fn print_report(report: &ConvertReport) {
    for source in &report.sources {
        println!("Source: {}", source.display());
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Artifact"),
        header_cell("Path"),
        header_cell("Records"),
    ]);
    apply_table_style(&mut table);
    if let Some(column) = table.column_mut(2) {
        column.set_cell_alignment(CellAlignment::Right);
    }
    for artifact in &report.artifacts {
        let records = match artifact.records {
            Some(count) => Cell::new(count),
            None => dim_cell("-"),
        };
        table.add_row(vec![
            Cell::new(artifact.kind).fg(Color::Cyan),
            Cell::new(artifact.path.display()),
            records,
        ]);
    }
    println!("{table}");
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Dim)
}
