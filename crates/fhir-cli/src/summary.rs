use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::{UTF8_FULL, UTF8_FULL_CONDENSED};
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use fhir_cli::check::{CheckOutcome, CheckReport};

pub fn print_check_report(report: &CheckReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("File"),
        header_cell("Format"),
        header_cell("Resource"),
        header_cell("Status"),
        header_cell("Error"),
    ]);
    apply_report_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for outcome in &report.outcomes {
        table.add_row(vec![
            Cell::new(outcome.file.display()),
            optional_cell(outcome.format.as_deref()),
            optional_cell(outcome.resource_type.as_deref()),
            status_cell(outcome),
            error_cell(outcome),
        ]);
    }
    println!("{table}");

    let failures = report.failure_count();
    if failures > 0 {
        println!("{failures} of {} files failed", report.outcomes.len());
    }
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_report_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::DynamicFullWidth)
        .set_width(160);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn status_cell(outcome: &CheckOutcome) -> Cell {
    if outcome.is_ok() {
        Cell::new("ok").fg(Color::Green)
    } else {
        Cell::new("failed")
            .fg(Color::Red)
            .add_attribute(Attribute::Bold)
    }
}

fn error_cell(outcome: &CheckOutcome) -> Cell {
    match (&outcome.error_kind, &outcome.message) {
        (Some(kind), Some(message)) => Cell::new(format!("{kind}: {message}")).fg(Color::Red),
        (Some(kind), None) => Cell::new(kind).fg(Color::Red),
        _ => dim_cell("-"),
    }
}

fn optional_cell(value: Option<&str>) -> Cell {
    match value {
        Some(value) => Cell::new(value),
        None => dim_cell("-"),
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
