use std::path::Path;

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use prefport_model::ConfigDocument;
use prefport_transfer::{ExportReport, ImportReport, is_sensitive};

pub const RELOAD_NOTICE: &str =
    "Preferences and prompts were replaced. Reload the application to apply them.";

pub fn print_export_summary(report: &ExportReport, output: &Path) {
    println!("Exported to {}", output.display());
    println!(
        "Preferences: {}  Prompts: {}",
        report.preferences, report.prompts
    );
    if report.skipped_sensitive > 0 {
        println!(
            "Omitted {} credential preference(s); use --include-secrets to keep them.",
            report.skipped_sensitive
        );
    }
    if report.skipped_unsupported > 0 {
        println!(
            "Skipped {} preference(s) with values JSON cannot hold.",
            report.skipped_unsupported
        );
    }
}

pub fn print_import_summary(report: &ImportReport) {
    println!(
        "Imported {} preference(s) and {} prompt(s).",
        report.preferences, report.prompts
    );
    if report.reload_required() {
        println!("{RELOAD_NOTICE}");
    }
}

pub fn print_inspect_summary(document: &ConfigDocument) {
    let exported_at = document
        .exported_at()
        .map(|at| at.to_rfc3339())
        .unwrap_or_else(|| "unknown".to_string());
    println!("Version: {}  App: {}", document.version, document.app_id);
    println!("Exported: {exported_at}");
    println!(
        "Includes secrets: {}",
        if document.include_secrets { "yes" } else { "no" }
    );
    println!("{}", preference_table(document));
    println!("{}", prompt_table(document));
}

/// One row per key with its type. Values stay hidden.
pub fn preference_table(document: &ConfigDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Preference"),
        header_cell("Type"),
        header_cell("Secret"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 2, CellAlignment::Center);
    for (key, value) in &document.preferences {
        let secret = if is_sensitive(key) {
            Cell::new("yes").fg(Color::Yellow)
        } else {
            dim_cell("-")
        };
        table.add_row(vec![Cell::new(key), Cell::new(value.kind()), secret]);
    }
    if document.preferences.is_empty() {
        table.add_row(vec![dim_cell("(none)"), dim_cell("-"), dim_cell("-")]);
    }
    table
}

pub fn prompt_table(document: &ConfigDocument) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Prompt"),
        header_cell("Requires selection"),
        header_cell("Auto apply"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Center);
    align_column(&mut table, 3, CellAlignment::Center);
    for record in document.prompts.iter() {
        table.add_row(vec![
            Cell::new(record.position + 1),
            Cell::new(&record.name),
            flag_cell(record.requires_selection),
            flag_cell(record.auto_apply),
        ]);
    }
    table
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn flag_cell(flag: bool) -> Cell {
    if flag {
        Cell::new("yes").fg(Color::Green)
    } else {
        dim_cell("no")
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
