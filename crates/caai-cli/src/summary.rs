//! Human-readable run summaries, printed with comfy-table.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use caai_model::{Hours, IssueSeverity};

use crate::pipeline::PipelineResult;

pub fn print_summary(result: &PipelineResult) {
    println!(
        "Source: {} ({} rows, {} records, {} blank, {} rejected)",
        result.format, result.rows_read, result.records.len(), result.rows_blank,
        result.rows_rejected
    );

    print_type_table(result);
    print_grand_totals(result);
    print_issue_table(result);
}

fn print_type_table(result: &PipelineResult) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Type"),
        header_cell("Group"),
        header_cell("Flights"),
        header_cell("Form"),
        header_cell("Day PIC"),
        header_cell("Day PIC-XC"),
        header_cell("Day SIC"),
        header_cell("Day STD"),
        header_cell("Night PIC"),
        header_cell("Night SIC"),
        header_cell("Night STD"),
        header_cell("Inst"),
    ]);
    apply_table_style(&mut table);
    for column in 2..12 {
        align_column(&mut table, column, CellAlignment::Right);
    }

    for row in &result.values.type_rows {
        let stats = &row.stats;
        table.add_row(vec![
            Cell::new(&row.type_code).add_attribute(Attribute::Bold),
            Cell::new(stats.group),
            Cell::new(stats.flights),
            hours_cell(stats.form_total),
            hours_cell(stats.pic.day),
            hours_cell(stats.pic_xc.day),
            hours_cell(stats.sic.day),
            hours_cell(stats.student.day),
            hours_cell(stats.pic.night),
            hours_cell(stats.sic.night),
            hours_cell(stats.student.night),
            hours_cell(stats.instrument_actual + stats.instrument_simulated),
        ]);
    }
    for device in &result.values.device_rows {
        table.add_row(vec![
            Cell::new(&device.type_code).fg(Color::DarkGrey),
            Cell::new("device").fg(Color::DarkGrey),
            Cell::new(device.stats.sessions),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            dim_cell("-"),
            hours_cell(device.stats.hours),
        ]);
    }
    println!("{table}");
}

fn print_grand_totals(result: &PipelineResult) {
    let grand = &result.values.grand;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Grand total"), header_cell("Hours")]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);

    let rows: Vec<(&str, Hours)> = vec![
        ("PIC", grand.pic),
        ("SIC", grand.sic),
        ("Student", grand.student),
        ("Form total (PIC+SIC+Student)", grand.form_total),
        ("Overall (42(b): PIC+SIC/2+Student)", grand.overall_total),
        ("Night", grand.night),
        ("Night PIC", grand.night_pic),
        ("PIC cross-country", grand.pic_xc),
        ("Cross-country, all roles", grand.xc_all_roles),
        ("Solo", grand.solo),
        ("Solo cross-country", grand.solo_xc),
        ("Dual instrument", grand.dual_instrument),
        ("Instrument in aircraft", grand.instrument_aircraft),
        ("Training device", grand.device_hours),
        ("Complex / multi-engine group", grand.complex_hours),
        ("Safety pilot (excluded)", grand.safety_pilot_excluded),
    ];
    for (label, hours) in rows {
        table.add_row(vec![Cell::new(label), hours_cell(hours)]);
    }
    table.add_row(vec![
        Cell::new("Landings day / night"),
        Cell::new(format!("{} / {}", grand.day_landings, grand.night_landings)),
    ]);
    println!("{table}");

    if let Some(solo) = &result.values.longest_solo_xc {
        println!(
            "Longest solo XC: {} {}-{}, {:.0} NM, {} hrs",
            solo.date, solo.from, solo.to, solo.distance_nm, solo.duration
        );
    }
}

fn print_issue_table(result: &PipelineResult) {
    if result.report.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Severity"),
        header_cell("Row"),
        header_cell("Field"),
        header_cell("Message"),
    ]);
    apply_table_style(&mut table);

    for issue in &result.report.issues {
        table.add_row(vec![
            severity_cell(issue.severity),
            match issue.row {
                Some(row) => Cell::new(row),
                None => dim_cell("-"),
            },
            match issue.field {
                Some(field) => Cell::new(field),
                None => dim_cell("-"),
            },
            Cell::new(&issue.message),
        ]);
    }
    println!();
    println!("Issues:");
    println!("{table}");
}

/// Style for the `fields` listing, which wants wide wrap-friendly cells.
pub fn apply_fields_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(140);
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

fn hours_cell(hours: Hours) -> Cell {
    if hours.is_zero() {
        dim_cell("-")
    } else {
        Cell::new(format!("{:.1}", hours.rounded_tenths()))
    }
}

fn dim_cell(label: impl ToString) -> Cell {
    Cell::new(label.to_string()).fg(Color::DarkGrey)
}

fn severity_cell(severity: IssueSeverity) -> Cell {
    match severity {
        IssueSeverity::Error => Cell::new("error").fg(Color::Red),
        IssueSeverity::Warning => Cell::new("warning").fg(Color::Yellow),
        IssueSeverity::Advisory => Cell::new("advisory").fg(Color::Blue),
    }
}
