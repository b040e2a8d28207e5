//! Subcommand implementations.

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};
use tracing::info;

use caai_model::{CanonicalField, FieldKind, FlightRecord};
use caai_report::{write_form, write_run_report_json};
use caai_standards::aliases_for;

use crate::cli::{FormArgs, ImportArgs, SourceArgs};
use crate::pipeline::{PipelineOptions, PipelineResult, run_pipeline};
use crate::summary::print_summary;

fn pipeline_options(source: &SourceArgs) -> PipelineOptions {
    PipelineOptions {
        format: source.format.map(Into::into),
        mapping_file: source.mapping.clone(),
        airports_file: source.airports.clone(),
    }
}

pub fn run_analyze(args: &SourceArgs) -> Result<PipelineResult> {
    let result = run_pipeline(&args.input, &pipeline_options(args))?;
    print_summary(&result);
    Ok(result)
}

pub fn run_form(args: &FormArgs) -> Result<PipelineResult> {
    let result = run_pipeline(&args.source.input, &pipeline_options(&args.source))?;
    write_form(&args.output, &result.values)
        .with_context(|| format!("write form {}", args.output.display()))?;
    info!(output = %args.output.display(), "form written");
    if let Some(path) = &args.report_json {
        write_run_report_json(path, &result.values, &result.report)
            .with_context(|| format!("write report {}", path.display()))?;
        info!(report = %path.display(), "run report written");
    }
    print_summary(&result);
    println!("Form: {}", args.output.display());
    Ok(result)
}

pub fn run_import(args: &ImportArgs) -> Result<PipelineResult> {
    let result = run_pipeline(&args.source.input, &pipeline_options(&args.source))?;
    write_normalized_csv(&args.output, &result.records)
        .with_context(|| format!("write logbook {}", args.output.display()))?;
    info!(
        output = %args.output.display(),
        records = result.records.len(),
        "normalized logbook written"
    );
    print_summary(&result);
    println!("Logbook: {}", args.output.display());
    Ok(result)
}

pub fn run_fields() -> Result<()> {
    let mut table = Table::new();
    table.set_header(vec!["Field", "Kind", "Required", "Aliases"]);
    crate::summary::apply_fields_table_style(&mut table);
    for field in CanonicalField::ALL {
        let kind = match field.kind() {
            FieldKind::Date => "date",
            FieldKind::Duration => "duration",
            FieldKind::Count => "count",
            FieldKind::Text => "text",
            FieldKind::Distance => "distance",
        };
        let aliases = aliases_for(field).join(", ");
        table.add_row(vec![
            Cell::new(field),
            Cell::new(kind),
            Cell::new(if field.is_required() { "yes" } else { "" }),
            Cell::new(aliases),
        ]);
    }
    println!("{table}");
    Ok(())
}

/// Write normalized records as a canonical CSV logbook, one column per
/// canonical field.
fn write_normalized_csv(path: &Path, records: &[FlightRecord]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    let headers: Vec<&str> = CanonicalField::ALL
        .iter()
        .map(|field| field.display_name())
        .collect();
    writer.write_record(&headers)?;

    for record in records {
        let row: Vec<String> = CanonicalField::ALL
            .iter()
            .map(|field| field_value(record, *field))
            .collect();
        writer.write_record(&row)?;
    }
    writer.flush()?;
    Ok(())
}

fn field_value(record: &FlightRecord, field: CanonicalField) -> String {
    match field {
        CanonicalField::Date => record.date.format("%Y-%m-%d").to_string(),
        CanonicalField::From => record.from.clone(),
        CanonicalField::To => record.to.clone(),
        CanonicalField::Registration => record.registration.clone(),
        CanonicalField::AircraftType => record.aircraft_type.clone(),
        CanonicalField::EngineType => record.engine_type.clone(),
        CanonicalField::Class => record.class.clone(),
        CanonicalField::Instructor => record.instructor.clone(),
        CanonicalField::Remarks => record.remarks.clone(),
        CanonicalField::DayLandings => non_zero_count(record.day_landings),
        CanonicalField::NightLandings => non_zero_count(record.night_landings),
        CanonicalField::Distance => record
            .distance_nm
            .map(|nm| format!("{nm:.1}"))
            .unwrap_or_default(),
        duration_field => record
            .durations
            .get(duration_field)
            .filter(|hours| hours.is_positive())
            .map(|hours| hours.to_string())
            .unwrap_or_default(),
    }
}

fn non_zero_count(count: u32) -> String {
    if count == 0 {
        String::new()
    } else {
        count.to_string()
    }
}
