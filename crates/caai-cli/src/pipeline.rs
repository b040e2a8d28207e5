//! The batch pipeline, with explicit stages:
//!
//! 1. **Ingest**: read the source file into a raw table
//! 2. **Resolve**: map source columns to canonical fields
//! 3. **Normalize**: one flight record per usable row
//! 4. **Enrich**: fill missing leg distances from the airport index
//! 5. **Classify**: apply the CAAI rules per record
//! 6. **Aggregate**: fold classified flights into the form accumulator
//!
//! Row-level problems accumulate in the run report and never abort the
//! batch; the only fatal condition is a mapping in which no required
//! field resolved at all.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use tracing::{info, info_span, warn};

use caai_classify::classify;
use caai_ingest::{RawTable, SourceFormat, read_source};
use caai_map::{load_mapping_file, resolve};
use caai_model::{ClassifiedFlight, FlightRecord, MappingOutcome, MappingSpec, RunReport};
use caai_report::{FormAccumulator, FormValues, MAX_TYPE_ROWS};
use caai_standards::{AircraftRegistry, AirportIndex};
use caai_transform::{NormalizedRow, normalize};

/// Caller-supplied knobs; everything else is derived from the input.
#[derive(Debug, Default)]
pub struct PipelineOptions {
    pub format: Option<SourceFormat>,
    pub mapping_file: Option<PathBuf>,
    pub airports_file: Option<PathBuf>,
}

/// The best-effort result of one run, with its issue report.
#[derive(Debug)]
pub struct PipelineResult {
    pub format: SourceFormat,
    pub outcome: MappingOutcome,
    pub records: Vec<FlightRecord>,
    pub flights: Vec<ClassifiedFlight>,
    pub values: FormValues,
    pub report: RunReport,
    pub rows_read: usize,
    pub rows_blank: usize,
    pub rows_rejected: usize,
}

/// Run the whole pipeline over one source file.
pub fn run_pipeline(input: &Path, options: &PipelineOptions) -> Result<PipelineResult> {
    let mut report = RunReport::new();

    // Stage 1: ingest
    let ingest_span = info_span!("ingest", input = %input.display());
    let ingest_start = Instant::now();
    let (format, table) = ingest_span.in_scope(|| read_source(input, options.format))?;
    info!(
        %format,
        rows = table.rows.len(),
        duration_ms = ingest_start.elapsed().as_millis(),
        "ingest complete"
    );

    // Stage 2: resolve columns
    let outcome = resolve_columns(&table, options, &mut report)?;

    // Stage 3: normalize rows
    let normalize_span = info_span!("normalize");
    let (records, rows_blank, rows_rejected) =
        normalize_span.in_scope(|| normalize_rows(&table, &outcome, &mut report));
    info!(
        records = records.len(),
        blank = rows_blank,
        rejected = rows_rejected,
        "normalize complete"
    );

    // Stage 4: enrich with leg distances
    let records = enrich_distances(records, options.airports_file.as_deref())?;

    // Stage 5: classify
    let registry = AircraftRegistry::shared();
    let classify_span = info_span!("classify");
    let flights: Vec<ClassifiedFlight> = classify_span.in_scope(|| {
        records
            .iter()
            .map(|record| {
                let flight = classify(record, registry);
                for advisory in &flight.advisories {
                    report.advisory(
                        None,
                        format!("{} {}: {}", record.date, flight.type_code, advisory.message),
                    );
                }
                flight
            })
            .collect()
    });

    // Stage 6: aggregate
    let aggregate_span = info_span!("aggregate");
    let values = aggregate_span.in_scope(|| {
        let mut accumulator = FormAccumulator::new();
        for flight in &flights {
            accumulator.fold(flight);
        }
        accumulator.finalize()
    });
    for type_code in &values.unresolved_types {
        report.unresolved_group(type_code);
    }
    for note in &values.notes {
        report.note(note.clone());
    }
    if values.type_rows.len() > MAX_TYPE_ROWS {
        report.note(format!(
            "{} aircraft types found but the form has {MAX_TYPE_ROWS} rows; \
             the smallest types were left off",
            values.type_rows.len()
        ));
    }
    info!(
        flights = flights.len(),
        types = values.type_rows.len(),
        form_total = %values.grand.form_total,
        "aggregation complete"
    );

    Ok(PipelineResult {
        format,
        outcome,
        records,
        flights,
        values,
        report,
        rows_read: table.rows.len(),
        rows_blank,
        rows_rejected,
    })
}

fn resolve_columns(
    table: &RawTable,
    options: &PipelineOptions,
    report: &mut RunReport,
) -> Result<MappingOutcome> {
    let span = info_span!("resolve");
    let _guard = span.enter();

    let spec: Option<MappingSpec> = match &options.mapping_file {
        Some(path) => {
            let loaded = load_mapping_file(path)
                .with_context(|| format!("load mapping file {}", path.display()))?;
            for warning in loaded.warnings {
                report.note(warning);
            }
            Some(loaded.spec)
        }
        None => None,
    };

    let outcome = resolve(&table.headers, spec.as_ref());
    for warning in &outcome.warnings {
        report.note(warning.clone());
    }
    for field in &outcome.unresolved_required {
        report.mapping_deficiency(*field);
    }
    if outcome.mapping.is_unusable() {
        bail!(
            "no required column could be resolved from the source headers; \
             provide an explicit mapping file (see the [columns] table format)"
        );
    }
    info!(
        mapped = outcome.mapping.len(),
        unresolved = outcome.unresolved_required.len(),
        "column resolution complete"
    );
    Ok(outcome)
}

fn normalize_rows(
    table: &RawTable,
    outcome: &MappingOutcome,
    report: &mut RunReport,
) -> (Vec<FlightRecord>, usize, usize) {
    let mut records = Vec::new();
    let mut blank = 0usize;
    let mut rejected = 0usize;
    for (index, row) in table.rows.iter().enumerate() {
        let row_number = index + 1;
        match normalize(row, &outcome.mapping) {
            Ok(NormalizedRow::Record(record)) => records.push(record),
            Ok(NormalizedRow::Blank) => blank += 1,
            Err(error) => {
                rejected += 1;
                warn!(row = row_number, %error, "row rejected");
                report.row_rejected(row_number, error.field(), error.to_string());
            }
        }
    }
    (records, blank, rejected)
}

fn enrich_distances(
    mut records: Vec<FlightRecord>,
    airports_file: Option<&Path>,
) -> Result<Vec<FlightRecord>> {
    let index = match airports_file {
        Some(path) => AirportIndex::new()
            .with_custom_file(path)
            .with_context(|| format!("load airports file {}", path.display()))?,
        None => AirportIndex::new(),
    };
    let mut filled = 0usize;
    for record in &mut records {
        if record.distance_nm.is_none()
            && let Some(distance) = index.leg_distance_nm(&record.from, &record.to)
        {
            record.distance_nm = Some(distance);
            filled += 1;
        }
    }
    if filled > 0 {
        info!(filled, "leg distances filled from airport index");
    }
    Ok(records)
}
