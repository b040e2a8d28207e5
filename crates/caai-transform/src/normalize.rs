//! Row normalization.

use caai_model::{CanonicalField, ColumnMapping, Durations, FieldKind, FlightRecord};

use crate::dates::parse_date;
use crate::duration::{parse_count, parse_distance, parse_duration};
use crate::error::NormalizationError;

/// What became of one raw row.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedRow {
    Record(FlightRecord),
    /// Every mapped cell was empty — a spacer or page artifact, skipped
    /// without error.
    Blank,
}

/// Convert one raw source row into a [`FlightRecord`] under a resolved
/// mapping.
///
/// Unmapped duration fields default to zero (the missing column was
/// already reported as a mapping deficiency); a mapped cell whose value
/// matches no accepted grammar rejects this row and names the field, and
/// the batch continues without it.
pub fn normalize(
    row: &[String],
    mapping: &ColumnMapping,
) -> Result<NormalizedRow, NormalizationError> {
    // Mapped fields always yield a cell; a row shorter than the header
    // reads as empty cells, not as unmapped columns.
    let cell = |field: CanonicalField| -> Option<&str> {
        let idx = mapping.get(field)?;
        Some(row.get(idx).map(|value| value.trim()).unwrap_or(""))
    };

    let all_blank = mapping
        .iter()
        .all(|(field, _)| cell(field).is_none_or(str::is_empty));
    if all_blank {
        return Ok(NormalizedRow::Blank);
    }

    let required_text = |field: CanonicalField| -> Result<String, NormalizationError> {
        match cell(field) {
            Some(value) if !value.is_empty() => Ok(value.to_string()),
            Some(_) => Err(NormalizationError::MissingRequired { field }),
            // Column never resolved: degrade rather than reject; the
            // deficiency is already in the run report.
            None => Ok(String::new()),
        }
    };

    let date = match cell(CanonicalField::Date) {
        Some(value) if !value.is_empty() => {
            parse_date(value).ok_or_else(|| NormalizationError::invalid(CanonicalField::Date, value))?
        }
        Some(_) => return Err(NormalizationError::MissingRequired {
            field: CanonicalField::Date,
        }),
        None => return Err(NormalizationError::MissingRequired {
            field: CanonicalField::Date,
        }),
    };

    let from = required_text(CanonicalField::From)?;
    let to = required_text(CanonicalField::To)?;
    let registration = required_text(CanonicalField::Registration)?;
    let aircraft_type = required_text(CanonicalField::AircraftType)?;

    let mut durations = Durations::default();
    for field in CanonicalField::ALL {
        if field.kind() != FieldKind::Duration {
            continue;
        }
        let Some(value) = cell(field) else {
            continue; // unmapped: defaults to zero
        };
        if field == CanonicalField::TotalTime && value.is_empty() {
            return Err(NormalizationError::MissingRequired { field });
        }
        let hours = parse_duration(value)
            .ok_or_else(|| NormalizationError::invalid(field, value))?;
        durations.set(field, hours);
    }

    let parse_count_cell = |field: CanonicalField| -> Result<u32, NormalizationError> {
        match cell(field) {
            Some(value) => {
                parse_count(value).ok_or_else(|| NormalizationError::invalid(field, value))
            }
            None => Ok(0),
        }
    };
    let day_landings = parse_count_cell(CanonicalField::DayLandings)?;
    let night_landings = parse_count_cell(CanonicalField::NightLandings)?;

    let distance_nm = match cell(CanonicalField::Distance) {
        Some(value) => parse_distance(value)
            .ok_or_else(|| NormalizationError::invalid(CanonicalField::Distance, value))?,
        None => None,
    };

    let text = |field: CanonicalField| cell(field).unwrap_or_default().to_string();

    Ok(NormalizedRow::Record(FlightRecord {
        date,
        from,
        to,
        registration,
        aircraft_type,
        engine_type: text(CanonicalField::EngineType),
        class: text(CanonicalField::Class),
        durations,
        day_landings,
        night_landings,
        instructor: text(CanonicalField::Instructor),
        remarks: text(CanonicalField::Remarks),
        distance_nm,
    }))
}
