//! Excel workbook reading via calamine.

use std::path::Path;

use calamine::{DataType, Reader, open_workbook_auto};
use tracing::debug;

use crate::error::IngestError;
use crate::table::{RawTable, assemble};

/// The sheet the standardized logbook keeps its rows on; other workbooks
/// fall back to their first sheet.
const PREFERRED_SHEET: &str = "Flight Log";

/// Read the flight table from an Excel workbook (`.xlsx`, `.xls`,
/// `.xlsm`).
pub fn read_workbook(path: &Path) -> Result<RawTable, IngestError> {
    let mut workbook =
        open_workbook_auto(path).map_err(|source| IngestError::excel(path, source))?;

    let sheet_name = if workbook
        .sheet_names()
        .iter()
        .any(|name| name.as_str() == PREFERRED_SHEET)
    {
        PREFERRED_SHEET.to_string()
    } else {
        workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| IngestError::EmptyWorkbook {
                path: path.to_path_buf(),
            })?
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .ok_or_else(|| IngestError::EmptyWorkbook {
            path: path.to_path_buf(),
        })?
        .map_err(|source| IngestError::excel(path, source))?;

    let raw_rows: Vec<Vec<String>> = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();

    let table = assemble(raw_rows);
    debug!(
        path = %path.display(),
        sheet = %sheet_name,
        rows = table.rows.len(),
        "read excel workbook"
    );
    Ok(table)
}

/// Render a cell the way the normalizer's grammars expect: dates as ISO,
/// numbers without float noise, everything else trimmed text.
fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::Empty => String::new(),
        DataType::String(text) => text.trim().to_string(),
        DataType::Int(value) => value.to_string(),
        DataType::Float(value) => format_numeric(*value),
        DataType::Bool(value) => if *value { "TRUE" } else { "FALSE" }.to_string(),
        DataType::DateTime(serial) => excel_serial_to_string(*serial),
        DataType::Duration(value) => format_numeric(*value * 24.0),
        DataType::DateTimeIso(text) | DataType::DurationIso(text) => text.trim().to_string(),
        DataType::Error(_) => String::new(),
    }
}

/// Excel serial dates count days from 1899-12-30, with the fraction as
/// time of day. Whole-day values render as bare dates.
fn excel_serial_to_string(serial: f64) -> String {
    let Some(base) = chrono::NaiveDate::from_ymd_opt(1899, 12, 30) else {
        return String::new();
    };
    let days = serial.floor() as i64;
    let seconds = ((serial - serial.floor()) * 86_400.0).round() as i64;
    let date = base + chrono::Duration::days(days);
    if seconds == 0 {
        date.format("%Y-%m-%d").to_string()
    } else {
        let datetime = date.and_time(chrono::NaiveTime::MIN) + chrono::Duration::seconds(seconds);
        datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
    }
}

fn format_numeric(value: f64) -> String {
    let formatted = format!("{value}");
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_lose_float_noise() {
        assert_eq!(format_numeric(1.5), "1.5");
        assert_eq!(format_numeric(2.0), "2");
        assert_eq!(format_numeric(0.25), "0.25");
    }

    #[test]
    fn cells_render_for_the_grammar() {
        assert_eq!(cell_to_string(&DataType::Empty), "");
        assert_eq!(cell_to_string(&DataType::String(" KVRB ".into())), "KVRB");
        assert_eq!(cell_to_string(&DataType::Float(1.5)), "1.5");
        assert_eq!(cell_to_string(&DataType::Int(3)), "3");
        assert_eq!(cell_to_string(&DataType::Bool(true)), "TRUE");
    }

    #[test]
    fn serial_dates_render_iso() {
        // 2024-01-15 is serial 45306.
        assert_eq!(excel_serial_to_string(45306.0), "2024-01-15");
        assert_eq!(excel_serial_to_string(45306.5), "2024-01-15T12:00:00");
    }
}
