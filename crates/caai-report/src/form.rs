//! Tofes-shaot workbook writer.
//!
//! Writes the finalized [`FormValues`] into the regulator form's cell
//! layout: a summary sheet (Table 1 type rows and Table 2 instrument
//! rows), the CPL sheet, and the ATPL sheet. The cell coordinates are a
//! fixed table that mirrors the official form; they are configuration,
//! not logic.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};
use tracing::warn;

use caai_model::{AircraftGroup, Hours};

use crate::error::ReportError;
use crate::values::FormValues;

const SUMMARY_SHEET: &str = "סיכום ניסיון תעופתי";
const CPL_SHEET: &str = "רישיון טיס מסחרי";
const ATPL_SHEET: &str = "רישיון טיס תובלה בנתיבי אוויר";

/// The form has ten Table 1 rows; anything beyond is truncated (and the
/// pipeline reports it).
pub const MAX_TYPE_ROWS: usize = 10;

// Summary sheet layout (0-based rows/columns).
const TABLE1_FIRST_ROW: u32 = 12;
const TABLE1_TYPE_COL: u16 = 1;
const TABLE1_ROLE_COLS: u16 = 12; // day PIC, day PIC-XC, day SIC, day Student, then night
const TABLE2_FIRST_ROW: u32 = 30;
const TABLE2_ACTUAL_COL: u16 = 2;
const TABLE2_SIM_COL: u16 = 3;
const TABLE2_DEVICE_COL: u16 = 4;

// CPL sheet rows (column C holds the value).
const CPL_VALUE_COL: u16 = 2;
const CPL_PIC_XC_ROW: u32 = 11;
const CPL_DUAL_ROW: u32 = 12;
const CPL_DUAL_INSTRUMENT_ROW: u32 = 13;
const CPL_NIGHT_LANDINGS_ROW: u32 = 14;
const CPL_NIGHT_HOURS_ROW: u32 = 15;
const CPL_SOLO_XC_ROW: u32 = 16;
const CPL_SOLO_XC_DATE_COL: u16 = 7;
const CPL_SOLO_XC_KM_COL: u16 = 10;
const CPL_SOLO_XC_ROUTE_COL: u16 = 13;
const CPL_COMPLEX_ROW: u32 = 17;

// ATPL sheet rows (column C holds the value).
const ATPL_VALUE_COL: u16 = 2;
const ATPL_XC_ROW: u32 = 12;
const ATPL_NIGHT_PIC_XC_ROW: u32 = 13;
const ATPL_INSTRUMENT_ROW: u32 = 14;

/// Table 1 group columns, in form order.
fn group_column(group: AircraftGroup) -> Option<u16> {
    match group {
        AircraftGroup::A => Some(2),
        AircraftGroup::D => Some(3),
        AircraftGroup::B => Some(4),
        AircraftGroup::C => Some(5),
        AircraftGroup::Unresolved => None,
    }
}

/// Write the filled form as a new workbook at `path`.
pub fn write_form(path: &Path, values: &FormValues) -> Result<(), ReportError> {
    let mut workbook = Workbook::new();
    let hours_format = Format::new().set_num_format("0.0");
    let count_format = Format::new().set_num_format("0");

    let summary = workbook.add_worksheet();
    summary.set_name(SUMMARY_SHEET)?;
    write_summary(summary, values, &hours_format)?;

    let cpl = workbook.add_worksheet();
    cpl.set_name(CPL_SHEET)?;
    write_cpl(cpl, values, &hours_format, &count_format)?;

    let atpl = workbook.add_worksheet();
    atpl.set_name(ATPL_SHEET)?;
    write_atpl(atpl, values, &hours_format)?;

    workbook.save(path)?;
    Ok(())
}

fn write_hours(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    hours: Hours,
    format: &Format,
) -> Result<(), ReportError> {
    if hours.is_positive() {
        sheet.write_number_with_format(row, col, hours.rounded_tenths(), format)?;
    }
    Ok(())
}

fn write_summary(
    sheet: &mut Worksheet,
    values: &FormValues,
    hours_format: &Format,
) -> Result<(), ReportError> {
    if values.type_rows.len() > MAX_TYPE_ROWS {
        warn!(
            types = values.type_rows.len(),
            max = MAX_TYPE_ROWS,
            "more aircraft types than form rows; truncating"
        );
    }

    for (offset, row_values) in values.type_rows.iter().take(MAX_TYPE_ROWS).enumerate() {
        let row = TABLE1_FIRST_ROW + offset as u32;
        let stats = &row_values.stats;
        sheet.write_string(row, TABLE1_TYPE_COL, &row_values.type_code)?;
        if let Some(col) = group_column(stats.group) {
            write_hours(sheet, row, col, stats.form_total, hours_format)?;
        }
        let buckets = [
            stats.pic.day,
            stats.pic_xc.day,
            stats.sic.day,
            stats.student.day,
            stats.pic.night,
            stats.pic_xc.night,
            stats.sic.night,
            stats.student.night,
        ];
        for (idx, bucket) in buckets.iter().enumerate() {
            write_hours(
                sheet,
                row,
                TABLE1_ROLE_COLS + idx as u16,
                *bucket,
                hours_format,
            )?;
        }
    }

    // Table 2: instrument time per type, device time merged onto the row
    // of the device's base aircraft type where one exists.
    let mut table2_extra = Vec::new();
    for device in &values.device_rows {
        let base = device_base_type(&device.type_code);
        let position = values
            .type_rows
            .iter()
            .take(MAX_TYPE_ROWS)
            .position(|row| row.type_code == base);
        match position {
            Some(idx) => table2_extra.push((idx, device.stats.hours)),
            None => table2_extra.push((usize::MAX, Hours::ZERO)), // placed below
        }
    }

    for (offset, row_values) in values.type_rows.iter().take(MAX_TYPE_ROWS).enumerate() {
        let row = TABLE2_FIRST_ROW + offset as u32;
        sheet.write_string(row, TABLE1_TYPE_COL, &row_values.type_code)?;
        write_hours(
            sheet,
            row,
            TABLE2_ACTUAL_COL,
            row_values.stats.instrument_actual,
            hours_format,
        )?;
        write_hours(
            sheet,
            row,
            TABLE2_SIM_COL,
            row_values.stats.instrument_simulated,
            hours_format,
        )?;
        let device_hours: Hours = table2_extra
            .iter()
            .filter(|(idx, _)| *idx == offset)
            .map(|(_, hours)| *hours)
            .sum();
        write_hours(sheet, row, TABLE2_DEVICE_COL, device_hours, hours_format)?;
    }

    // Devices with no matching aircraft row get their own lines below.
    let mut next_row = TABLE2_FIRST_ROW + values.type_rows.len().min(MAX_TYPE_ROWS) as u32;
    for device in &values.device_rows {
        let base = device_base_type(&device.type_code);
        let matched = values
            .type_rows
            .iter()
            .take(MAX_TYPE_ROWS)
            .any(|row| row.type_code == base);
        if matched {
            continue;
        }
        sheet.write_string(next_row, TABLE1_TYPE_COL, &device.type_code)?;
        write_hours(
            sheet,
            next_row,
            TABLE2_DEVICE_COL,
            device.stats.hours,
            hours_format,
        )?;
        next_row += 1;
    }

    Ok(())
}

/// Strip device markers off a type code to find the aircraft row it
/// belongs to ("A320 FFS" -> "A320").
fn device_base_type(type_code: &str) -> String {
    let mut base = type_code.to_uppercase();
    for marker in ["FFS", "FTD", "SIM"] {
        if let Some(stripped) = base.strip_suffix(marker) {
            base = stripped.trim().to_string();
        }
    }
    base.trim().to_string()
}

fn write_cpl(
    sheet: &mut Worksheet,
    values: &FormValues,
    hours_format: &Format,
    count_format: &Format,
) -> Result<(), ReportError> {
    let grand = &values.grand;
    write_hours(sheet, CPL_PIC_XC_ROW, CPL_VALUE_COL, grand.pic_xc, hours_format)?;
    write_hours(sheet, CPL_DUAL_ROW, CPL_VALUE_COL, grand.dual_received, hours_format)?;
    write_hours(
        sheet,
        CPL_DUAL_INSTRUMENT_ROW,
        CPL_VALUE_COL,
        grand.dual_instrument,
        hours_format,
    )?;
    sheet.write_number_with_format(
        CPL_NIGHT_LANDINGS_ROW,
        CPL_VALUE_COL,
        f64::from(grand.night_landings),
        count_format,
    )?;
    write_hours(sheet, CPL_NIGHT_HOURS_ROW, CPL_VALUE_COL, grand.night, hours_format)?;

    if let Some(solo) = &values.longest_solo_xc {
        write_hours(sheet, CPL_SOLO_XC_ROW, CPL_VALUE_COL, solo.duration, hours_format)?;
        sheet.write_string(
            CPL_SOLO_XC_ROW,
            CPL_SOLO_XC_DATE_COL,
            &solo.date.format("%d/%m/%Y").to_string(),
        )?;
        let km = (solo.distance_nm * 1.852).round();
        sheet.write_number_with_format(CPL_SOLO_XC_ROW, CPL_SOLO_XC_KM_COL, km, count_format)?;
        sheet.write_string(
            CPL_SOLO_XC_ROW,
            CPL_SOLO_XC_ROUTE_COL,
            &format!("{}-{}", solo.from, solo.to),
        )?;
    }

    write_hours(
        sheet,
        CPL_COMPLEX_ROW,
        CPL_VALUE_COL,
        grand.complex_hours,
        hours_format,
    )?;
    Ok(())
}

fn write_atpl(
    sheet: &mut Worksheet,
    values: &FormValues,
    hours_format: &Format,
) -> Result<(), ReportError> {
    let grand = &values.grand;
    write_hours(sheet, ATPL_XC_ROW, ATPL_VALUE_COL, grand.xc_all_roles, hours_format)?;
    write_hours(
        sheet,
        ATPL_NIGHT_PIC_XC_ROW,
        ATPL_VALUE_COL,
        grand.night_pic_xc,
        hours_format,
    )?;
    write_hours(
        sheet,
        ATPL_INSTRUMENT_ROW,
        ATPL_VALUE_COL,
        grand.instrument_aircraft,
        hours_format,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_base_type_strips_markers() {
        assert_eq!(device_base_type("A320 FFS"), "A320");
        assert_eq!(device_base_type("C172 SIM"), "C172");
        assert_eq!(device_base_type("FRASCA"), "FRASCA");
    }

    #[test]
    fn empty_values_write_a_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("form.xlsx");
        write_form(&path, &FormValues::default()).unwrap();
        assert!(path.exists());
    }
}
