//! Finalized form values.

use std::collections::BTreeMap;

use caai_model::{AircraftGroup, Hours};

use crate::accumulator::{DeviceStats, FormAccumulator, SoloCrossCountry, TypeStats};

/// One Table 1 row: an aircraft type and its buckets.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct TypeRow {
    pub type_code: String,
    pub stats: TypeStats,
}

/// One Table 2 device row.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct DeviceRow {
    pub type_code: String,
    pub stats: DeviceStats,
}

/// Grand totals across every folded flight.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct GrandTotals {
    pub pic: Hours,
    pub sic: Hours,
    pub student: Hours,
    /// PIC + SIC + Student: the hours the form accounts for.
    pub form_total: Hours,
    /// Regulation 42(b): PIC + SIC/2 + Student, halved once here and
    /// never per-flight.
    pub overall_total: Hours,
    /// All aircraft hours flown, excluded hours included, devices not.
    pub total_time: Hours,
    pub night: Hours,
    pub night_pic: Hours,
    pub night_pic_xc: Hours,
    pub night_student: Hours,
    pub pic_xc: Hours,
    /// Cross-country hours regardless of role (ATPL line).
    pub xc_all_roles: Hours,
    pub solo: Hours,
    pub solo_xc: Hours,
    /// Student hours (dual received).
    pub dual_received: Hours,
    /// Instrument time logged during instruction.
    pub dual_instrument: Hours,
    pub instrument_actual: Hours,
    pub instrument_simulated: Hours,
    /// Actual plus simulated instrument time in aircraft.
    pub instrument_aircraft: Hours,
    pub device_hours: Hours,
    pub complex_hours: Hours,
    pub multi_engine_hours: Hours,
    pub safety_pilot_excluded: Hours,
    pub day_landings: u32,
    pub night_landings: u32,
}

/// Everything the form writer needs, finalized and immutable.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct FormValues {
    /// Table 1 rows ordered by descending form total, ties by type code.
    pub type_rows: Vec<TypeRow>,
    pub device_rows: Vec<DeviceRow>,
    /// Table 1 per-group totals: PIC + SIC + Student for the group.
    pub group_totals: BTreeMap<AircraftGroup, Hours>,
    pub grand: GrandTotals,
    pub longest_solo_xc: Option<SoloCrossCountry>,
    pub unresolved_types: Vec<String>,
    pub notes: Vec<String>,
}

impl FormAccumulator {
    /// Finalize the accumulated state into form values.
    ///
    /// Pure read: calling it twice on the same accumulator returns
    /// identical values, and folded flights are never touched.
    pub fn finalize(&self) -> FormValues {
        let mut type_rows: Vec<TypeRow> = self
            .types
            .iter()
            .map(|(type_code, stats)| TypeRow {
                type_code: type_code.clone(),
                stats: stats.clone(),
            })
            .collect();
        type_rows.sort_by(|a, b| {
            b.stats
                .form_total
                .cmp(&a.stats.form_total)
                .then_with(|| a.type_code.cmp(&b.type_code))
        });

        let device_rows: Vec<DeviceRow> = self
            .devices
            .iter()
            .map(|(type_code, stats)| DeviceRow {
                type_code: type_code.clone(),
                stats: stats.clone(),
            })
            .collect();

        let mut group_totals: BTreeMap<AircraftGroup, Hours> = BTreeMap::new();
        let mut pic = Hours::ZERO;
        let mut sic = Hours::ZERO;
        let mut student = Hours::ZERO;
        for stats in self.types.values() {
            *group_totals.entry(stats.group).or_default() += stats.form_total;
            pic += stats.pic.total();
            sic += stats.sic.total();
            student += stats.student.total();
        }

        let form_total = pic + sic + student;
        let overall_total = pic + sic.half() + student;

        let grand = GrandTotals {
            pic,
            sic,
            student,
            form_total,
            overall_total,
            total_time: self.total_time,
            night: self.night,
            night_pic: self.night_pic,
            night_pic_xc: self.night_pic_xc,
            night_student: self.night_student,
            pic_xc: self.pic_xc,
            xc_all_roles: self.xc_all_roles,
            solo: self.solo,
            solo_xc: self.solo_xc,
            dual_received: student,
            dual_instrument: self.dual_instrument,
            instrument_actual: self.instrument_actual,
            instrument_simulated: self.instrument_simulated,
            instrument_aircraft: self.instrument_actual + self.instrument_simulated,
            device_hours: self.device_hours,
            complex_hours: self.complex_hours,
            multi_engine_hours: self.multi_engine_hours,
            safety_pilot_excluded: self.safety_pilot_excluded,
            day_landings: self.day_landings,
            night_landings: self.night_landings,
        };

        FormValues {
            type_rows,
            device_rows,
            group_totals,
            grand,
            longest_solo_xc: self.longest_solo_xc.clone(),
            unresolved_types: self.unresolved_types.iter().cloned().collect(),
            notes: self.notes.iter().cloned().collect(),
        }
    }
}
