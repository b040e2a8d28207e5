//! Normalized flight records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::fields::CanonicalField;
use crate::hours::Hours;

/// The duration fields of one flight, all non-negative.
///
/// Durations may legitimately overlap (night time is also PIC time, and so
/// on); nothing here enforces that they sum to the total.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub total: Hours,
    pub pic: Hours,
    pub sic: Hours,
    pub night: Hours,
    pub cross_country: Hours,
    pub actual_instrument: Hours,
    pub simulated_instrument: Hours,
    pub dual_received: Hours,
    pub dual_given: Hours,
    pub solo: Hours,
    pub multi_pilot: Hours,
    pub simulator: Hours,
}

impl Durations {
    /// Look up a duration by canonical field. Returns `None` for fields
    /// that are not duration-kind.
    pub fn get(&self, field: CanonicalField) -> Option<Hours> {
        match field {
            CanonicalField::TotalTime => Some(self.total),
            CanonicalField::Pic => Some(self.pic),
            CanonicalField::Sic => Some(self.sic),
            CanonicalField::Night => Some(self.night),
            CanonicalField::CrossCountry => Some(self.cross_country),
            CanonicalField::ActualInstrument => Some(self.actual_instrument),
            CanonicalField::SimulatedInstrument => Some(self.simulated_instrument),
            CanonicalField::DualReceived => Some(self.dual_received),
            CanonicalField::DualGiven => Some(self.dual_given),
            CanonicalField::Solo => Some(self.solo),
            CanonicalField::MultiPilot => Some(self.multi_pilot),
            CanonicalField::Simulator => Some(self.simulator),
            _ => None,
        }
    }

    /// Set a duration by canonical field. Returns false for fields that are
    /// not duration-kind.
    pub fn set(&mut self, field: CanonicalField, value: Hours) -> bool {
        let slot = match field {
            CanonicalField::TotalTime => &mut self.total,
            CanonicalField::Pic => &mut self.pic,
            CanonicalField::Sic => &mut self.sic,
            CanonicalField::Night => &mut self.night,
            CanonicalField::CrossCountry => &mut self.cross_country,
            CanonicalField::ActualInstrument => &mut self.actual_instrument,
            CanonicalField::SimulatedInstrument => &mut self.simulated_instrument,
            CanonicalField::DualReceived => &mut self.dual_received,
            CanonicalField::DualGiven => &mut self.dual_given,
            CanonicalField::Solo => &mut self.solo,
            CanonicalField::MultiPilot => &mut self.multi_pilot,
            CanonicalField::Simulator => &mut self.simulator,
            _ => return false,
        };
        *slot = value;
        true
    }
}

/// One normalized flight.
///
/// Constructed once per source row by the normalizer and treated as
/// immutable from then on; the classifier and aggregator only read it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightRecord {
    pub date: NaiveDate,
    /// Departure airport code, e.g. "LLHZ".
    pub from: String,
    /// Arrival airport code.
    pub to: String,
    pub registration: String,
    pub aircraft_type: String,
    /// Engine metadata when the source provides it; empty otherwise.
    pub engine_type: String,
    /// Aircraft class metadata when the source provides it; empty otherwise.
    pub class: String,
    pub durations: Durations,
    pub day_landings: u32,
    pub night_landings: u32,
    /// Empty string means no instructor aboard.
    pub instructor: String,
    pub remarks: String,
    /// Great-circle leg distance in nautical miles, when a provider knew
    /// both airports. `None` means cross-country status is unknown from
    /// distance alone.
    pub distance_nm: Option<f64>,
}

impl FlightRecord {
    /// Day portion of the flight: total minus night, floored at zero.
    pub fn day_time(&self) -> Hours {
        self.durations
            .total
            .saturating_sub(self.durations.night)
            .max(Hours::ZERO)
    }

    pub fn has_instructor(&self) -> bool {
        !self.instructor.is_empty() || self.durations.dual_received.is_positive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> FlightRecord {
        FlightRecord {
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            from: "KVRB".to_string(),
            to: "KFPR".to_string(),
            registration: "N12345".to_string(),
            aircraft_type: "C172".to_string(),
            engine_type: String::new(),
            class: String::new(),
            durations: Durations {
                total: Hours::from_f64(2.0),
                night: Hours::from_f64(0.5),
                ..Durations::default()
            },
            day_landings: 1,
            night_landings: 1,
            instructor: String::new(),
            remarks: String::new(),
            distance_nm: None,
        }
    }

    #[test]
    fn day_time_is_total_minus_night() {
        assert_eq!(record().day_time(), Hours::from_f64(1.5));
    }

    #[test]
    fn instructor_presence() {
        let mut r = record();
        assert!(!r.has_instructor());
        r.instructor = "J. Smith".to_string();
        assert!(r.has_instructor());
        r.instructor.clear();
        r.durations.dual_received = Hours::from_f64(1.0);
        assert!(r.has_instructor());
    }

    #[test]
    fn durations_get_set_round_trip() {
        let mut d = Durations::default();
        assert!(d.set(CanonicalField::Pic, Hours::from_f64(1.2)));
        assert_eq!(d.get(CanonicalField::Pic), Some(Hours::from_f64(1.2)));
        assert!(!d.set(CanonicalField::Remarks, Hours::ZERO));
        assert_eq!(d.get(CanonicalField::Remarks), None);
    }
}
