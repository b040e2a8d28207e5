//! Classified flights: the output of the rule engine.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::aircraft::AircraftGroup;
use crate::hours::Hours;
use crate::record::FlightRecord;

/// The mutually exclusive role a flight's hours credit toward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RoleCategory {
    /// Dual instruction received; cannot simultaneously credit PIC.
    Student,
    Pic,
    Sic,
    /// Safety-pilot time on a single-engine aircraft; excluded from every
    /// form total.
    SafetyPilotExcluded,
}

impl fmt::Display for RoleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RoleCategory::Student => "Student",
            RoleCategory::Pic => "PIC",
            RoleCategory::Sic => "SIC",
            RoleCategory::SafetyPilotExcluded => "Safety Pilot",
        };
        write!(f, "{name}")
    }
}

/// Hours credited per role for one flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleCredits {
    pub student: Hours,
    pub pic: Hours,
    pub sic: Hours,
    pub safety_pilot_excluded: Hours,
}

impl RoleCredits {
    /// Sum of the form-countable roles (excluded hours not included).
    pub fn form_total(&self) -> Hours {
        self.student + self.pic + self.sic
    }

    /// Sum of every credited role, excluded hours included.
    pub fn total(&self) -> Hours {
        self.form_total() + self.safety_pilot_excluded
    }

    pub fn get(&self, role: RoleCategory) -> Hours {
        match role {
            RoleCategory::Student => self.student,
            RoleCategory::Pic => self.pic,
            RoleCategory::Sic => self.sic,
            RoleCategory::SafetyPilotExcluded => self.safety_pilot_excluded,
        }
    }
}

/// A note attached during classification instead of failing the flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub message: String,
}

/// A [`FlightRecord`] plus everything the aggregator needs to bucket it.
///
/// Built once by the classification engine; never mutated afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifiedFlight {
    pub record: FlightRecord,
    /// Normalized aircraft type code ("C172R" folds to "C172"); the
    /// aggregation key for per-type form rows.
    pub type_code: String,
    pub group: AircraftGroup,
    /// Primary role for day/night bucketing. `None` for training-device
    /// sessions, which never enter role totals.
    pub role: Option<RoleCategory>,
    pub credits: RoleCredits,
    /// Night portion of the flight, reported as a parallel breakdown of the
    /// primary role.
    pub night: Hours,
    pub is_cross_country: bool,
    pub is_complex: bool,
    /// Actual instrument time, recorded regardless of role for Table 2.
    pub instrument_actual: Hours,
    /// Simulated (hood) instrument time flown in the aircraft.
    pub instrument_simulated: Hours,
    /// True when this entry is a ground training device session.
    pub is_device_session: bool,
    /// Device time for Table 2; zero unless `is_device_session`.
    pub device_hours: Hours,
    pub advisories: Vec<Advisory>,
}

impl ClassifiedFlight {
    /// Day portion of the credited role's hours.
    pub fn day(&self) -> Hours {
        self.record.day_time()
    }

    /// True if any role credit survived classification.
    pub fn has_form_hours(&self) -> bool {
        self.credits.form_total().is_positive()
    }
}
