//! Canonical logbook fields.
//!
//! Every source column that survives mapping resolves to exactly one of
//! these fields. The set is closed: new source layouts are handled by the
//! alias table and the explicit mapping file, never by extending this enum
//! at runtime.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of canonical logbook fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalField {
    Date,
    From,
    To,
    Registration,
    AircraftType,
    EngineType,
    Class,
    TotalTime,
    Pic,
    Sic,
    Night,
    CrossCountry,
    ActualInstrument,
    SimulatedInstrument,
    DualReceived,
    DualGiven,
    Solo,
    MultiPilot,
    Simulator,
    DayLandings,
    NightLandings,
    Instructor,
    Remarks,
    Distance,
}

/// What a field's cell values are parsed as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Calendar date, several accepted grammars.
    Date,
    /// Decimal hours (plain decimal, H:MM, or comma-decimal).
    Duration,
    /// Non-negative integer count (landings).
    Count,
    /// Trimmed free text.
    Text,
    /// Nautical miles; accepts thousands separators.
    Distance,
}

impl CanonicalField {
    /// All canonical fields, in a stable order suitable for reports.
    pub const ALL: [CanonicalField; 24] = [
        CanonicalField::Date,
        CanonicalField::From,
        CanonicalField::To,
        CanonicalField::Registration,
        CanonicalField::AircraftType,
        CanonicalField::EngineType,
        CanonicalField::Class,
        CanonicalField::TotalTime,
        CanonicalField::Pic,
        CanonicalField::Sic,
        CanonicalField::Night,
        CanonicalField::CrossCountry,
        CanonicalField::ActualInstrument,
        CanonicalField::SimulatedInstrument,
        CanonicalField::DualReceived,
        CanonicalField::DualGiven,
        CanonicalField::Solo,
        CanonicalField::MultiPilot,
        CanonicalField::Simulator,
        CanonicalField::DayLandings,
        CanonicalField::NightLandings,
        CanonicalField::Instructor,
        CanonicalField::Remarks,
        CanonicalField::Distance,
    ];

    /// Fields that must resolve for a usable record batch.
    pub const REQUIRED: [CanonicalField; 6] = [
        CanonicalField::Date,
        CanonicalField::From,
        CanonicalField::To,
        CanonicalField::Registration,
        CanonicalField::AircraftType,
        CanonicalField::TotalTime,
    ];

    pub fn kind(self) -> FieldKind {
        match self {
            CanonicalField::Date => FieldKind::Date,
            CanonicalField::TotalTime
            | CanonicalField::Pic
            | CanonicalField::Sic
            | CanonicalField::Night
            | CanonicalField::CrossCountry
            | CanonicalField::ActualInstrument
            | CanonicalField::SimulatedInstrument
            | CanonicalField::DualReceived
            | CanonicalField::DualGiven
            | CanonicalField::Solo
            | CanonicalField::MultiPilot
            | CanonicalField::Simulator => FieldKind::Duration,
            CanonicalField::DayLandings | CanonicalField::NightLandings => FieldKind::Count,
            CanonicalField::Distance => FieldKind::Distance,
            CanonicalField::From
            | CanonicalField::To
            | CanonicalField::Registration
            | CanonicalField::AircraftType
            | CanonicalField::EngineType
            | CanonicalField::Class
            | CanonicalField::Instructor
            | CanonicalField::Remarks => FieldKind::Text,
        }
    }

    pub fn is_required(self) -> bool {
        Self::REQUIRED.contains(&self)
    }

    pub fn is_duration(self) -> bool {
        self.kind() == FieldKind::Duration
    }

    /// Human-readable name as used in mapping files and reports.
    pub fn display_name(self) -> &'static str {
        match self {
            CanonicalField::Date => "Date",
            CanonicalField::From => "From Airport",
            CanonicalField::To => "To Airport",
            CanonicalField::Registration => "Registration",
            CanonicalField::AircraftType => "Aircraft Type",
            CanonicalField::EngineType => "Engine Type",
            CanonicalField::Class => "Class",
            CanonicalField::TotalTime => "Total Time",
            CanonicalField::Pic => "PIC",
            CanonicalField::Sic => "SIC",
            CanonicalField::Night => "Night",
            CanonicalField::CrossCountry => "Cross Country",
            CanonicalField::ActualInstrument => "Actual Instrument",
            CanonicalField::SimulatedInstrument => "Simulated Instrument",
            CanonicalField::DualReceived => "Dual Received",
            CanonicalField::DualGiven => "Dual Given",
            CanonicalField::Solo => "Solo",
            CanonicalField::MultiPilot => "Multi-Pilot",
            CanonicalField::Simulator => "Simulator",
            CanonicalField::DayLandings => "Day Landings",
            CanonicalField::NightLandings => "Night Landings",
            CanonicalField::Instructor => "Instructor",
            CanonicalField::Remarks => "Remarks",
            CanonicalField::Distance => "Distance (NM)",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CanonicalField {
    type Err = String;

    /// Parse a canonical field name, tolerating case and separator noise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .to_lowercase()
            .chars()
            .filter(|ch| ch.is_ascii_alphanumeric())
            .collect();
        for field in CanonicalField::ALL {
            let canonical: String = field
                .display_name()
                .to_lowercase()
                .chars()
                .filter(|ch| ch.is_ascii_alphanumeric())
                .collect();
            if normalized == canonical {
                return Ok(field);
            }
        }
        // Short forms used by mapping files
        match normalized.as_str() {
            "from" => Ok(CanonicalField::From),
            "to" => Ok(CanonicalField::To),
            "total" | "totaltime" => Ok(CanonicalField::TotalTime),
            "xc" | "crosscountry" => Ok(CanonicalField::CrossCountry),
            "distance" | "distancenm" => Ok(CanonicalField::Distance),
            _ => Err(format!("unknown canonical field: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_fields_are_marked() {
        assert!(CanonicalField::Date.is_required());
        assert!(CanonicalField::TotalTime.is_required());
        assert!(!CanonicalField::Remarks.is_required());
        assert!(!CanonicalField::Sic.is_required());
    }

    #[test]
    fn parse_display_names() {
        assert_eq!("PIC".parse::<CanonicalField>().unwrap(), CanonicalField::Pic);
        assert_eq!(
            "cross country".parse::<CanonicalField>().unwrap(),
            CanonicalField::CrossCountry
        );
        assert_eq!(
            "Distance (NM)".parse::<CanonicalField>().unwrap(),
            CanonicalField::Distance
        );
        assert!("no such field".parse::<CanonicalField>().is_err());
    }

    #[test]
    fn kinds_cover_every_field() {
        for field in CanonicalField::ALL {
            // kind() is total; this is a compile-time exhaustiveness guard in practice
            let _ = field.kind();
        }
        assert_eq!(CanonicalField::Simulator.kind(), FieldKind::Duration);
        assert_eq!(CanonicalField::DayLandings.kind(), FieldKind::Count);
        assert_eq!(CanonicalField::Distance.kind(), FieldKind::Distance);
    }
}
