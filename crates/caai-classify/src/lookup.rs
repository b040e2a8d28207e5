//! Aircraft metadata lookups consumed by the rule engine.

use caai_model::{AircraftGroup, FlightRecord};
use caai_standards::AircraftRegistry;

/// How the engine asks about aircraft. The registry in `caai-standards`
/// is the production implementation; tests substitute fixed answers.
pub trait GroupLookup {
    /// CAAI group for a record's aircraft, `Unresolved` when unknown.
    fn group_of(&self, record: &FlightRecord) -> AircraftGroup;

    /// Retractable gear and a variable-pitch propeller.
    fn is_complex(&self, aircraft_type: &str) -> bool;

    /// Ground training device rather than an aircraft.
    fn is_device(&self, aircraft_type: &str, registration: &str) -> bool;

    /// Normalized type code used as the aggregation key.
    fn type_code(&self, aircraft_type: &str) -> String {
        aircraft_type.trim().to_uppercase()
    }
}

impl GroupLookup for AircraftRegistry {
    fn group_of(&self, record: &FlightRecord) -> AircraftGroup {
        self.group_of(&record.aircraft_type, &record.engine_type, &record.class)
    }

    fn is_complex(&self, aircraft_type: &str) -> bool {
        AircraftRegistry::is_complex(self, aircraft_type)
    }

    fn is_device(&self, aircraft_type: &str, registration: &str) -> bool {
        AircraftRegistry::is_device(self, aircraft_type, registration)
    }

    fn type_code(&self, aircraft_type: &str) -> String {
        self.normalize_type(aircraft_type)
    }
}

/// Fixed-answer lookup for tests.
#[derive(Debug, Clone, Copy)]
pub struct StaticLookup {
    pub group: AircraftGroup,
    pub complex: bool,
    pub device: bool,
}

impl StaticLookup {
    pub fn group(group: AircraftGroup) -> Self {
        Self {
            group,
            complex: false,
            device: false,
        }
    }
}

impl GroupLookup for StaticLookup {
    fn group_of(&self, _record: &FlightRecord) -> AircraftGroup {
        self.group
    }

    fn is_complex(&self, _aircraft_type: &str) -> bool {
        self.complex
    }

    fn is_device(&self, _aircraft_type: &str, _registration: &str) -> bool {
        self.device
    }
}
