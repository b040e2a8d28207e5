//! CAAI aircraft groups.
//!
//! The tofes-shaot splits Table 1 hours across four aircraft groups, named
//! by Hebrew letters on the form:
//!
//! - Group A (א) — single-engine piston
//! - Group B (ב) — multi-engine piston
//! - Group C (ג) — multi-engine jet/turboprop
//! - Group D (ד) — single-engine turboprop

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum AircraftGroup {
    /// Single-engine piston.
    A,
    /// Multi-engine piston.
    B,
    /// Multi-engine jet/turboprop.
    C,
    /// Single-engine turboprop.
    D,
    /// Type code not found in the registry. Surfaced in the run report;
    /// never silently bucketed into group A.
    #[default]
    Unresolved,
}

impl AircraftGroup {
    /// The four resolvable groups, in form column order.
    pub const RESOLVED: [AircraftGroup; 4] = [
        AircraftGroup::A,
        AircraftGroup::B,
        AircraftGroup::C,
        AircraftGroup::D,
    ];

    pub fn is_single_engine(self) -> bool {
        matches!(self, AircraftGroup::A | AircraftGroup::D)
    }

    pub fn is_multi_engine(self) -> bool {
        matches!(self, AircraftGroup::B | AircraftGroup::C)
    }

    /// The Hebrew group letter printed on the form.
    pub fn hebrew_letter(self) -> &'static str {
        match self {
            AircraftGroup::A => "א",
            AircraftGroup::B => "ב",
            AircraftGroup::C => "ג",
            AircraftGroup::D => "ד",
            AircraftGroup::Unresolved => "?",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            AircraftGroup::A => "single-engine piston",
            AircraftGroup::B => "multi-engine piston",
            AircraftGroup::C => "multi-engine jet/turboprop",
            AircraftGroup::D => "single-engine turboprop",
            AircraftGroup::Unresolved => "unresolved",
        }
    }
}

impl fmt::Display for AircraftGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AircraftGroup::A => write!(f, "A"),
            AircraftGroup::B => write!(f, "B"),
            AircraftGroup::C => write!(f, "C"),
            AircraftGroup::D => write!(f, "D"),
            AircraftGroup::Unresolved => write!(f, "unresolved"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_count_split() {
        assert!(AircraftGroup::A.is_single_engine());
        assert!(AircraftGroup::D.is_single_engine());
        assert!(AircraftGroup::B.is_multi_engine());
        assert!(AircraftGroup::C.is_multi_engine());
        assert!(!AircraftGroup::Unresolved.is_single_engine());
        assert!(!AircraftGroup::Unresolved.is_multi_engine());
    }
}
