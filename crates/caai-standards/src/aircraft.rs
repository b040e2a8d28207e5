//! Aircraft type registry.
//!
//! Derives the CAAI group for an aircraft type code, normalizes variant
//! type spellings, and recognizes complex types and ground training
//! devices. The tables are fixed at build time; unknown types resolve to
//! [`AircraftGroup::Unresolved`] so the aggregator can report them instead
//! of guessing.

use std::sync::OnceLock;

use caai_model::AircraftGroup;

/// Known multi-engine type codes.
const MULTI_ENGINE_TYPES: &[&str] = &["A319", "A320", "B738", "BE76", "H25B", "PA44"];

/// Known multi-engine turbine types (group C rather than B).
const MULTI_ENGINE_TURBINE_TYPES: &[&str] = &["A319", "A320", "B738", "H25B"];

/// Known single-engine turboprop types (group D).
const SINGLE_ENGINE_TURBOPROP_TYPES: &[&str] = &["C208", "PC12", "TBM7", "TBM9"];

/// Known single-engine piston types (group A).
const SINGLE_ENGINE_PISTON_TYPES: &[&str] = &[
    "AA5", "BE36", "C150", "C152", "C172", "C177", "C182", "DA40", "P28A", "PA18", "PA28", "PA32",
    "SR20", "SR22",
];

/// Complex types: retractable gear and a variable-pitch propeller.
const COMPLEX_TYPES: &[&str] = &["BE76", "PA44"];

/// Variant spellings folded to a base type code.
const TYPE_NORMALIZATION: &[(&str, &str)] = &[
    ("C172K", "C172"),
    ("C172R", "C172"),
    ("C172S", "C172"),
    ("P28A-161", "PA28"),
    ("P28A-181", "PA28"),
];

/// Registration/type markers of ground training devices.
const DEVICE_TYPE_MARKERS: &[&str] = &["FFS", "FTD", "SIM"];
const DEVICE_REGISTRATION_MARKERS: &[&str] = &["CAE", "FLIGHT SAFETY", "FRASCA"];

/// Lookup over the static aircraft tables.
///
/// Engine/class metadata from the source row acts as a secondary signal for
/// types the tables do not list.
#[derive(Debug, Default)]
pub struct AircraftRegistry;

impl AircraftRegistry {
    pub fn new() -> Self {
        Self
    }

    /// The process-wide registry. The tables are static, so a single shared
    /// instance suffices.
    pub fn shared() -> &'static AircraftRegistry {
        static REGISTRY: OnceLock<AircraftRegistry> = OnceLock::new();
        REGISTRY.get_or_init(AircraftRegistry::new)
    }

    /// Fold variant type spellings to their base code ("C172R" -> "C172").
    pub fn normalize_type(&self, aircraft_type: &str) -> String {
        let upper = aircraft_type.trim().to_uppercase();
        for (variant, base) in TYPE_NORMALIZATION {
            if upper == *variant {
                return (*base).to_string();
            }
        }
        upper
    }

    /// CAAI group for a type code, with engine/class metadata as fallback.
    pub fn group_of(&self, aircraft_type: &str, engine_type: &str, class: &str) -> AircraftGroup {
        let normalized = self.normalize_type(aircraft_type);
        if normalized.is_empty() {
            return AircraftGroup::Unresolved;
        }

        if contains_any(&normalized, MULTI_ENGINE_TURBINE_TYPES) {
            return AircraftGroup::C;
        }
        if contains_any(&normalized, MULTI_ENGINE_TYPES) {
            return AircraftGroup::B;
        }
        if contains_any(&normalized, SINGLE_ENGINE_TURBOPROP_TYPES) {
            return AircraftGroup::D;
        }
        if SINGLE_ENGINE_PISTON_TYPES.contains(&normalized.as_str()) {
            return AircraftGroup::A;
        }

        // Type not in the tables: fall back on engine/class metadata.
        let engine = engine_type.trim().to_uppercase();
        let class = class.trim().to_uppercase();
        let multi = class.contains("MULTI") || class.contains("ME");
        let turbine =
            engine.contains("TURBO") || engine.contains("TURBINE") || engine.contains("JET");
        match (multi, turbine, engine.contains("PISTON") || class.contains("SINGLE")) {
            (true, true, _) => AircraftGroup::C,
            (true, false, _) if engine.contains("PISTON") => AircraftGroup::B,
            (false, true, _) => AircraftGroup::D,
            (false, false, true) => AircraftGroup::A,
            _ => AircraftGroup::Unresolved,
        }
    }

    pub fn is_single_engine(&self, aircraft_type: &str) -> bool {
        let normalized = self.normalize_type(aircraft_type);
        !contains_any(&normalized, MULTI_ENGINE_TYPES) && !normalized.contains("SIM")
    }

    /// Retractable gear plus variable-pitch propeller.
    pub fn is_complex(&self, aircraft_type: &str) -> bool {
        let normalized = self.normalize_type(aircraft_type);
        COMPLEX_TYPES.contains(&normalized.as_str())
    }

    /// True when the entry is a ground training device rather than an
    /// aircraft ("A320 FFS", a FRASCA registration, an ATP device id).
    pub fn is_device(&self, aircraft_type: &str, registration: &str) -> bool {
        let atype = aircraft_type.to_uppercase();
        let reg = registration.to_uppercase();
        if DEVICE_TYPE_MARKERS.iter().any(|marker| atype.contains(marker)) {
            return true;
        }
        if DEVICE_REGISTRATION_MARKERS
            .iter()
            .any(|marker| reg.contains(marker))
        {
            return true;
        }
        reg.split_whitespace().next() == Some("ATP")
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_groups() {
        let registry = AircraftRegistry::new();
        assert_eq!(registry.group_of("C172", "", ""), AircraftGroup::A);
        assert_eq!(registry.group_of("C172R", "", ""), AircraftGroup::A);
        assert_eq!(registry.group_of("PA44", "", ""), AircraftGroup::B);
        assert_eq!(registry.group_of("A319", "", ""), AircraftGroup::C);
        assert_eq!(registry.group_of("H25B", "", ""), AircraftGroup::C);
        assert_eq!(registry.group_of("PC12", "", ""), AircraftGroup::D);
    }

    #[test]
    fn unknown_type_is_unresolved_not_group_a() {
        let registry = AircraftRegistry::new();
        assert_eq!(registry.group_of("ZZZ9", "", ""), AircraftGroup::Unresolved);
        assert_eq!(registry.group_of("", "", ""), AircraftGroup::Unresolved);
    }

    #[test]
    fn metadata_fallback() {
        let registry = AircraftRegistry::new();
        assert_eq!(
            registry.group_of("XW1", "Piston", "Multi-Engine Land"),
            AircraftGroup::B
        );
        assert_eq!(
            registry.group_of("XW2", "Turboprop", "Single-Engine Land"),
            AircraftGroup::D
        );
    }

    #[test]
    fn device_detection() {
        let registry = AircraftRegistry::new();
        assert!(registry.is_device("A320 FFS", "N1"));
        assert!(registry.is_device("C172", "FRASCA 142"));
        assert!(registry.is_device("A319", "ATP - CTP TRAINING"));
        assert!(!registry.is_device("C172", "N12345"));
    }

    #[test]
    fn complex_types() {
        let registry = AircraftRegistry::new();
        assert!(registry.is_complex("PA44"));
        assert!(registry.is_complex("BE76"));
        assert!(!registry.is_complex("C172"));
    }

    #[test]
    fn single_engine_check() {
        let registry = AircraftRegistry::new();
        assert!(registry.is_single_engine("C172"));
        assert!(registry.is_single_engine("PC12"));
        assert!(!registry.is_single_engine("PA44"));
        assert!(!registry.is_single_engine("A319"));
    }
}
