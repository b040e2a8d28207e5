//! Airport coordinates and great-circle distances.
//!
//! A static ICAO coordinate table covers the airports seen in supported
//! logbooks; additional fields can be merged from a user-supplied JSON file
//! (`{"LLHZ": [32.3604, 34.8744], ...}`). Distances are haversine
//! nautical miles. A leg with an unknown endpoint yields `None` — never a
//! zero that would silently demote a cross-country flight.

use std::collections::BTreeMap;
use std::path::Path;

use crate::error::StandardsError;

/// Mean Earth radius in nautical miles.
const EARTH_RADIUS_NM: f64 = 3440.065;

/// Static coordinate table: ICAO/FAA code -> (latitude, longitude).
const AIRPORTS: &[(&str, (f64, f64))] = &[
    // Israel
    ("LLBG", (32.0114, 34.8867)),
    ("LLER", (29.9403, 34.9358)),
    ("LLES", (31.7448, 34.6870)),
    ("LLHA", (32.8094, 35.0431)),
    ("LLHZ", (32.1806, 34.8347)),
    ("LLIB", (32.9810, 35.5718)),
    ("LLMG", (32.5973, 35.2289)),
    ("LLRD", (31.9646, 34.7696)),
    // US - Florida and the southeast training corridor
    ("KAPF", (26.1526, -81.7753)),
    ("KCTY", (29.6322, -83.1048)),
    ("KDAB", (29.1799, -81.0581)),
    ("KDTS", (30.4001, -86.4715)),
    ("KEYW", (24.5561, -81.7596)),
    ("KFHB", (30.6118, -81.4612)),
    ("KFMY", (26.5866, -81.8633)),
    ("KFPR", (27.4951, -80.3683)),
    ("KFXE", (26.1973, -80.1707)),
    ("KGNV", (29.6900, -82.2718)),
    ("KIMM", (26.4332, -81.4010)),
    ("KJES", (31.5540, -81.8825)),
    ("KJWN", (36.1824, -86.8867)),
    ("KJZI", (32.7009, -80.0029)),
    ("KMKY", (25.9950, -81.6725)),
    ("KMLB", (28.1028, -80.6453)),
    ("KMTH", (24.7261, -81.0514)),
    ("KOBE", (27.2626, -80.8498)),
    ("KPBI", (26.6832, -80.0956)),
    ("KPGD", (26.9202, -81.9906)),
    ("KSEF", (27.4564, -81.3424)),
    ("KSGJ", (29.9592, -81.3397)),
    ("KSPG", (27.7651, -82.6270)),
    ("KSUA", (27.1817, -80.2211)),
    ("KTIX", (28.5148, -80.7992)),
    ("KTLH", (30.3965, -84.3503)),
    ("KVRB", (27.6556, -80.4179)),
    ("X14", (26.7620, -81.4424)),
    ("X51", (25.4876, -80.5569)),
    ("X59", (27.9609, -80.5589)),
];

/// Haversine great-circle distance in nautical miles.
pub fn haversine_nm(from: (f64, f64), to: (f64, f64)) -> f64 {
    let (lat1, lon1) = from;
    let (lat2, lon2) = to;
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();
    EARTH_RADIUS_NM * c
}

/// Coordinate lookup with optional user extensions.
#[derive(Debug, Clone)]
pub struct AirportIndex {
    coordinates: BTreeMap<String, (f64, f64)>,
}

impl Default for AirportIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl AirportIndex {
    /// Index over the built-in table only.
    pub fn new() -> Self {
        let coordinates = AIRPORTS
            .iter()
            .map(|(code, coords)| ((*code).to_string(), *coords))
            .collect();
        Self { coordinates }
    }

    /// Merge additional airports from a JSON file of
    /// `code -> [lat, lon]` entries. User entries override built-ins.
    pub fn with_custom_file(mut self, path: &Path) -> Result<Self, StandardsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|source| StandardsError::io(path, source))?;
        let extra: BTreeMap<String, (f64, f64)> = serde_json::from_str(&raw)
            .map_err(|source| StandardsError::json(path, source))?;
        for (code, coords) in extra {
            self.coordinates.insert(code.trim().to_uppercase(), coords);
        }
        Ok(self)
    }

    pub fn coordinates(&self, code: &str) -> Option<(f64, f64)> {
        self.coordinates.get(code.trim().to_uppercase().as_str()).copied()
    }

    /// Leg distance in NM, or `None` when either endpoint is unknown.
    /// Same-airport legs (pattern work) are 0.
    pub fn leg_distance_nm(&self, from: &str, to: &str) -> Option<f64> {
        let from_code = from.trim().to_uppercase();
        let to_code = to.trim().to_uppercase();
        if from_code.is_empty() || to_code.is_empty() {
            return None;
        }
        if from_code == to_code {
            return Some(0.0);
        }
        let origin = self.coordinates(&from_code)?;
        let destination = self.coordinates(&to_code)?;
        Some(haversine_nm(origin, destination))
    }

    pub fn len(&self) -> usize {
        self.coordinates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coordinates.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_leg_distance() {
        let index = AirportIndex::new();
        // Vero Beach to Fort Pierce is a short hop, roughly 10 NM.
        let nm = index.leg_distance_nm("KVRB", "KFPR").unwrap();
        assert!(nm > 5.0 && nm < 15.0, "unexpected distance {nm}");
    }

    #[test]
    fn unknown_airport_is_none_not_zero() {
        let index = AirportIndex::new();
        assert_eq!(index.leg_distance_nm("KVRB", "ZZZZ"), None);
        assert_eq!(index.leg_distance_nm("", "KVRB"), None);
    }

    #[test]
    fn pattern_work_is_zero() {
        let index = AirportIndex::new();
        assert_eq!(index.leg_distance_nm("KVRB", "kvrb"), Some(0.0));
    }
}
