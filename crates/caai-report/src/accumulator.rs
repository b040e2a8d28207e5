//! The form accumulator.
//!
//! `fold` is associative and commutative over the flight sequence: every
//! bucket is an integer-backed [`Hours`] sum, a count, a set insertion, or
//! a deterministic running maximum, so any permutation of the same flights
//! produces identical state. Callers may abort between folds; the
//! accumulator always reflects exactly the flights folded so far.

use std::collections::{BTreeMap, BTreeSet};

use caai_model::{AircraftGroup, ClassifiedFlight, Hours, RoleCategory};

/// Day/night hour buckets for one role within one aircraft type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct RoleBuckets {
    pub day: Hours,
    pub night: Hours,
}

impl RoleBuckets {
    pub fn total(&self) -> Hours {
        self.day + self.night
    }

    fn add_split(&mut self, credit: Hours, night_portion: Hours) {
        let night = night_portion.min(credit);
        self.night += night;
        self.day += credit - night;
    }
}

/// Running totals for one aircraft type (one row of Table 1).
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct TypeStats {
    pub group: AircraftGroup,
    pub flights: usize,
    /// All hours flown on the type, excluded hours included.
    pub total: Hours,
    /// Hours that reach the form: PIC + SIC + Student.
    pub form_total: Hours,
    pub pic: RoleBuckets,
    pub pic_xc: RoleBuckets,
    pub sic: RoleBuckets,
    pub student: RoleBuckets,
    pub instrument_actual: Hours,
    pub instrument_simulated: Hours,
    pub safety_pilot_excluded: Hours,
    pub day_landings: u32,
    pub night_landings: u32,
}

/// A training-device row for Table 2.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize)]
pub struct DeviceStats {
    pub sessions: usize,
    pub hours: Hours,
}

/// The longest solo cross-country seen so far, compared lexicographically
/// by (distance, duration), ties broken by earliest date then route so
/// the winner never depends on fold order.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct SoloCrossCountry {
    pub distance_nm: f64,
    pub duration: Hours,
    pub date: chrono::NaiveDate,
    pub from: String,
    pub to: String,
}

impl SoloCrossCountry {
    fn beats(&self, other: &SoloCrossCountry) -> bool {
        if self.distance_nm != other.distance_nm {
            return self.distance_nm > other.distance_nm;
        }
        if self.duration != other.duration {
            return self.duration > other.duration;
        }
        if self.date != other.date {
            return self.date < other.date;
        }
        (&self.from, &self.to) < (&other.from, &other.to)
    }
}

/// Mutable aggregate state for one run. Owned by the aggregation loop;
/// flights fold in one at a time, in any order.
#[derive(Debug, Clone, Default)]
pub struct FormAccumulator {
    pub(crate) types: BTreeMap<String, TypeStats>,
    pub(crate) devices: BTreeMap<String, DeviceStats>,
    pub(crate) longest_solo_xc: Option<SoloCrossCountry>,
    pub(crate) unresolved_types: BTreeSet<String>,
    pub(crate) notes: BTreeSet<String>,

    // scalar grand totals
    pub(crate) total_time: Hours,
    pub(crate) night: Hours,
    pub(crate) night_pic: Hours,
    pub(crate) night_pic_xc: Hours,
    pub(crate) night_student: Hours,
    pub(crate) pic_xc: Hours,
    pub(crate) xc_all_roles: Hours,
    pub(crate) solo: Hours,
    pub(crate) solo_xc: Hours,
    pub(crate) dual_instrument: Hours,
    pub(crate) instrument_actual: Hours,
    pub(crate) instrument_simulated: Hours,
    pub(crate) device_hours: Hours,
    pub(crate) complex_hours: Hours,
    pub(crate) multi_engine_hours: Hours,
    pub(crate) safety_pilot_excluded: Hours,
    pub(crate) day_landings: u32,
    pub(crate) night_landings: u32,
}

impl FormAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified flight into the running totals.
    pub fn fold(&mut self, flight: &ClassifiedFlight) {
        if flight.is_device_session {
            let entry = self.devices.entry(flight.type_code.clone()).or_default();
            entry.sessions += 1;
            entry.hours += flight.device_hours;
            self.device_hours += flight.device_hours;
            return;
        }

        let record = &flight.record;
        let credits = &flight.credits;
        let night = flight.night;

        if flight.group == AircraftGroup::Unresolved {
            self.unresolved_types.insert(flight.type_code.clone());
        }

        let stats = self.types.entry(flight.type_code.clone()).or_default();
        stats.group = flight.group;
        stats.flights += 1;
        stats.total += record.durations.total;
        stats.form_total += credits.form_total();
        stats.instrument_actual += flight.instrument_actual;
        stats.instrument_simulated += flight.instrument_simulated;
        stats.safety_pilot_excluded += credits.safety_pilot_excluded;
        stats.day_landings += record.day_landings;
        stats.night_landings += record.night_landings;

        // The primary role carries the flight's night portion; any
        // secondary credit (rare: PIC and SIC both filled on a
        // multi-engine type) counts as day.
        for role in [RoleCategory::Student, RoleCategory::Pic, RoleCategory::Sic] {
            let credit = credits.get(role);
            if credit.is_zero() {
                continue;
            }
            let night_portion = if flight.role == Some(role) {
                night
            } else {
                Hours::ZERO
            };
            let buckets = match role {
                RoleCategory::Student => &mut stats.student,
                RoleCategory::Pic => &mut stats.pic,
                RoleCategory::Sic => &mut stats.sic,
                RoleCategory::SafetyPilotExcluded => unreachable!(),
            };
            buckets.add_split(credit, night_portion);
            if role == RoleCategory::Pic && flight.is_cross_country {
                stats.pic_xc.add_split(credit, night_portion);
            }
        }

        self.total_time += record.durations.total;
        self.night += night;
        self.instrument_actual += flight.instrument_actual;
        self.instrument_simulated += flight.instrument_simulated;
        self.day_landings += record.day_landings;
        self.night_landings += record.night_landings;

        if flight.is_complex {
            self.complex_hours += record.durations.total;
        }
        if flight.group.is_multi_engine() {
            self.multi_engine_hours += record.durations.total;
        }

        match flight.role {
            Some(RoleCategory::Student) => {
                self.night_student += night;
                let instrument = flight.instrument_actual + flight.instrument_simulated;
                if instrument.is_positive() {
                    self.dual_instrument += instrument;
                }
            }
            Some(RoleCategory::Pic) => {
                let pic_night = night.min(credits.pic);
                self.night_pic += pic_night;
                if flight.is_cross_country {
                    self.pic_xc += credits.pic;
                    self.night_pic_xc += pic_night;
                }
                if record.durations.solo.is_positive() {
                    self.solo += credits.pic;
                    if flight.is_cross_country {
                        self.solo_xc += credits.pic;
                        self.consider_solo_xc(flight);
                    }
                }
            }
            Some(RoleCategory::SafetyPilotExcluded) => {
                self.safety_pilot_excluded += credits.safety_pilot_excluded;
                if night.is_positive() {
                    // The regulation does not say whether excluded hours
                    // also leave the night total; they stay in, flagged.
                    self.notes.insert(format!(
                        "safety-pilot night hours retained in night total ({})",
                        flight.type_code
                    ));
                }
            }
            Some(RoleCategory::Sic) | None => {}
        }

        if flight.is_cross_country && credits.safety_pilot_excluded.is_zero() {
            self.xc_all_roles += record.durations.total;
        }
    }

    fn consider_solo_xc(&mut self, flight: &ClassifiedFlight) {
        let candidate = SoloCrossCountry {
            distance_nm: flight.record.distance_nm.unwrap_or(0.0),
            duration: flight.record.durations.total,
            date: flight.record.date,
            from: flight.record.from.clone(),
            to: flight.record.to.clone(),
        };
        match &self.longest_solo_xc {
            Some(best) if !candidate.beats(best) => {}
            _ => self.longest_solo_xc = Some(candidate),
        }
    }
}
