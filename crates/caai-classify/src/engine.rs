//! The CAAI classification rules.
//!
//! Classification is an ordered pipeline of steps over a draft value; each
//! step reads the record and updates the draft, and later steps may
//! override what earlier ones decided (a student determination cancels a
//! safety-pilot exclusion, a device determination cancels everything).
//! The order is load-bearing and matches the regulation's rule numbering.
//!
//! Classification never fails: inconsistencies clamp to zero and attach an
//! advisory instead of aborting the batch.

use tracing::trace;

use caai_model::{
    Advisory, AircraftGroup, ClassifiedFlight, FlightRecord, Hours, RoleCategory, RoleCredits,
};

use crate::lookup::GroupLookup;

/// Cross-country threshold in nautical miles when judging by leg distance.
const XC_DISTANCE_NM: f64 = 27.0;

/// Classification in progress. Steps mutate this; [`classify`] seals it
/// into a [`ClassifiedFlight`].
struct Draft {
    group: AircraftGroup,
    role: Option<RoleCategory>,
    credits: RoleCredits,
    night: Hours,
    is_cross_country: bool,
    is_complex: bool,
    instrument_actual: Hours,
    instrument_simulated: Hours,
    is_device_session: bool,
    device_hours: Hours,
    advisories: Vec<Advisory>,
    // working state shared between steps
    safety_remark: bool,
    is_safety_excluded: bool,
    is_student: bool,
}

impl Draft {
    fn advise(&mut self, message: impl Into<String>) {
        self.advisories.push(Advisory {
            message: message.into(),
        });
    }
}

type Step = fn(&mut Draft, &FlightRecord, &dyn GroupLookup);

/// The rule pipeline, in regulation order.
const STEPS: &[(&str, Step)] = &[
    ("safety_pilot", detect_safety_pilot),
    ("student", determine_student),
    ("pic", determine_pic),
    ("sic", determine_sic),
    ("cross_country", determine_cross_country),
    ("actual_instrument", record_actual_instrument),
    ("simulated_instrument", record_simulated_instrument),
    ("device", detect_device_session),
    ("complex", flag_complex),
    ("night", split_night),
];

/// Classify one normalized flight. Pure: same inputs, same output.
pub fn classify(record: &FlightRecord, lookup: &dyn GroupLookup) -> ClassifiedFlight {
    let mut draft = Draft {
        group: lookup.group_of(record),
        role: None,
        credits: RoleCredits::default(),
        night: Hours::ZERO,
        is_cross_country: false,
        is_complex: false,
        instrument_actual: Hours::ZERO,
        instrument_simulated: Hours::ZERO,
        is_device_session: false,
        device_hours: Hours::ZERO,
        advisories: Vec::new(),
        safety_remark: record.remarks.to_lowercase().contains("safety pilot"),
        is_safety_excluded: false,
        is_student: false,
    };

    for (name, step) in STEPS {
        step(&mut draft, record, lookup);
        trace!(rule = name, role = ?draft.role, "rule applied");
    }

    enforce_credit_bound(&mut draft, record);

    ClassifiedFlight {
        record: record.clone(),
        type_code: lookup.type_code(&record.aircraft_type),
        group: draft.group,
        role: draft.role,
        credits: draft.credits,
        night: draft.night,
        is_cross_country: draft.is_cross_country,
        is_complex: draft.is_complex,
        instrument_actual: draft.instrument_actual,
        instrument_simulated: draft.instrument_simulated,
        is_device_session: draft.is_device_session,
        device_hours: draft.device_hours,
        advisories: draft.advisories,
    }
}

/// Rule 1: a "safety pilot" remark on a single-engine aircraft excludes
/// the hours from every form total. Multi-engine safety-pilot flights are
/// not excluded; rule 4 handles them as SIC.
fn detect_safety_pilot(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    if draft.safety_remark && draft.group.is_single_engine() {
        draft.is_safety_excluded = true;
        draft.credits.safety_pilot_excluded = record.durations.total;
        draft.role = Some(RoleCategory::SafetyPilotExcluded);
    }
}

/// Rule 2: an instructor aboard (or dual received) makes the flight
/// Student time, overriding a safety-pilot exclusion; Student and PIC are
/// mutually exclusive for the same hours.
fn determine_student(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    if !record.has_instructor() {
        return;
    }
    draft.is_student = true;
    if draft.is_safety_excluded {
        draft.is_safety_excluded = false;
        draft.credits.safety_pilot_excluded = Hours::ZERO;
    }
    draft.credits.student = record.durations.total;
    draft.role = Some(RoleCategory::Student);
}

/// Rule 3: PIC credit for flights that are neither Student nor excluded.
/// Single-engine aircraft have no SIC concept, so a SIC entry folds into
/// PIC there. A flight whose duration columns name no role at all flies
/// its total as PIC, keeping the category totals complete.
fn determine_pic(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    if draft.is_student || draft.is_safety_excluded {
        return;
    }
    let durations = &record.durations;
    let mut credit = durations.pic;
    if draft.group.is_single_engine() && durations.sic.is_positive() {
        credit += durations.sic;
    }
    let no_role_named = credit.is_zero() && durations.sic.is_zero();
    if no_role_named && durations.total.is_positive() {
        // Multi-engine safety-pilot flights fall through to rule 4 instead.
        if !(draft.safety_remark && draft.group.is_multi_engine()) {
            credit = durations.total;
        }
    }
    if credit.is_positive() {
        draft.credits.pic = credit;
        draft.role = Some(RoleCategory::Pic);
    }
}

/// Rule 4: SIC credit on multi-engine aircraft, taken from the SIC column
/// as-is. A multi-engine "safety pilot" flight with no role columns rides
/// here as SIC (the exclusion in rule 1 is single-engine only).
fn determine_sic(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    if draft.is_student || !draft.group.is_multi_engine() {
        return;
    }
    let durations = &record.durations;
    let mut credit = durations.sic;
    if credit.is_zero()
        && draft.safety_remark
        && durations.pic.is_zero()
        && durations.total.is_positive()
    {
        credit = durations.total;
    }
    if credit.is_positive() {
        draft.credits.sic = credit;
        draft.role = Some(RoleCategory::Sic);
    }
}

/// Rule 5: cross-country status. The recorded XC column decides; failing
/// that, a known leg distance beyond the threshold. A missing distance
/// means "unknown", never "not cross-country".
fn determine_cross_country(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    let by_column = record.durations.cross_country.is_positive();
    let by_distance = record
        .distance_nm
        .is_some_and(|nm| nm > XC_DISTANCE_NM);
    draft.is_cross_country = by_column || by_distance;
}

/// Rule 6: actual instrument time, recorded for Table 2 regardless of
/// role. Outside instruction on a single-pilot aircraft it is
/// PIC-qualifying, which the aggregator's instrument totals rely on.
fn record_actual_instrument(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    draft.instrument_actual = record.durations.actual_instrument;
}

/// Rule 7: simulated (hood) instrument time. Under instruction it is
/// Student time — rule 2 already credited the full total there — and
/// otherwise it accrues to whatever role the flight carries.
fn record_simulated_instrument(
    draft: &mut Draft,
    record: &FlightRecord,
    _lookup: &dyn GroupLookup,
) {
    draft.instrument_simulated = record.durations.simulated_instrument;
}

/// Rule 8: ground training devices never reach the role totals or
/// Table 1; their time lands in the device accumulator for Table 2.
fn detect_device_session(draft: &mut Draft, record: &FlightRecord, lookup: &dyn GroupLookup) {
    let durations = &record.durations;
    let flagged_device = lookup.is_device(&record.aircraft_type, &record.registration);
    let simulator_only = durations.simulator.is_positive() && durations.total.is_zero();
    if !(flagged_device || simulator_only) {
        return;
    }
    draft.is_device_session = true;
    draft.device_hours = if durations.total.is_positive() {
        durations.total
    } else {
        durations.simulator
    };
    draft.credits = RoleCredits::default();
    draft.role = None;
    draft.is_cross_country = false;
    draft.is_safety_excluded = false;
    draft.is_student = false;
}

/// Rule 9: complex aircraft — retractable gear with a variable-pitch
/// propeller, or any multi-engine group.
fn flag_complex(draft: &mut Draft, record: &FlightRecord, lookup: &dyn GroupLookup) {
    if draft.is_device_session {
        return;
    }
    draft.is_complex =
        lookup.is_complex(&record.aircraft_type) || draft.group.is_multi_engine();
}

/// Rule 10: night hours ride as a parallel day/night breakdown of the
/// flight's role, not as a role of their own.
fn split_night(draft: &mut Draft, record: &FlightRecord, _lookup: &dyn GroupLookup) {
    if draft.is_device_session {
        return;
    }
    let (night, clamped) = record
        .durations
        .night
        .min(record.durations.total)
        .clamp_non_negative();
    if clamped {
        draft.advise("night time below zero clamped");
    }
    draft.night = night;
}

/// Role credits for one flight may never exceed its total time. Overflow
/// is trimmed from the PIC credit first (the only credit the rules ever
/// synthesize) and noted as an advisory.
fn enforce_credit_bound(draft: &mut Draft, record: &FlightRecord) {
    let total = record.durations.total;
    let credited = draft.credits.total();
    if credited <= total {
        return;
    }
    let overflow = credited - total;
    let (reduced_pic, _) = (draft.credits.pic - overflow).clamp_non_negative();
    let trimmed = draft.credits.pic - reduced_pic;
    draft.credits.pic = reduced_pic;
    let remaining = overflow - trimmed;
    if remaining.is_positive() {
        let (reduced_sic, _) = (draft.credits.sic - remaining).clamp_non_negative();
        draft.credits.sic = reduced_sic;
    }
    draft.advise(format!(
        "role credits exceeded total time by {overflow}; trimmed to fit"
    ));
}
