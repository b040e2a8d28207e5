//! Aggregation properties: order-independence, the 42(b) grand total, and
//! the form-total bookkeeping.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::{Just, Strategy, proptest};

use caai_model::{
    AircraftGroup, ClassifiedFlight, Durations, FlightRecord, Hours, RoleCategory, RoleCredits,
};
use caai_report::FormAccumulator;

fn record(total: f64, night: f64) -> FlightRecord {
    FlightRecord {
        date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        from: "KVRB".to_string(),
        to: "KFPR".to_string(),
        registration: "N12345".to_string(),
        aircraft_type: "C172".to_string(),
        engine_type: String::new(),
        class: String::new(),
        durations: Durations {
            total: Hours::from_f64(total),
            night: Hours::from_f64(night),
            ..Durations::default()
        },
        day_landings: 1,
        night_landings: 0,
        instructor: String::new(),
        remarks: String::new(),
        distance_nm: None,
    }
}

fn pic_flight(type_code: &str, group: AircraftGroup, hours: f64) -> ClassifiedFlight {
    let record = record(hours, 0.0);
    ClassifiedFlight {
        record,
        type_code: type_code.to_string(),
        group,
        role: Some(RoleCategory::Pic),
        credits: RoleCredits {
            pic: Hours::from_f64(hours),
            ..RoleCredits::default()
        },
        night: Hours::ZERO,
        is_cross_country: false,
        is_complex: false,
        instrument_actual: Hours::ZERO,
        instrument_simulated: Hours::ZERO,
        is_device_session: false,
        device_hours: Hours::ZERO,
        advisories: Vec::new(),
    }
}

fn fold_all(flights: &[ClassifiedFlight]) -> FormAccumulator {
    let mut acc = FormAccumulator::new();
    for flight in flights {
        acc.fold(flight);
    }
    acc
}

#[test]
fn group_totals_are_order_independent() {
    let a = pic_flight("C172", AircraftGroup::A, 2.0);
    let b = pic_flight("C172", AircraftGroup::A, 3.0);

    let forward = fold_all(&[a.clone(), b.clone()]).finalize();
    let backward = fold_all(&[b, a]).finalize();

    assert_eq!(forward, backward);
    assert_eq!(
        forward.group_totals.get(&AircraftGroup::A),
        Some(&Hours::from_f64(5.0))
    );
}

#[test]
fn grand_total_uses_half_credit_for_sic() {
    let mut sic = pic_flight("PA44", AircraftGroup::B, 3.0);
    sic.role = Some(RoleCategory::Sic);
    sic.credits = RoleCredits {
        sic: Hours::from_f64(3.0),
        ..RoleCredits::default()
    };
    let pic = pic_flight("C172", AircraftGroup::A, 2.0);

    let values = fold_all(&[pic, sic]).finalize();
    assert_eq!(values.grand.pic, Hours::from_f64(2.0));
    assert_eq!(values.grand.sic, Hours::from_f64(3.0));
    assert_eq!(values.grand.overall_total, Hours::from_f64(3.5));
    assert_eq!(values.grand.form_total, Hours::from_f64(5.0));
}

#[test]
fn finalize_is_idempotent() {
    let acc = fold_all(&[
        pic_flight("C172", AircraftGroup::A, 1.5),
        pic_flight("PA28", AircraftGroup::A, 2.0),
    ]);
    assert_eq!(acc.finalize(), acc.finalize());
}

#[test]
fn device_sessions_skip_table_one() {
    let mut device = pic_flight("A320 FFS", AircraftGroup::Unresolved, 0.0);
    device.role = None;
    device.credits = RoleCredits::default();
    device.is_device_session = true;
    device.device_hours = Hours::from_f64(1.0);

    let values = fold_all(&[device]).finalize();
    assert!(values.type_rows.is_empty());
    assert!(values.group_totals.is_empty());
    assert_eq!(values.grand.device_hours, Hours::from_f64(1.0));
    assert_eq!(values.grand.form_total, Hours::ZERO);
    // A device is not an unresolved aircraft.
    assert!(values.unresolved_types.is_empty());
}

#[test]
fn safety_pilot_hours_reach_no_total() {
    let mut excluded = pic_flight("C172", AircraftGroup::A, 1.2);
    excluded.role = Some(RoleCategory::SafetyPilotExcluded);
    excluded.credits = RoleCredits {
        safety_pilot_excluded: Hours::from_f64(1.2),
        ..RoleCredits::default()
    };
    excluded.is_cross_country = true;

    let values = fold_all(&[excluded]).finalize();
    assert_eq!(values.grand.form_total, Hours::ZERO);
    assert_eq!(values.grand.pic_xc, Hours::ZERO);
    assert_eq!(values.grand.xc_all_roles, Hours::ZERO);
    assert_eq!(values.grand.safety_pilot_excluded, Hours::from_f64(1.2));
    assert_eq!(
        values.group_totals.get(&AircraftGroup::A),
        Some(&Hours::ZERO)
    );
}

#[test]
fn safety_pilot_night_hours_flagged() {
    let mut excluded = pic_flight("C172", AircraftGroup::A, 1.5);
    excluded.record.durations.night = Hours::from_f64(0.5);
    excluded.night = Hours::from_f64(0.5);
    excluded.role = Some(RoleCategory::SafetyPilotExcluded);
    excluded.credits = RoleCredits {
        safety_pilot_excluded: Hours::from_f64(1.5),
        ..RoleCredits::default()
    };

    let values = fold_all(&[excluded]).finalize();
    // The night hours stay in the all-flights night total but never in a
    // role bucket, and the ambiguity is surfaced as a note.
    assert_eq!(values.grand.night, Hours::from_f64(0.5));
    assert_eq!(values.grand.night_pic, Hours::ZERO);
    assert!(!values.notes.is_empty());
}

#[test]
fn unresolved_groups_are_reported() {
    let values = fold_all(&[pic_flight("ZZZ9", AircraftGroup::Unresolved, 1.0)]).finalize();
    assert_eq!(values.unresolved_types, vec!["ZZZ9".to_string()]);
}

#[test]
fn longest_solo_cross_country_prefers_distance_then_duration_then_date() {
    let solo = |hours: f64, nm: f64, day: u32| {
        let mut flight = pic_flight("C172", AircraftGroup::A, hours);
        flight.record.durations.solo = Hours::from_f64(hours);
        flight.record.distance_nm = Some(nm);
        flight.record.date = NaiveDate::from_ymd_opt(2024, 6, day).unwrap();
        flight.is_cross_country = true;
        flight
    };

    let flights = [solo(2.0, 80.0, 10), solo(3.0, 80.0, 12), solo(1.0, 120.0, 20)];
    let values = fold_all(&flights).finalize();
    let best = values.longest_solo_xc.expect("a solo XC candidate");
    assert_eq!(best.distance_nm, 120.0);

    // Without the long leg, the tie on distance falls to duration.
    let values = fold_all(&flights[..2]).finalize();
    let best = values.longest_solo_xc.expect("a solo XC candidate");
    assert_eq!(best.duration, Hours::from_f64(3.0));

    // Identical distance and duration: the earlier flight wins.
    let tie = [solo(2.0, 80.0, 15), solo(2.0, 80.0, 3)];
    let forward = fold_all(&tie).finalize();
    let backward = fold_all(&[tie[1].clone(), tie[0].clone()]).finalize();
    assert_eq!(forward.longest_solo_xc, backward.longest_solo_xc);
    assert_eq!(forward.longest_solo_xc.unwrap().date.day(), 3);
}

fn arbitrary_flight() -> impl Strategy<Value = ClassifiedFlight> {
    let role = proptest::prop_oneof![
        Just(RoleCategory::Pic),
        Just(RoleCategory::Sic),
        Just(RoleCategory::Student),
        Just(RoleCategory::SafetyPilotExcluded),
    ];
    let group = proptest::prop_oneof![
        Just(AircraftGroup::A),
        Just(AircraftGroup::B),
        Just(AircraftGroup::C),
        Just(AircraftGroup::D),
    ];
    (role, group, 1u32..60, 0u32..30, proptest::bool::ANY).prop_map(
        |(role, group, tenths, night_tenths, xc)| {
            let total = Hours::from_centi(i64::from(tenths) * 10);
            let night = Hours::from_centi(i64::from(night_tenths.min(tenths)) * 10);
            let mut credits = RoleCredits::default();
            match role {
                RoleCategory::Pic => credits.pic = total,
                RoleCategory::Sic => credits.sic = total,
                RoleCategory::Student => credits.student = total,
                RoleCategory::SafetyPilotExcluded => credits.safety_pilot_excluded = total,
            }
            let mut record = record(total.as_f64(), night.as_f64());
            record.durations.solo = if xc { total } else { Hours::ZERO };
            record.distance_nm = xc.then_some(45.0);
            ClassifiedFlight {
                record,
                type_code: "C172".to_string(),
                group,
                role: Some(role),
                credits,
                night,
                is_cross_country: xc,
                is_complex: group.is_multi_engine(),
                instrument_actual: Hours::ZERO,
                instrument_simulated: Hours::ZERO,
                is_device_session: false,
                device_hours: Hours::ZERO,
                advisories: Vec::new(),
            }
        },
    )
}

proptest! {
    #[test]
    fn fold_is_commutative(
        (flights, shuffled) in proptest::collection::vec(arbitrary_flight(), 0..12)
            .prop_flat_map(|flights| {
                let shuffled = Just(flights.clone()).prop_shuffle();
                (Just(flights), shuffled)
            })
    ) {
        let forward = fold_all(&flights).finalize();
        let permuted = fold_all(&shuffled).finalize();
        proptest::prop_assert_eq!(forward, permuted);
    }

    #[test]
    fn grand_total_invariant_holds(
        flights in proptest::collection::vec(arbitrary_flight(), 0..12)
    ) {
        let values = fold_all(&flights).finalize();
        let expected = values.grand.pic + values.grand.sic.half() + values.grand.student;
        proptest::prop_assert_eq!(values.grand.overall_total, expected);
        proptest::prop_assert_eq!(
            values.grand.form_total,
            values.grand.pic + values.grand.sic + values.grand.student
        );
    }

    #[test]
    fn accumulator_reflects_exactly_the_flights_folded(
        flights in proptest::collection::vec(arbitrary_flight(), 1..12)
    ) {
        // Folding a prefix then the rest equals folding everything:
        // aborting between rows never corrupts state.
        let split = flights.len() / 2;
        let mut acc = fold_all(&flights[..split]);
        for flight in &flights[split..] {
            acc.fold(flight);
        }
        proptest::prop_assert_eq!(acc.finalize(), fold_all(&flights).finalize());
    }
}
