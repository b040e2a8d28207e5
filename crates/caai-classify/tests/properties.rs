//! Classification invariants over arbitrary records.

use chrono::NaiveDate;
use proptest::prelude::{Just, Strategy, proptest};

use caai_classify::{StaticLookup, classify};
use caai_model::{AircraftGroup, Durations, FlightRecord, Hours};

fn arbitrary_record() -> impl Strategy<Value = FlightRecord> {
    let tenths = || 0i64..40;
    (
        tenths(),
        tenths(),
        tenths(),
        tenths(),
        tenths(),
        tenths(),
        proptest::option::of(Just("J. Smith".to_string())),
        proptest::bool::ANY,
    )
        .prop_map(
            |(total, pic, sic, night, dual, solo, instructor, safety_remark)| FlightRecord {
                date: NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
                from: "KVRB".to_string(),
                to: "KFPR".to_string(),
                registration: "N12345".to_string(),
                aircraft_type: "C172".to_string(),
                engine_type: String::new(),
                class: String::new(),
                durations: Durations {
                    total: Hours::from_centi(total * 10),
                    pic: Hours::from_centi(pic * 10),
                    sic: Hours::from_centi(sic * 10),
                    night: Hours::from_centi(night * 10),
                    dual_received: Hours::from_centi(dual * 10),
                    solo: Hours::from_centi(solo * 10),
                    ..Durations::default()
                },
                day_landings: 0,
                night_landings: 0,
                instructor: instructor.unwrap_or_default(),
                remarks: if safety_remark {
                    "safety pilot".to_string()
                } else {
                    String::new()
                },
                distance_nm: None,
            },
        )
}

fn groups() -> impl Strategy<Value = AircraftGroup> {
    proptest::prop_oneof![
        Just(AircraftGroup::A),
        Just(AircraftGroup::B),
        Just(AircraftGroup::C),
        Just(AircraftGroup::D),
        Just(AircraftGroup::Unresolved),
    ]
}

proptest! {
    #[test]
    fn role_credits_never_exceed_total_time(
        record in arbitrary_record(),
        group in groups(),
    ) {
        let flight = classify(&record, &StaticLookup::group(group));
        proptest::prop_assert!(flight.credits.total() <= record.durations.total);
    }

    #[test]
    fn no_instruction_means_no_student_hours(
        record in arbitrary_record(),
        group in groups(),
    ) {
        let mut record = record;
        record.instructor.clear();
        record.durations.dual_received = Hours::ZERO;
        let flight = classify(&record, &StaticLookup::group(group));
        proptest::prop_assert_eq!(flight.credits.student, Hours::ZERO);
    }

    #[test]
    fn classification_is_pure(
        record in arbitrary_record(),
        group in groups(),
    ) {
        let lookup = StaticLookup::group(group);
        let first = classify(&record, &lookup);
        let second = classify(&record, &lookup);
        proptest::prop_assert_eq!(first.credits, second.credits);
        proptest::prop_assert_eq!(first.role, second.role);
    }
}
