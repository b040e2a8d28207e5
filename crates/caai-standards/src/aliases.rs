//! Header alias dictionary.
//!
//! Maps known column header spellings (ForeFlight, Safelog, LogTen, manual
//! spreadsheets, Hebrew logbooks) to canonical fields. Aliases are matched
//! case-insensitively against normalized header text; within a field the
//! more specific spellings come first because the first match wins.

use caai_model::CanonicalField;

/// Alias list per canonical field. Order within the table is the scan
/// order; order within each list is the match-preference order.
pub const HEADER_ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Date,
        &[
            "date",
            "flight date",
            "flt date",
            "flight_date",
            "dep date",
            "departure date",
            "תאריך",
        ],
    ),
    (
        CanonicalField::From,
        &[
            "from",
            "departure",
            "dep",
            "origin",
            "route from",
            "dep airport",
            "departure airport",
            "depart",
            "מ-",
            "ממקום",
        ],
    ),
    (
        CanonicalField::To,
        &[
            "to",
            "arrival",
            "arr",
            "dest",
            "destination",
            "route to",
            "arr airport",
            "arrival airport",
            "ל-",
            "למקום",
        ],
    ),
    (
        CanonicalField::Registration,
        &[
            "registration",
            "reg",
            "tail",
            "tail number",
            "tail no",
            "aircraft id",
            "ident",
            "aircraft ident",
            "a/c reg",
            "tail #",
            "n-number",
            "רישום",
            "סימן קריאה",
        ],
    ),
    (
        CanonicalField::AircraftType,
        &[
            "aircraft type",
            "type",
            "type code",
            "a/c type",
            "make/model",
            "aircraft",
            "ac type",
            "airplane type",
            "דגם כלי טיס",
            "דגם",
            "סוג מטוס",
        ],
    ),
    (
        CanonicalField::EngineType,
        &["engine type", "engine", "eng type", "powerplant", "סוג מנוע"],
    ),
    (
        CanonicalField::Class,
        &["class", "aircraft class", "a/c class", "סיווג"],
    ),
    (
        CanonicalField::TotalTime,
        &[
            "total time",
            "total",
            "total flight time",
            "duration",
            "flight time",
            "block time",
            "total duration",
            "ttl time",
            "total hrs",
            "flight hours",
            "סה\"כ זמן",
            "זמן טיסה",
            "סה\"כ",
        ],
    ),
    (
        CanonicalField::Pic,
        &[
            "pic",
            "pilot in command",
            "p1",
            "pic time",
            "pic hours",
            "command",
            "טייס אחראי",
            "מפקד",
        ],
    ),
    (
        CanonicalField::Sic,
        &[
            "sic",
            "second in command",
            "co-pilot",
            "copilot",
            "p2",
            "sic time",
            "sic hours",
            "first officer",
            "טייס משנה",
        ],
    ),
    (
        CanonicalField::Night,
        &["night", "night time", "night hours", "nite", "לילה"],
    ),
    (
        CanonicalField::CrossCountry,
        &[
            "cross country",
            "xc",
            "x-country",
            "cc",
            "cross-country",
            "xcountry",
            "xc time",
            "חוצה ארץ",
        ],
    ),
    (
        CanonicalField::ActualInstrument,
        &[
            "actual instrument",
            "actual inst",
            "actual ifr",
            "act inst",
            "actual imc",
            "imc",
            "מכשירים בפועל",
        ],
    ),
    (
        CanonicalField::SimulatedInstrument,
        &[
            "simulated instrument",
            "sim inst",
            "hood",
            "sim ifr",
            "simulated inst",
            "sim instrument",
            "מכשירים מדומה",
        ],
    ),
    (
        CanonicalField::DualReceived,
        &[
            "dual received",
            "dual recv",
            "dual",
            "instruction received",
            "dual rcvd",
            "training received",
            "הדרכה שהתקבלה",
        ],
    ),
    (
        CanonicalField::DualGiven,
        &[
            "dual given",
            "instruction given",
            "cfi time",
            "instructor time",
            "dual gvn",
            "training given",
            "הדרכה שניתנה",
        ],
    ),
    (
        CanonicalField::Solo,
        &["solo", "solo time", "solo hours", "סולו"],
    ),
    (
        CanonicalField::Simulator,
        &[
            "simulator",
            "sim",
            "ftd",
            "ffs",
            "sim time",
            "training device",
            "flight sim",
            "סימולטור",
        ],
    ),
    (
        CanonicalField::MultiPilot,
        &[
            "multi-pilot",
            "multi pilot",
            "multipilot",
            "multi crew",
            "multi-crew",
            "multicrew",
            "mp",
            "רב טייס",
        ],
    ),
    (
        CanonicalField::DayLandings,
        &[
            "day landings",
            "day ldg",
            "ldg day",
            "day land",
            "landings day",
            "day ldgs",
            "landings",
            "נחיתות יום",
        ],
    ),
    (
        CanonicalField::NightLandings,
        &[
            "night landings",
            "night ldg",
            "ldg night",
            "night land",
            "landings night",
            "night ldgs",
            "נחיתות לילה",
        ],
    ),
    (
        CanonicalField::Instructor,
        &[
            "instructor",
            "cfi name",
            "instructor name",
            "flight instructor",
            "מדריך",
        ],
    ),
    (
        CanonicalField::Remarks,
        &["remarks", "comments", "notes", "remark", "הערות"],
    ),
    (
        CanonicalField::Distance,
        &[
            "distance",
            "distance (nm)",
            "dist",
            "nm",
            "distance nm",
            "nautical miles",
            "מרחק",
        ],
    ),
];

/// Aliases for one field, or an empty slice for fields with none.
pub fn aliases_for(field: CanonicalField) -> &'static [&'static str] {
    HEADER_ALIASES
        .iter()
        .find(|(candidate, _)| *candidate == field)
        .map(|(_, aliases)| *aliases)
        .unwrap_or(&[])
}
