//! Date cell grammars.
//!
//! Day-first formats are tried before month-first, matching the Israeli
//! logbook convention; an unambiguous ISO date always wins.

use chrono::{NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",  // 2024-01-15
    "%Y/%m/%d",  // 2024/01/15
    "%d/%m/%Y",  // 15/01/2024 (Israeli/European)
    "%d-%m-%Y",  // 15-01-2024
    "%d.%m.%Y",  // 15.01.2024
    "%m/%d/%Y",  // 01/15/2024 (US)
    "%d-%b-%Y",  // 15-Jan-2024
    "%d %b %Y",  // 15 Jan 2024
    "%d %B %Y",  // 15 January 2024
    "%b %d, %Y", // Jan 15, 2024
    "%B %d, %Y", // January 15, 2024
    "%Y%m%d",    // 20240115
];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M",
];

/// Parse a date cell. Datetime values (Excel exports) lose their time
/// component. `None` means no accepted grammar matched.
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(datetime.date());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_and_slashed() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(parse_date("2024-01-15"), Some(expected));
        assert_eq!(parse_date("15/01/2024"), Some(expected));
        assert_eq!(parse_date("15.01.2024"), Some(expected));
        assert_eq!(parse_date("15-Jan-2024"), Some(expected));
        assert_eq!(parse_date("Jan 15, 2024"), Some(expected));
        assert_eq!(parse_date("20240115"), Some(expected));
    }

    #[test]
    fn day_first_wins_over_month_first() {
        // 03/04/2024 reads as 3 April, not March 4th.
        assert_eq!(
            parse_date("03/04/2024"),
            Some(NaiveDate::from_ymd_opt(2024, 4, 3).unwrap())
        );
    }

    #[test]
    fn datetimes_lose_their_time() {
        assert_eq!(
            parse_date("2024-01-15T10:30:00"),
            Some(NaiveDate::from_ymd_opt(2024, 1, 15).unwrap())
        );
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_date("yesterday"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }
}
