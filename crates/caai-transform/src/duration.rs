//! Duration and numeric cell grammars.

use caai_model::Hours;

/// Parse a duration cell under the three accepted grammars, tried in
/// order: plain decimal ("1.5"), hours:minutes ("1:30"), comma-decimal
/// ("1,5"). Empty cells are zero. `None` means the value matched no
/// grammar (or was negative) and the row must be rejected.
pub fn parse_duration(raw: &str) -> Option<Hours> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(Hours::ZERO);
    }

    if let Ok(value) = trimmed.parse::<f64>() {
        return non_negative(value);
    }

    if let Some(hours) = parse_colon_time(trimmed) {
        return Some(hours);
    }

    // Comma-decimal: exactly one comma, both sides numeric ("1,5").
    if trimmed.matches(',').count() == 1 {
        let dotted = trimmed.replace(',', ".");
        if let Ok(value) = dotted.parse::<f64>() {
            return non_negative(value);
        }
    }

    None
}

fn non_negative(value: f64) -> Option<Hours> {
    if value.is_finite() && value >= 0.0 {
        Some(Hours::from_f64(value))
    } else {
        None
    }
}

/// "H:MM" with minutes below sixty.
fn parse_colon_time(raw: &str) -> Option<Hours> {
    let (hours_part, minutes_part) = raw.split_once(':')?;
    if minutes_part.is_empty() || minutes_part.len() > 2 {
        return None;
    }
    let hours = hours_part.parse::<u32>().ok()?;
    let minutes = minutes_part.parse::<u32>().ok()?;
    if minutes >= 60 {
        return None;
    }
    Some(Hours::from_hours_minutes(hours, minutes))
}

/// Parse a landing/takeoff count. Empty is zero; a decimal with no
/// fractional part ("2.0") is tolerated because spreadsheets emit them.
pub fn parse_count(raw: &str) -> Option<u32> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0);
    }
    if let Ok(count) = trimmed.parse::<u32>() {
        return Some(count);
    }
    let value = trimmed.parse::<f64>().ok()?;
    if value < 0.0 || value.fract() != 0.0 || value > f64::from(u32::MAX) {
        return None;
    }
    Some(value as u32)
}

/// Parse a distance cell in nautical miles. Accepts thousands separators
/// ("1,024"). Empty means no distance recorded.
pub fn parse_distance(raw: &str) -> Option<Option<f64>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(None);
    }
    let cleaned = trimmed.replace(',', "");
    let value = cleaned.parse::<f64>().ok()?;
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    Some(Some(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimal_grammar() {
        assert_eq!(parse_duration("1.5"), Some(Hours::from_f64(1.5)));
        assert_eq!(parse_duration(" 2 "), Some(Hours::from_f64(2.0)));
        assert_eq!(parse_duration(""), Some(Hours::ZERO));
    }

    #[test]
    fn colon_grammar() {
        assert_eq!(parse_duration("1:30"), Some(Hours::from_f64(1.5)));
        assert_eq!(parse_duration("0:45"), Some(Hours::from_f64(0.75)));
        assert_eq!(parse_duration("10:00"), Some(Hours::from_f64(10.0)));
        // minutes must stay below sixty
        assert_eq!(parse_duration("1:75"), None);
    }

    #[test]
    fn comma_decimal_grammar() {
        assert_eq!(parse_duration("1,5"), Some(Hours::from_f64(1.5)));
        assert_eq!(parse_duration("0,25"), Some(Hours::from_f64(0.25)));
    }

    #[test]
    fn garbage_is_rejected_not_zeroed() {
        assert_eq!(parse_duration("n/a"), None);
        assert_eq!(parse_duration("1.2.3"), None);
        assert_eq!(parse_duration("-1.0"), None);
    }

    #[test]
    fn counts() {
        assert_eq!(parse_count(""), Some(0));
        assert_eq!(parse_count("3"), Some(3));
        assert_eq!(parse_count("2.0"), Some(2));
        assert_eq!(parse_count("2.5"), None);
        assert_eq!(parse_count("-1"), None);
    }

    #[test]
    fn distances() {
        assert_eq!(parse_distance(""), Some(None));
        assert_eq!(parse_distance("27.5"), Some(Some(27.5)));
        assert_eq!(parse_distance("1,024"), Some(Some(1024.0)));
        assert_eq!(parse_distance("far"), None);
    }
}
