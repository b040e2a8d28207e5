//! Fixed-point flight-time durations.
//!
//! Durations are stored as whole hundredths of an hour. Integer arithmetic
//! keeps aggregation exactly associative and commutative, so folding a batch
//! of flights in any order produces identical totals — a requirement the
//! form pipeline relies on because source rows arrive unordered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// A duration in hundredths of an hour.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Hours(i64);

impl Hours {
    pub const ZERO: Hours = Hours(0);

    /// From a raw count of hundredths.
    pub const fn from_centi(centi: i64) -> Self {
        Hours(centi)
    }

    /// From decimal hours, rounded to the nearest hundredth.
    pub fn from_f64(value: f64) -> Self {
        Hours((value * 100.0).round() as i64)
    }

    /// From an hours:minutes pair, rounded to the nearest hundredth.
    pub fn from_hours_minutes(hours: u32, minutes: u32) -> Self {
        let total_minutes = i64::from(hours) * 60 + i64::from(minutes);
        Hours((total_minutes * 100 + 30) / 60)
    }

    pub const fn centi(self) -> i64 {
        self.0
    }

    pub fn as_f64(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Decimal hours rounded to one place, as the form cells render them.
    pub fn rounded_tenths(self) -> f64 {
        ((self.0 as f64) / 10.0).round() / 10.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Half the duration, truncated toward zero at the hundredth.
    ///
    /// Both the 42(b) grand total and its verification use this, so the
    /// invariant `total == pic + sic.half() + student` holds exactly.
    pub const fn half(self) -> Self {
        Hours(self.0 / 2)
    }

    pub fn min(self, other: Self) -> Self {
        Hours(self.0.min(other.0))
    }

    pub fn max(self, other: Self) -> Self {
        Hours(self.0.max(other.0))
    }

    /// Clamp below zero to zero, reporting whether clamping occurred.
    pub const fn clamp_non_negative(self) -> (Self, bool) {
        if self.0 < 0 { (Hours(0), true) } else { (self, false) }
    }

    pub fn saturating_sub(self, other: Self) -> Self {
        Hours(self.0.saturating_sub(other.0))
    }
}

impl Add for Hours {
    type Output = Hours;

    fn add(self, rhs: Hours) -> Hours {
        Hours(self.0 + rhs.0)
    }
}

impl AddAssign for Hours {
    fn add_assign(&mut self, rhs: Hours) {
        self.0 += rhs.0;
    }
}

impl Sub for Hours {
    type Output = Hours;

    fn sub(self, rhs: Hours) -> Hours {
        Hours(self.0 - rhs.0)
    }
}

impl SubAssign for Hours {
    fn sub_assign(&mut self, rhs: Hours) {
        self.0 -= rhs.0;
    }
}

impl Neg for Hours {
    type Output = Hours;

    fn neg(self) -> Hours {
        Hours(-self.0)
    }
}

impl Sum for Hours {
    fn sum<I: Iterator<Item = Hours>>(iter: I) -> Hours {
        iter.fold(Hours::ZERO, Add::add)
    }
}

impl fmt::Display for Hours {
    /// Renders as decimal hours without trailing zeros ("1.5", "2", "0.25").
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = format!("{:.2}", self.as_f64());
        let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
        write!(f, "{trimmed}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversion_round_trips() {
        assert_eq!(Hours::from_f64(1.5).centi(), 150);
        assert_eq!(Hours::from_f64(1.5).as_f64(), 1.5);
        assert_eq!(Hours::from_f64(0.0), Hours::ZERO);
    }

    #[test]
    fn hours_minutes_rounds_to_centi() {
        assert_eq!(Hours::from_hours_minutes(1, 30), Hours::from_centi(150));
        assert_eq!(Hours::from_hours_minutes(0, 45), Hours::from_centi(75));
        // 61 minutes = 1.01666..h, rounds to 1.02
        assert_eq!(Hours::from_hours_minutes(1, 1), Hours::from_centi(102));
    }

    #[test]
    fn arithmetic_is_exact() {
        let a = Hours::from_f64(0.1);
        let total: Hours = std::iter::repeat_n(a, 10).sum();
        assert_eq!(total, Hours::from_f64(1.0));
    }

    #[test]
    fn clamping_reports() {
        let (clamped, was_negative) = Hours::from_centi(-5).clamp_non_negative();
        assert_eq!(clamped, Hours::ZERO);
        assert!(was_negative);
        let (kept, was_negative) = Hours::from_centi(5).clamp_non_negative();
        assert_eq!(kept, Hours::from_centi(5));
        assert!(!was_negative);
    }

    #[test]
    fn display_trims_zeros() {
        assert_eq!(Hours::from_f64(1.5).to_string(), "1.5");
        assert_eq!(Hours::from_f64(2.0).to_string(), "2");
        assert_eq!(Hours::from_f64(0.25).to_string(), "0.25");
    }
}
