//! Month-granularity calendar values.
//!
//! Billing only cares about the year and the month; the day of month is never
//! represented, so two dates in the same calendar month are the same
//! [`YearMonth`].

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

/// A calendar month, ordered by year then month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Build a month from its parts.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidMonth`] when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Result<Self, ValidationError> {
        if !(1..=12).contains(&month) {
            return Err(ValidationError::InvalidMonth(format!("{month:02}-{year:04}")));
        }
        Ok(Self { year, month })
    }

    #[must_use]
    pub fn year(self) -> i32 {
        self.year
    }

    /// Month of year, `1..=12`.
    #[must_use]
    pub fn month(self) -> u32 {
        self.month
    }

    /// Whole calendar months from `self` to `other`.
    ///
    /// Negative when `other` is earlier than `self`.
    #[must_use]
    pub fn months_until(self, other: Self) -> i64 {
        let years = i64::from(other.year) - i64::from(self.year);
        let months = i64::from(other.month) - i64::from(self.month);
        years * 12 + months
    }
}

impl From<NaiveDate> for YearMonth {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}-{:04}", self.month, self.year)
    }
}

impl FromStr for YearMonth {
    type Err = ValidationError;

    /// Parse the `MM-YYYY` wire form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(&format!("01-{}", s.trim()), "%d-%m-%Y")
            .map(Self::from)
            .map_err(|_| ValidationError::InvalidMonth(s.to_owned()))
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for YearMonth {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn should_parse_month_year_form() {
        let parsed: YearMonth = "07-2025".parse().unwrap();
        assert_eq!(parsed, ym(2025, 7));
    }

    #[test]
    fn should_reject_out_of_range_month() {
        assert!(matches!(
            "13-2024".parse::<YearMonth>(),
            Err(ValidationError::InvalidMonth(_))
        ));
        assert!(YearMonth::new(2024, 0).is_err());
    }

    #[test]
    fn should_reject_iso_order() {
        assert!("2024-01".parse::<YearMonth>().is_err());
        assert!("".parse::<YearMonth>().is_err());
    }

    #[test]
    fn should_display_with_zero_padding() {
        assert_eq!(ym(2024, 3).to_string(), "03-2024");
    }

    #[test]
    fn should_count_months_across_years() {
        assert_eq!(ym(2023, 11).months_until(ym(2024, 2)), 3);
        assert_eq!(ym(2024, 1).months_until(ym(2024, 6)), 5);
        assert_eq!(ym(2024, 6).months_until(ym(2024, 6)), 0);
    }

    #[test]
    fn should_count_negative_months_when_going_backwards() {
        assert_eq!(ym(2025, 1).months_until(ym(2024, 2)), -11);
    }

    #[test]
    fn should_order_by_year_then_month() {
        assert!(ym(2023, 12) < ym(2024, 1));
        assert!(ym(2024, 2) > ym(2024, 1));
        assert_eq!(ym(2024, 1).max(ym(2023, 5)), ym(2024, 1));
    }

    #[test]
    fn should_drop_day_of_month_when_converting_dates() {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(YearMonth::from(date), ym(2024, 2));
    }

    #[test]
    fn should_roundtrip_through_serde_json() {
        let json = serde_json::to_string(&ym(2024, 12)).unwrap();
        assert_eq!(json, "\"12-2024\"");
        let parsed: YearMonth = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ym(2024, 12));
    }
}
