use crate::DateError;
use crate::consts::{
    CENTURY_CYCLE, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP, GREGORIAN_CYCLE, LEAP_YEAR_CYCLE,
    MAX_MONTH, MAX_YEAR, MONTH_ABBREV_LEN, MONTH_NAMES,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::{NonZeroU8, NonZeroU16};

/// A year in `1..=MAX_YEAR` (1..=9999).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(NonZeroU16);

impl Year {
    /// # Errors
    /// Returns `DateError::InvalidYear` if the value is 0 or above `MAX_YEAR`.
    pub fn new(value: u16) -> Result<Self, DateError> {
        match NonZeroU16::new(value) {
            Some(year) if value <= MAX_YEAR => Ok(Self(year)),
            _ => Err(DateError::InvalidYear(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u16 {
        self.0.get()
    }
}

impl TryFrom<u16> for Year {
    type Error = DateError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(year: Year) -> Self {
        year.get()
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}", self.get())
    }
}

/// A month in `1..=12`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Month(NonZeroU8);

impl Month {
    /// # Errors
    /// Returns `DateError::InvalidMonth` if the value is 0 or above 12.
    pub fn new(value: u8) -> Result<Self, DateError> {
        match NonZeroU8::new(value) {
            Some(month) if value <= MAX_MONTH => Ok(Self(month)),
            _ => Err(DateError::InvalidMonth(value)),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }

    /// Full English name, e.g. "March"
    pub const fn name(self) -> &'static str {
        MONTH_NAMES[self.get() as usize]
    }

    /// Three-letter English abbreviation, e.g. "Mar"
    pub fn abbrev(self) -> &'static str {
        &self.name()[..MONTH_ABBREV_LEN]
    }

    /// Looks up a month by its full English name, ignoring ASCII case.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::find(|month| month.name().eq_ignore_ascii_case(name))
    }

    /// Looks up a month by its three-letter abbreviation, ignoring ASCII case.
    pub fn from_abbrev(abbrev: &str) -> Option<Self> {
        Self::find(|month| month.abbrev().eq_ignore_ascii_case(abbrev))
    }

    fn find(pred: impl Fn(Self) -> bool) -> Option<Self> {
        (1..=MAX_MONTH).filter_map(|m| Self::new(m).ok()).find(|&month| pred(month))
    }
}

impl TryFrom<u8> for Month {
    type Error = DateError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Month> for u8 {
    fn from(month: Month) -> Self {
        month.get()
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

/// A day of month, valid for the year and month it was checked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Day(NonZeroU8);

impl Day {
    /// # Errors
    /// Returns `DateError::InvalidDay` if the value is 0 or past the end of the month.
    pub fn new(value: u8, year: Year, month: Month) -> Result<Self, DateError> {
        match NonZeroU8::new(value) {
            Some(day) if value <= days_in_month(year.get(), month.get()) => Ok(Self(day)),
            _ => Err(DateError::InvalidDay {
                year: year.get(),
                month: month.get(),
                day: value,
            }),
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0.get()
    }
}

impl TryFrom<u8> for Day {
    type Error = DateError;

    // Without a year and month only the upper bound of the longest month applies.
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match NonZeroU8::new(value) {
            Some(day) if value <= DAYS_IN_MONTH[1] => Ok(Self(day)),
            _ => Err(DateError::InvalidDay {
                year: 0,
                month: 0,
                day: value,
            }),
        }
    }
}

impl From<Day> for u8 {
    fn from(day: Day) -> Self {
        day.get()
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}", self.get())
    }
}

// Gregorian helpers

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || year % GREGORIAN_CYCLE == 0
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_bounds() {
        assert!(Year::new(1).is_ok());
        assert!(Year::new(2024).is_ok());
        assert!(Year::new(9999).is_ok());
        assert!(matches!(Year::new(0), Err(DateError::InvalidYear(0))));
        assert!(matches!(Year::new(10000), Err(DateError::InvalidYear(10000))));
    }

    #[test]
    fn test_year_display_is_zero_padded() {
        assert_eq!(Year::new(2024).unwrap().to_string(), "2024");
        assert_eq!(Year::new(33).unwrap().to_string(), "0033");
    }

    #[test]
    fn test_month_bounds() {
        for m in 1..=12 {
            assert!(Month::new(m).is_ok(), "Month {m} should be valid");
        }
        assert!(matches!(Month::new(0), Err(DateError::InvalidMonth(0))));
        assert!(matches!(Month::new(13), Err(DateError::InvalidMonth(13))));
    }

    #[test]
    fn test_month_names() {
        let march = Month::new(3).unwrap();
        assert_eq!(march.name(), "March");
        assert_eq!(march.abbrev(), "Mar");
        assert_eq!(march.to_string(), "03");

        assert_eq!(Month::from_name("september"), Month::new(9).ok());
        assert_eq!(Month::from_name("SEPTEMBER"), Month::new(9).ok());
        assert_eq!(Month::from_abbrev("sep"), Month::new(9).ok());
        assert_eq!(Month::from_name("Sep"), None);
        assert_eq!(Month::from_abbrev("Sept"), None);
        assert_eq!(Month::from_name(""), None);
    }

    #[test]
    fn test_day_checked_against_month() {
        struct TestCase {
            year:  u16,
            month: u8,
            day:   u8,
            valid: bool,
        }

        let cases = [
            TestCase { year: 2024, month: 1, day: 31, valid: true },
            TestCase { year: 2024, month: 1, day: 32, valid: false },
            TestCase { year: 2023, month: 2, day: 28, valid: true },
            TestCase { year: 2023, month: 2, day: 29, valid: false },
            TestCase { year: 2024, month: 2, day: 29, valid: true },
            TestCase { year: 2024, month: 2, day: 30, valid: false },
            TestCase { year: 2024, month: 4, day: 30, valid: true },
            TestCase { year: 2024, month: 4, day: 31, valid: false },
            TestCase { year: 2024, month: 4, day: 0, valid: false },
        ];

        for case in &cases {
            let year = Year::new(case.year).unwrap();
            let month = Month::new(case.month).unwrap();
            assert_eq!(
                Day::new(case.day, year, month).is_ok(),
                case.valid,
                "{}-{:02}-{:02}",
                case.year,
                case.month,
                case.day
            );
        }
    }

    #[test]
    fn test_invalid_day_reports_context() {
        let result = Day::new(31, Year::new(2021).unwrap(), Month::new(4).unwrap());
        assert!(matches!(
            result,
            Err(DateError::InvalidDay {
                year: 2021,
                month: 4,
                day: 31
            })
        ));
    }

    #[test]
    fn test_newtype_serde() {
        let year = Year::new(2024).unwrap();
        assert_eq!(serde_json::to_string(&year).unwrap(), "2024");
        assert_eq!(serde_json::from_str::<Year>("2024").unwrap(), year);
        assert!(serde_json::from_str::<Year>("0").is_err());
        assert!(serde_json::from_str::<Month>("13").is_err());
        assert!(serde_json::from_str::<Day>("32").is_err());
        assert_eq!(serde_json::from_str::<Day>("31").unwrap().get(), 31);
    }

    #[test]
    fn test_is_leap_year_cases() {
        let cases = [
            (2020, true, "divisible by 4"),
            (2024, true, "divisible by 4"),
            (2021, false, "not divisible by 4"),
            (1900, false, "century not divisible by 400"),
            (2100, false, "century not divisible by 400"),
            (2000, true, "divisible by 400"),
            (2400, true, "divisible by 400"),
        ];

        for (year, leap, description) in cases {
            assert_eq!(is_leap_year(year), leap, "Year {year} ({description})");
        }
    }

    #[test]
    fn test_days_in_month_table() {
        let common = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
        for (month, expected) in (1..=12).zip(common) {
            assert_eq!(days_in_month(2023, month), expected, "month {month}");
        }
        assert_eq!(days_in_month(2000, 2), 29);
        assert_eq!(days_in_month(1900, 2), 28);
    }
}
