mod consts;
mod diff;
mod format;
mod parser;
mod prelude;
mod session;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use diff::{DiffResult, compute_diff};
pub use format::{DateFormat, FormatError};
pub use parser::{DateTextParser, ParseError, parse_date};
pub use session::{DisplayState, Event, Outcome, Session, UpdateGuard};
pub use types::{Day, Month, Year, days_in_month, is_leap_year};

use crate::prelude::*;
use chrono::{Datelike, Days, Months, NaiveDate};
use std::str::FromStr;

/// A date in the proleptic Gregorian calendar, with no time of day.
///
/// Fields are ordered year, month, day so the derived ordering is timeline
/// order. Displays in the default format, `MM/DD/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display(fmt = "{:02}/{:02}/{:04}", "month.get()", "day.get()", "year.get()")]
pub struct CalendarDate {
    year:  Year,
    month: Month,
    day:   Day,
}

/// A (year, month, day) triple that is not a real calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year:04}-{month:02}")]
    InvalidDay { year: u16, month: u8, day: u8 },
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date, checking each component against the calendar.
    ///
    /// # Errors
    /// Returns the `DateError` for the first component that is out of range.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, DateError> {
        let year = Year::new(year)?;
        let month = Month::new(month)?;
        let day = Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// The current local date.
    ///
    /// # Errors
    /// Fails only if the system clock reports a year outside `1..=9999`.
    pub fn today() -> Result<Self, DateError> {
        Self::from_naive(chrono::Local::now().date_naive())
    }

    /// Converts from a chrono date.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` for years chrono allows but this type does not.
    pub fn from_naive(date: NaiveDate) -> Result<Self, DateError> {
        let year = u16::try_from(date.year()).map_err(|_| DateError::InvalidYear(0))?;
        // chrono guarantees month and day fit their ranges
        Self::new(year, date.month() as u8, date.day() as u8)
    }

    pub const fn year(&self) -> u16 {
        self.year.get()
    }

    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    pub const fn year_typed(&self) -> Year {
        self.year
    }

    pub const fn month_typed(&self) -> Month {
        self.month
    }

    pub const fn day_typed(&self) -> Day {
        self.day
    }

    pub const fn to_tuple(&self) -> (u16, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// The same day as a chrono date.
    pub fn to_naive(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(i32::from(self.year()), u32::from(self.month()), u32::from(self.day()))
            .unwrap_or_else(|| unreachable!("{self} is checked at construction"))
    }

    /// Day number counted from 0001-01-01, which is day 1.
    pub fn ordinal(&self) -> i32 {
        self.to_naive().num_days_from_ce()
    }

    /// Inverse of [`ordinal`](Self::ordinal). `None` outside 0001-01-01..=9999-12-31.
    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        NaiveDate::from_num_days_from_ce_opt(ordinal).and_then(|date| Self::from_naive(date).ok())
    }

    /// Signed number of days from `self` to `other`.
    pub fn days_until(&self, other: &Self) -> i32 {
        other.ordinal() - self.ordinal()
    }

    /// Moves the date by a number of days. `None` if the result leaves the supported range.
    pub fn checked_add_days(self, days: i32) -> Option<Self> {
        let step = Days::new(u64::from(days.unsigned_abs()));
        let naive = self.to_naive();
        let moved = if days < 0 { naive.checked_sub_days(step) } else { naive.checked_add_days(step) };
        Self::from_naive(moved?).ok()
    }

    /// Moves the date by whole months, clamping the day to the length of the target month.
    pub fn checked_add_months(self, months: i32) -> Option<Self> {
        let step = Months::new(months.unsigned_abs());
        let naive = self.to_naive();
        let moved =
            if months < 0 { naive.checked_sub_months(step) } else { naive.checked_add_months(step) };
        Self::from_naive(moved?).ok()
    }
}

impl TryFrom<(u16, u8, u8)> for CalendarDate {
    type Error = DateError;

    fn try_from((year, month, day): (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(year, month, day)
    }
}

impl FromStr for CalendarDate {
    type Err = ParseError;

    /// Parses with the default list of accepted formats.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateTextParser::shared().try_parse(s)
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
