use crate::CalendarDate;

/// Builds a date known to be valid, panicking with the offending triple otherwise.
pub fn date(year: u16, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day)
        .unwrap_or_else(|err| panic!("bad test date {year:04}-{month:02}-{day:02}: {err}"))
}
