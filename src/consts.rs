/// Smallest valid year
pub const MIN_YEAR: u16 = 1;
/// Largest valid year (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Largest valid month (December)
pub const MAX_MONTH: u8 = 12;
/// Months in a year, as a signed value for month arithmetic
pub const MONTHS_PER_YEAR: i32 = 12;

/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Days in each month of a common year, 1-indexed (index 0 is unused)
pub const DAYS_IN_MONTH: [u8; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// English month names, 1-indexed
pub const MONTH_NAMES: [&str; 13] = [
    "",
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Length of an abbreviated month name ("Jan", "Feb", ...)
pub const MONTH_ABBREV_LEN: usize = 3;

pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
pub(crate) const CENTURY_CYCLE: u16 = 100;
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Two-digit years at or below this value belong to the 2000s, above it to the 1900s
pub const TWO_DIGIT_YEAR_PIVOT: u16 = 68;

/// Pattern of the default display format, e.g. `03/14/2024`
pub const DEFAULT_PATTERN: &str = "%m/%d/%Y";

/// Accepted text patterns in priority order (the default pattern comes first)
pub const ACCEPTED_PATTERNS: [&str; 10] = [
    DEFAULT_PATTERN,
    "%m-%d-%Y",
    "%m/%d/%y",
    "%m-%d-%y",
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];
