//! Textual date patterns.
//!
//! A [`DateFormat`] is compiled from a strftime-style pattern such as
//! `"%m/%d/%Y"` and can both render a [`CalendarDate`] and match text
//! against the pattern. Matching is anchored at both ends: the whole input
//! has to be consumed.

use std::fmt;

use crate::{
    CalendarDate, DEFAULT_PATTERN, DateError, MONTH_ABBREV_LEN, Month, TWO_DIGIT_YEAR_PIVOT,
};

/// Errors raised while compiling a pattern string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// A `%` followed by a letter this crate does not know.
    #[error("Unknown specifier '%{0}' in pattern")]
    UnknownSpecifier(char),

    /// Pattern ends with a lone `%`.
    #[error("Pattern ends with an incomplete specifier")]
    TrailingPercent,

    /// A date field appears more than once.
    #[error("Pattern sets the {0} more than once")]
    DuplicateField(&'static str),

    /// A date field never appears.
    #[error("Pattern has no {0} field")]
    MissingField(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    /// `%m`
    MonthNumber,
    /// `%B`
    MonthName,
    /// `%b`
    MonthAbbrev,
    /// `%d`
    Day,
    /// `%Y`
    Year4,
    /// `%y`
    Year2,
    /// A space in the pattern; matches one or more whitespace characters
    Space,
    Literal(char),
}

impl Token {
    const fn field(self) -> Option<&'static str> {
        match self {
            Self::MonthNumber | Self::MonthName | Self::MonthAbbrev => Some("month"),
            Self::Day => Some("day"),
            Self::Year4 | Self::Year2 => Some("year"),
            Self::Space | Self::Literal(_) => None,
        }
    }
}

/// A compiled date pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateFormat {
    pattern: String,
    tokens:  Vec<Token>,
}

impl DateFormat {
    /// Compiles a pattern made of `%m %d %Y %y %B %b %%` and literal characters.
    ///
    /// # Errors
    /// Returns `FormatError` for unknown specifiers, or when the pattern does
    /// not name each of month, day and year exactly once.
    pub fn new(pattern: &str) -> Result<Self, FormatError> {
        let mut tokens = Vec::new();
        let mut chars = pattern.chars();

        while let Some(c) = chars.next() {
            let token = match c {
                '%' => match chars.next() {
                    Some('m') => Token::MonthNumber,
                    Some('B') => Token::MonthName,
                    Some('b') => Token::MonthAbbrev,
                    Some('d') => Token::Day,
                    Some('Y') => Token::Year4,
                    Some('y') => Token::Year2,
                    Some('%') => Token::Literal('%'),
                    Some(other) => return Err(FormatError::UnknownSpecifier(other)),
                    None => return Err(FormatError::TrailingPercent),
                },
                c if c.is_whitespace() => Token::Space,
                c => Token::Literal(c),
            };
            tokens.push(token);
        }

        const FIELDS: [&str; 3] = ["month", "day", "year"];
        let count = |field| tokens.iter().filter(|t| t.field() == Some(field)).count();

        if let Some(field) = FIELDS.into_iter().find(|&field| count(field) > 1) {
            return Err(FormatError::DuplicateField(field));
        }
        if let Some(field) = FIELDS.into_iter().find(|&field| count(field) == 0) {
            return Err(FormatError::MissingField(field));
        }

        Ok(Self {
            pattern: pattern.to_owned(),
            tokens,
        })
    }

    /// The default display format, `%m/%d/%Y`.
    pub fn default_format() -> Self {
        Self::new(DEFAULT_PATTERN).unwrap_or_else(|_| unreachable!("default pattern compiles"))
    }

    /// The pattern string this format was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Renders `date` with this pattern.
    pub fn format(&self, date: &CalendarDate) -> String {
        // Every specifier that compiles here has the same meaning in chrono
        date.to_naive().format(&self.pattern).to_string()
    }

    /// Matches the whole of `text` against this pattern.
    ///
    /// Returns `None` when the text does not fit the pattern or the fields
    /// do not form a real date. Out-of-range days are never clamped.
    pub fn parse(&self, text: &str) -> Option<CalendarDate> {
        self.try_parse(text)?.ok()
    }

    /// Like [`parse`](Self::parse), but keeps the reason a matching text was
    /// rejected: `None` if the text does not fit the pattern, `Some(Err(_))`
    /// if it fits but names an impossible date.
    pub fn try_parse(&self, text: &str) -> Option<Result<CalendarDate, DateError>> {
        let (year, month, day) = self.fields(text)?;
        Some(CalendarDate::new(year, month, day))
    }

    /// Raw (year, month, day) numbers read from `text`, before calendar checks.
    fn fields(&self, text: &str) -> Option<(u16, u8, u8)> {
        let mut rest = text;
        let (mut year, mut month, mut day) = (None, None, None);

        for token in &self.tokens {
            match *token {
                Token::MonthNumber => month = Some(take_number(&mut rest, 1, 2)?),
                Token::MonthName => month = Some(take_month_name(&mut rest, false)?),
                Token::MonthAbbrev => month = Some(take_month_name(&mut rest, true)?),
                Token::Day => day = Some(take_number(&mut rest, 1, 2)?),
                Token::Year4 => year = Some(take_number(&mut rest, 4, 4)?),
                Token::Year2 => year = Some(expand_two_digit_year(take_number(&mut rest, 2, 2)?)),
                Token::Space => {
                    let trimmed = rest.trim_start();
                    if trimmed.len() == rest.len() {
                        return None;
                    }
                    rest = trimmed;
                },
                Token::Literal(c) => rest = rest.strip_prefix(c)?,
            }
        }

        if !rest.is_empty() {
            return None;
        }
        // month and day are at most two digits
        Some((year?, u8::try_from(month?).ok()?, u8::try_from(day?).ok()?))
    }
}

impl Default for DateFormat {
    fn default() -> Self {
        Self::default_format()
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Consumes between `min` and `max` ASCII digits from the front of `rest`.
fn take_number(rest: &mut &str, min: usize, max: usize) -> Option<u16> {
    let len = rest.bytes().take(max).take_while(u8::is_ascii_digit).count();
    if len < min {
        return None;
    }
    let (digits, tail) = rest.split_at(len);
    *rest = tail;
    digits.parse().ok()
}

/// Consumes an English month name (or its abbreviation) from the front of `rest`.
fn take_month_name(rest: &mut &str, abbrev: bool) -> Option<u16> {
    let len = rest.chars().take_while(char::is_ascii_alphabetic).count();
    let (word, tail) = rest.split_at(len);
    let month = if abbrev {
        if word.len() != MONTH_ABBREV_LEN {
            return None;
        }
        Month::from_abbrev(word)?
    } else {
        Month::from_name(word)?
    };
    *rest = tail;
    Some(u16::from(month.get()))
}

const fn expand_two_digit_year(yy: u16) -> u16 {
    if yy <= TWO_DIGIT_YEAR_PIVOT { 2000 + yy } else { 1900 + yy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::date;

    fn compiled(pattern: &str) -> DateFormat {
        DateFormat::new(pattern).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_patterns() {
        assert_eq!(DateFormat::new("%m/%d/%Q"), Err(FormatError::UnknownSpecifier('Q')));
        assert_eq!(DateFormat::new("%m/%d/%Y%"), Err(FormatError::TrailingPercent));
        assert_eq!(DateFormat::new("%m/%d"), Err(FormatError::MissingField("year")));
        assert_eq!(DateFormat::new("%m/%B/%Y"), Err(FormatError::DuplicateField("month")));
        assert_eq!(DateFormat::new("%d/%d/%Y"), Err(FormatError::DuplicateField("day")));
        assert_eq!(DateFormat::new(""), Err(FormatError::MissingField("month")));
    }

    #[test]
    fn test_duplicate_field_reported_before_missing_field() {
        assert_eq!(DateFormat::new("%d %d"), Err(FormatError::DuplicateField("day")));
        assert_eq!(DateFormat::new("%y-%Y"), Err(FormatError::DuplicateField("year")));
        assert_eq!(DateFormat::new("%B %d %b"), Err(FormatError::DuplicateField("month")));
    }

    #[test]
    fn test_pattern_accessors() {
        let f = compiled("%Y-%m-%d");
        assert_eq!(f.pattern(), "%Y-%m-%d");
        assert_eq!(f.to_string(), "%Y-%m-%d");
        assert_eq!(DateFormat::default().pattern(), "%m/%d/%Y");
    }

    #[test]
    fn test_format_each_specifier() {
        let d = date(2024, 3, 4);
        assert_eq!(compiled("%m/%d/%Y").format(&d), "03/04/2024");
        assert_eq!(compiled("%m-%d-%y").format(&d), "03-04-24");
        assert_eq!(compiled("%Y-%m-%d").format(&d), "2024-03-04");
        assert_eq!(compiled("%B %d, %Y").format(&d), "March 04, 2024");
        assert_eq!(compiled("%d %b %Y").format(&d), "04 Mar 2024");
        assert_eq!(compiled("%Y%%%m%%%d").format(&d), "2024%03%04");
        assert_eq!(compiled("%m/%d/%Y").format(&date(7, 1, 2)), "01/02/0007");
    }

    #[test]
    fn test_parse_numeric_widths() {
        let f = compiled("%m/%d/%Y");
        assert_eq!(f.parse("03/14/2024"), Some(date(2024, 3, 14)));
        assert_eq!(f.parse("3/4/2024"), Some(date(2024, 3, 4)));
        assert_eq!(f.parse("03/14/24"), None, "%Y needs four digits");
        assert_eq!(f.parse("03/14/20245"), None, "trailing digit");
        assert_eq!(f.parse("003/14/2024"), None, "three-digit month");
        assert_eq!(f.parse("03/14/2024 "), None, "trailing space");
    }

    #[test]
    fn test_parse_two_digit_year_pivot() {
        let f = compiled("%m/%d/%y");
        assert_eq!(f.parse("01/01/00"), Some(date(2000, 1, 1)));
        assert_eq!(f.parse("01/01/68"), Some(date(2068, 1, 1)));
        assert_eq!(f.parse("01/01/69"), Some(date(1969, 1, 1)));
        assert_eq!(f.parse("01/01/99"), Some(date(1999, 1, 1)));
        assert_eq!(f.parse("01/01/2024"), None);
    }

    #[test]
    fn test_parse_month_names() {
        assert_eq!(compiled("%B %d, %Y").parse("March 14, 2024"), Some(date(2024, 3, 14)));
        assert_eq!(compiled("%B %d, %Y").parse("march  14,   2024"), Some(date(2024, 3, 14)));
        assert_eq!(compiled("%B %d, %Y").parse("Mar 14, 2024"), None);
        assert_eq!(compiled("%b %d, %Y").parse("MAR 14, 2024"), Some(date(2024, 3, 14)));
        assert_eq!(compiled("%b %d, %Y").parse("March 14, 2024"), None);
        assert_eq!(compiled("%d %B %Y").parse("14 March 2024"), Some(date(2024, 3, 14)));
        assert_eq!(compiled("%d %B %Y").parse("14March 2024"), None, "space is required");
    }

    #[test]
    fn test_parse_rejects_calendar_illegal_dates() {
        assert_eq!(compiled("%m/%d/%Y").parse("02/30/2021"), None);
        assert_eq!(compiled("%m/%d/%Y").parse("04/31/2021"), None);
        assert_eq!(compiled("%m/%d/%Y").parse("02/29/2021"), None);
        assert_eq!(compiled("%m/%d/%Y").parse("02/29/2020"), Some(date(2020, 2, 29)));
        assert_eq!(compiled("%m/%d/%Y").parse("13/01/2020"), None);
        assert_eq!(compiled("%m/%d/%Y").parse("00/01/2020"), None);
        assert_eq!(compiled("%Y-%m-%d").parse("0000-01-01"), None);
    }

    #[test]
    fn test_try_parse_separates_mismatch_from_invalid_date() {
        let f = compiled("%m/%d/%Y");
        assert_eq!(f.try_parse("2021-02-03"), None);
        assert_eq!(
            f.try_parse("02/30/2021"),
            Some(Err(DateError::InvalidDay {
                year: 2021,
                month: 2,
                day: 30
            }))
        );
        assert_eq!(f.try_parse("13/01/2021"), Some(Err(DateError::InvalidMonth(13))));
        assert_eq!(f.try_parse("01/01/0000"), Some(Err(DateError::InvalidYear(0))));
        assert_eq!(f.try_parse("12/31/2021"), Some(Ok(date(2021, 12, 31))));
    }

    #[test]
    fn test_parse_non_ascii_input() {
        assert_eq!(compiled("%m/%d/%Y").parse("03/1４/2024"), None);
        assert_eq!(compiled("%B %d %Y").parse("Mär 14 2024"), None);
    }
}
