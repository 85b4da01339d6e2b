use std::sync::OnceLock;

use crate::{ACCEPTED_PATTERNS, CalendarDate, DateError, DateFormat, FormatError};

/// Failure to turn text into a [`CalendarDate`] through `FromStr` or serde.
///
/// [`parse_date`] itself reports a miss as `None`; this type exists for the
/// `Result`-shaped entry points.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("Empty date string")]
    Empty,

    /// No accepted pattern fit the text.
    #[error("Unrecognized date: {0}")]
    Unrecognized(String),

    /// A pattern fit the text but the fields are not a calendar date.
    #[error(transparent)]
    InvalidDate(#[from] DateError),
}

/// Tries an ordered list of patterns against free text.
///
/// The default display format is always tried first, then `formats` in
/// order. The first pattern that matches the whole text and yields a real
/// date wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTextParser {
    default: DateFormat,
    formats: Vec<DateFormat>,
}

impl DateTextParser {
    pub fn new(formats: Vec<DateFormat>) -> Self {
        Self {
            default: DateFormat::default_format(),
            formats,
        }
    }

    /// Builds a parser from pattern strings.
    ///
    /// # Errors
    /// Returns the first `FormatError` among `patterns`.
    pub fn from_patterns<'a>(patterns: impl IntoIterator<Item = &'a str>) -> Result<Self, FormatError> {
        let formats = patterns.into_iter().map(DateFormat::new).collect::<Result<_, _>>()?;
        Ok(Self::new(formats))
    }

    /// The parser behind [`parse_date`], built once.
    pub fn shared() -> &'static Self {
        static PARSER: OnceLock<DateTextParser> = OnceLock::new();
        PARSER.get_or_init(Self::default)
    }

    /// Every pattern in the order it is tried.
    pub fn formats(&self) -> impl Iterator<Item = &DateFormat> {
        std::iter::once(&self.default).chain(&self.formats)
    }

    pub fn parse(&self, text: &str) -> Option<CalendarDate> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        self.formats().find_map(|format| format.parse(text))
    }

    /// Like [`parse`](Self::parse), but explains a miss.
    ///
    /// # Errors
    /// `ParseError::Empty` for blank text; `ParseError::InvalidDate` with the
    /// first calendar error when some pattern fit the text but no pattern
    /// produced a real date; `ParseError::Unrecognized` otherwise.
    pub fn try_parse(&self, text: &str) -> Result<CalendarDate, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ParseError::Empty);
        }

        let mut first_invalid = None;
        for format in self.formats() {
            match format.try_parse(text) {
                Some(Ok(date)) => return Ok(date),
                Some(Err(err)) => {
                    first_invalid.get_or_insert(err);
                },
                None => {},
            }
        }
        Err(first_invalid.map_or_else(|| ParseError::Unrecognized(text.to_owned()), ParseError::from))
    }
}

impl Default for DateTextParser {
    /// The accepted-format table, minus the default format which is always tried first.
    fn default() -> Self {
        let formats = ACCEPTED_PATTERNS
            .iter()
            .skip(1)
            .filter_map(|pattern| DateFormat::new(pattern).ok())
            .collect();
        Self::new(formats)
    }
}

/// Parses `text` with the fixed list of accepted formats.
pub fn parse_date(text: &str) -> Option<CalendarDate> {
    DateTextParser::shared().parse(text)
}
