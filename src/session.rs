//! Headless host state for a date calculator front-end.
//!
//! A [`Session`] is the single application context a front-end owns. UI
//! events go through [`Session::dispatch`], which calls the parser and the
//! difference engine and then writes the result into [`DisplayState`] inside
//! an [`UpdateGuard`]. While the guard is alive further events are ignored,
//! so widgets that echo their new contents back as events cannot loop.

use std::ops::{Deref, DerefMut};

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::{CalendarDate, DateFormat, DateTextParser, DiffResult, ParseError, compute_diff};

/// Something the user did in the front-end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// A day was picked on the start calendar.
    StartSelected(CalendarDate),
    /// A day was picked on the end calendar.
    EndSelected(CalendarDate),
    /// Text was entered for the start date.
    StartText(String),
    /// Text was entered for the end date.
    EndText(String),
    StartToday,
    EndToday,
    /// Exchange start and end.
    Swap,
}

/// What a dispatched event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Dates changed and the display was redrawn.
    Updated(DiffResult),
    /// Entered text was not a date; the previous date is kept.
    Rejected(ParseError),
    /// The event arrived while the display was being updated.
    Ignored,
}

/// Rendered text for every output field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayState {
    pub from:   String,
    pub to:     String,
    pub days:   String,
    pub months: String,
    pub years:  String,
    /// Label next to the "today" shortcuts, e.g. `Today: 03/14/2024`
    pub today:  String,
}

#[derive(Debug)]
pub struct Session {
    start:    CalendarDate,
    end:      CalendarDate,
    today:    CalendarDate,
    result:   DiffResult,
    display:  DisplayState,
    format:   DateFormat,
    parser:   DateTextParser,
    updating: bool,
}

impl Session {
    /// Starts a session with both dates set to `today`.
    pub fn new(today: CalendarDate) -> Self {
        let mut session = Self {
            start: today,
            end: today,
            today,
            result: DiffResult::default(),
            display: DisplayState::default(),
            format: DateFormat::default_format(),
            parser: DateTextParser::default(),
            updating: false,
        };
        session.render();
        session
    }

    /// Replaces the parser used for text entry.
    #[must_use]
    pub fn with_parser(mut self, parser: DateTextParser) -> Self {
        self.parser = parser;
        self
    }

    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    pub const fn today(&self) -> CalendarDate {
        self.today
    }

    pub const fn result(&self) -> DiffResult {
        self.result
    }

    pub const fn display(&self) -> &DisplayState {
        &self.display
    }

    pub const fn is_updating(&self) -> bool {
        self.updating
    }

    /// Moves "today" forward, e.g. after midnight. Does not touch the selected dates.
    pub fn refresh_today(&mut self, today: CalendarDate) {
        self.today = today;
        self.display.today = self.today_label();
    }

    /// Routes an event to its handler and recomputes the difference.
    pub fn dispatch(&mut self, event: Event) -> Outcome {
        if self.updating {
            debug!(?event, "Ignoring event raised during display update");
            return Outcome::Ignored;
        }

        let dates = match event {
            Event::StartSelected(date) => Ok((date, self.end)),
            Event::EndSelected(date) => Ok((self.start, date)),
            Event::StartText(text) => self.read_entry(&text).map(|date| (date, self.end)),
            Event::EndText(text) => self.read_entry(&text).map(|date| (self.start, date)),
            Event::StartToday => Ok((self.today, self.end)),
            Event::EndToday => Ok((self.start, self.today)),
            Event::Swap => Ok((self.end, self.start)),
        };

        match dates {
            Ok((start, end)) => Outcome::Updated(self.recalculate(start, end)),
            Err(err) => Outcome::Rejected(err),
        }
    }

    /// Marks the display as being written until the returned guard is dropped.
    pub fn begin_update(&mut self) -> UpdateGuard<'_> {
        let previous = std::mem::replace(&mut self.updating, true);
        UpdateGuard {
            session: self,
            previous,
        }
    }

    fn read_entry(&self, text: &str) -> Result<CalendarDate, ParseError> {
        self.parser.try_parse(text).inspect_err(|err| {
            warn!(input = text, %err, "Keeping previous date");
        })
    }

    fn recalculate(&mut self, start: CalendarDate, end: CalendarDate) -> DiffResult {
        debug!(%start, %end, "Recalculating");
        let result = compute_diff(start, end);
        info!(
            years = result.years(),
            months = result.months(),
            days = result.days(),
            "Difference"
        );

        let mut guard = self.begin_update();
        guard.start = start;
        guard.end = end;
        guard.result = result;
        guard.render();
        result
    }

    fn render(&mut self) {
        self.display = DisplayState {
            from:   self.format.format(&self.start),
            to:     self.format.format(&self.end),
            days:   self.result.days().to_string(),
            months: self.result.months().to_string(),
            years:  self.result.years().to_string(),
            today:  self.today_label(),
        };
    }

    fn today_label(&self) -> String {
        format!("Today: {}", self.format.format(&self.today))
    }
}

/// Scoped "display is updating" flag; restores the previous state on drop.
#[derive(Debug)]
pub struct UpdateGuard<'a> {
    session:  &'a mut Session,
    previous: bool,
}

impl Deref for UpdateGuard<'_> {
    type Target = Session;

    fn deref(&self) -> &Session {
        self.session
    }
}

impl DerefMut for UpdateGuard<'_> {
    fn deref_mut(&mut self) -> &mut Session {
        self.session
    }
}

impl Drop for UpdateGuard<'_> {
    fn drop(&mut self) {
        self.session.updating = self.previous;
    }
}
