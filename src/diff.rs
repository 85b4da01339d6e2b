use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{CalendarDate, MONTHS_PER_YEAR, prelude::*};

/// Calendar distance between two dates, viewed three ways.
///
/// `days` is the exact day count. `months` counts whole months, only moving
/// past a month boundary once the day of month has caught up. `years` is
/// derived from the month count. The three are computed from the same pair
/// of dates but are not derivable from one another.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Into,
)]
#[display(fmt = "{years} years, {months} months, {days} days")]
pub struct DiffResult {
    days:   i32,
    months: i32,
    years:  i32,
}

impl DiffResult {
    pub const fn days(&self) -> i32 {
        self.days
    }

    pub const fn months(&self) -> i32 {
        self.months
    }

    pub const fn years(&self) -> i32 {
        self.years
    }

    /// True when the two dates were the same day.
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.months == 0 && self.years == 0
    }
}

/// Computes the difference from `start` to `end`.
///
/// Total over all valid dates. When `end` precedes `start`, `days` is
/// negative and `months`/`years` are zero or negative.
pub fn compute_diff(start: CalendarDate, end: CalendarDate) -> DiffResult {
    let days = start.days_until(&end);

    let mut months = (i32::from(end.year()) - i32::from(start.year())) * MONTHS_PER_YEAR
        + (i32::from(end.month()) - i32::from(start.month()));
    let day_delta = i32::from(end.day()) - i32::from(start.day());

    let years = match end.cmp(&start) {
        Ordering::Greater | Ordering::Equal => {
            if day_delta < 0 {
                months -= 1;
            }
            months.div_euclid(MONTHS_PER_YEAR)
        },
        Ordering::Less => {
            if day_delta < 0 {
                months += 1;
            }
            if months < 0 {
                let years = (months - 1).div_euclid(MONTHS_PER_YEAR) + 1;
                if day_delta > 0 {
                    months += 1;
                }
                years
            } else {
                if day_delta < 0 {
                    months -= 1;
                }
                months.div_euclid(MONTHS_PER_YEAR)
            }
        },
    };

    DiffResult { days, months, years }
}
