//! Calendar date range computation for a backfill year

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::DateInterval;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("year {requested} is in the future (current year is {current})")]
    YearInFuture { requested: i32, current: i32 },

    #[error("year {0} is outside the supported calendar range")]
    OutOfRange(i32),
}

/// All calendar dates of `year`, ascending, Jan 1 through Dec 31 — or
/// through yesterday when `year` is the current one.
///
/// `today` is passed in explicitly so the truncation point is a parameter,
/// not ambient state. On Jan 1 of the current year yesterday falls in the
/// prior year and the range is empty: there is nothing to backfill yet.
pub fn compute_dates(year: i32, today: NaiveDate) -> Result<Vec<NaiveDate>, DateRangeError> {
    if year > today.year() {
        return Err(DateRangeError::YearInFuture {
            requested: year,
            current: today.year(),
        });
    }

    let start = NaiveDate::from_ymd_opt(year, 1, 1).ok_or(DateRangeError::OutOfRange(year))?;
    let end = if year == today.year() {
        today.pred_opt().ok_or(DateRangeError::OutOfRange(year))?
    } else {
        NaiveDate::from_ymd_opt(year, 12, 31).ok_or(DateRangeError::OutOfRange(year))?
    };

    if end < start {
        return Ok(Vec::new());
    }

    Ok(start.iter_days().take_while(|d| *d <= end).collect())
}

/// Fetch intervals for a date range: one per consecutive pair, so `N` dates
/// yield `N - 1` intervals.
pub fn consecutive_intervals(dates: &[NaiveDate]) -> Vec<DateInterval> {
    dates
        .windows(2)
        .map(|pair| DateInterval {
            start: pair[0],
            end: pair[1],
        })
        .collect()
}
