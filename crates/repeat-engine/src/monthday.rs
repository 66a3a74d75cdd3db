//! Day-of-month resolution for `m` rules.
//!
//! A negative day counts back from the end of the month: the resolver adds one
//! to the day and targets the following month, then lets calendar
//! normalisation step back across the boundary. `-1` becomes day 0 of the next
//! month, which is the last day of the scanned month; `-2` the day before that.
//! Candidates that normalise into any other month are skipped, never clamped.

use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};
use crate::nearest::Nearest;

/// How many consecutive months the unfiltered scan looks at. Every window of
/// four months contains a 31-day month.
pub const SCAN_MONTHS: i64 = 4;

/// Upper bound on the yearly search for a specific month and day. The longest
/// run of years without a 29 February is eight (e.g. 1896 to 1904).
pub const LEAP_SEARCH_YEARS: i64 = 8;

/// Where a day value lands relative to a month.
///
/// Returns the month ordinal the date is built in, the day to build it with,
/// and the ordinal the result must still belong to.
fn target(month_ordinal: i64, day: i8) -> (i64, i64, i64) {
    let day = i64::from(day);
    if day < 0 {
        (month_ordinal + 1, day + 1, month_ordinal)
    } else {
        (month_ordinal, day, month_ordinal)
    }
}

/// Build `day` inside the month `month_ordinal`, `None` when it rolls over into
/// a neighbouring month.
fn day_in_month(month_ordinal: i64, day: i8) -> Result<Option<CalendarDate>> {
    let (build_month, build_day, intended) = target(month_ordinal, day);
    let date = CalendarDate::normalized(build_month, build_day).ok_or_else(|| {
        EvaluationError::DateOverflow(format!("day {day} of month ordinal {month_ordinal}"))
    })?;
    Ok((date.month_ordinal() == intended).then_some(date))
}

/// The first date strictly after `start` whose day of month is `day`, scanning
/// the month of `start` and the three following it.
///
/// # Errors
///
/// [`EvaluationError::NoCandidateFound`] if none of the scanned months has the
/// day; this cannot happen for days in `-31..=31`.
pub fn nearest_month_day(start: CalendarDate, day: i8) -> Result<CalendarDate> {
    let first = start.month_ordinal();
    for month in first..first + SCAN_MONTHS {
        if let Some(date) = day_in_month(month, day)? {
            if date > start {
                return Ok(date);
            }
        }
    }
    Err(EvaluationError::NoCandidateFound(format!(
        "day {day} within {SCAN_MONTHS} months after {start}"
    )))
}

/// The first date strictly after `start` in `month` (1-12) on `day`, trying
/// the year of `start` first and moving forward one year at a time.
///
/// Month lengths follow the year being tried, so day 29 of February only
/// matches leap years.
///
/// `start` itself never matches, even when it falls on `day` of `month`.
pub fn nearest_specified_day(start: CalendarDate, day: i8, month: u8) -> Result<CalendarDate> {
    let first_year = i64::from(start.year());
    for year in first_year..=first_year + LEAP_SEARCH_YEARS {
        let ordinal = year * 12 + i64::from(month) - 1;
        if let Some(date) = day_in_month(ordinal, day)? {
            if date > start {
                return Ok(date);
            }
        }
    }
    Err(EvaluationError::NoCandidateFound(format!(
        "day {day} of month {month} within {LEAP_SEARCH_YEARS} years after {start}"
    )))
}

/// The nearest date after `search_start` matching any day in `days`, limited
/// to `months` when given. Ties keep the pair listed first, months outermost.
pub fn resolve_monthly(
    search_start: CalendarDate,
    days: &[i8],
    months: Option<&[u8]>,
) -> Result<CalendarDate> {
    let nearest = match months {
        None => days.iter().try_fold(Nearest::new(search_start), |nearest, &day| {
            Ok::<_, EvaluationError>(nearest.offer(nearest_month_day(search_start, day)?))
        })?,
        Some(months) => months
            .iter()
            .flat_map(|&month| days.iter().map(move |&day| (day, month)))
            .try_fold(Nearest::new(search_start), |nearest, (day, month)| {
                Ok::<_, EvaluationError>(
                    nearest.offer(nearest_specified_day(search_start, day, month)?),
                )
            })?,
    };
    nearest.finish(|| format!("no day in {days:?} after {search_start}"))
}
