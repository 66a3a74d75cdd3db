//! Fixed-interval stepping for `y` and `d N` rules.
//!
//! These rules step forward from the anchor itself, not from the search start:
//! the result is always `anchor + k * step` for the smallest `k >= 1` that is
//! not before the reference date.

use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};

/// The interval a rule steps by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// One calendar year. 29 February falls back to 28 February in common years.
    Years,
    /// A fixed number of days.
    Days(u32),
}

/// Step forward from `anchor` at least once, until the result is on or after
/// `reference`.
///
/// # Errors
///
/// Returns [`EvaluationError::DateOverflow`] if the result is not representable,
/// and [`EvaluationError::NoCandidateFound`] for a zero-day step.
///
/// # Examples
///
/// ```
/// use repeat_engine::advance::{advance, Step};
/// use repeat_engine::CalendarDate;
///
/// let anchor = CalendarDate::parse_compact("20230317").unwrap();
/// let reference = CalendarDate::parse_compact("20230401").unwrap();
/// let next = advance(anchor, reference, Step::Days(7)).unwrap();
/// assert_eq!(next.compact(), "20230407");
/// ```
pub fn advance(anchor: CalendarDate, reference: CalendarDate, step: Step) -> Result<CalendarDate> {
    match step {
        Step::Years => advance_years(anchor, reference),
        Step::Days(days) => advance_days(anchor, reference, days),
    }
}

fn advance_years(anchor: CalendarDate, reference: CalendarDate) -> Result<CalendarDate> {
    // Landing in the reference year is the earliest possible hit; one more year
    // is needed when that date is still before the reference.
    let behind = i64::from(reference.year()) - i64::from(anchor.year());
    let years = u32::try_from(behind.max(1)).map_err(|_| years_overflow(anchor))?;

    let next = add_years(anchor, years)?;
    if next < reference {
        let years = years.checked_add(1).ok_or_else(|| years_overflow(anchor))?;
        return add_years(anchor, years);
    }
    Ok(next)
}

fn advance_days(anchor: CalendarDate, reference: CalendarDate, days: u32) -> Result<CalendarDate> {
    if days == 0 {
        return Err(EvaluationError::NoCandidateFound(
            "a zero-day interval never advances".to_string(),
        ));
    }
    let step = u64::from(days);
    let gap = anchor.days_until(&reference);
    let steps = if gap <= 0 {
        1
    } else {
        (gap as u64).div_ceil(step)
    };

    steps
        .checked_mul(step)
        .and_then(|total| anchor.add_days(total))
        .ok_or_else(|| {
            EvaluationError::DateOverflow(format!("{anchor} + {steps} x {days} days"))
        })
}

fn add_years(anchor: CalendarDate, years: u32) -> Result<CalendarDate> {
    anchor
        .add_years(years)
        .ok_or_else(|| EvaluationError::DateOverflow(format!("{anchor} + {years} years")))
}

fn years_overflow(anchor: CalendarDate) -> EvaluationError {
    EvaluationError::DateOverflow(format!("yearly steps from {anchor}"))
}
