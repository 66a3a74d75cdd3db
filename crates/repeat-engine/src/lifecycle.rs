//! Task date lifecycle: normalising a task's date when it is saved, and moving
//! it on when the task is marked done.

use serde::Serialize;

use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};
use crate::evaluator::{next_occurrence, parse_rule};

/// What happens to a task when it is marked done.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "action", content = "date", rename_all = "snake_case")]
pub enum Completion {
    /// One-off task: delete it.
    Remove,
    /// Repeating task: keep it, with this as its new date.
    Reschedule(CalendarDate),
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}

/// The date a task is stored with when created or edited.
///
/// - no date: `today`
/// - a date after `today`: kept as is
/// - a date on or before `today`: `today` for one-off tasks, otherwise the
///   rule's next date from `today`
///
/// The rule is validated even when the date is kept, so a task with an
/// unparsable rule is never saved.
///
/// # Examples
///
/// ```
/// use repeat_engine::{schedule_date, CalendarDate};
///
/// let today = CalendarDate::parse_compact("20230317").unwrap();
/// let date = schedule_date(today, Some("20230101"), Some("d 30")).unwrap();
/// assert_eq!(date.compact(), "20230401");
/// ```
pub fn schedule_date(
    today: CalendarDate,
    date: Option<&str>,
    rule: Option<&str>,
) -> Result<CalendarDate> {
    let date = match non_empty(date) {
        Some(text) => {
            CalendarDate::parse_compact(text).map_err(EvaluationError::InvalidAnchorDate)?
        }
        None => today,
    };

    let next = match non_empty(rule) {
        Some(text) => Some(next_occurrence(today, date, &parse_rule(text)?)?),
        None => None,
    };

    if date > today {
        return Ok(date);
    }
    Ok(next.unwrap_or(today))
}

/// Mark a task dated `date` as done on `today`.
///
/// # Errors
///
/// Propagates [`EvaluationError`] from parsing `date` or evaluating `rule`.
pub fn complete(today: CalendarDate, date: &str, rule: Option<&str>) -> Result<Completion> {
    let Some(rule) = non_empty(rule) else {
        return Ok(Completion::Remove);
    };
    let date = CalendarDate::parse_compact(date).map_err(EvaluationError::InvalidAnchorDate)?;
    let next = next_occurrence(today, date, &parse_rule(rule)?)?;
    Ok(Completion::Reschedule(next))
}
