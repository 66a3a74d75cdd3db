//! Next-occurrence evaluation.
//!
//! All functions take the reference date as an input; nothing here reads the
//! system clock. The caller decides what "today" is.

use crate::advance::{advance, Step};
use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};
use crate::monthday::resolve_monthly;
use crate::rule::RepeatRule;
use crate::weekday::resolve_weekly;

/// The next date for `rule` given the previous date `anchor`, never before
/// `reference`.
///
/// `y` and `d N` rules step from the anchor and may return the reference date
/// itself. `w` and `m` rules search strictly after the later of `reference`
/// and `anchor`.
///
/// A result after 9999-12-31 is [`EvaluationError::DateOverflow`]: every date
/// returned here can be written as `YYYYMMDD`.
pub fn next_occurrence(
    reference: CalendarDate,
    anchor: CalendarDate,
    rule: &RepeatRule,
) -> Result<CalendarDate> {
    let search_start = reference.max(anchor);
    let next = match rule {
        RepeatRule::Yearly => advance(anchor, reference, Step::Years),
        RepeatRule::EveryNDays { n } => advance(anchor, reference, Step::Days(*n)),
        RepeatRule::Weekly { days } => resolve_weekly(reference, search_start, days),
        RepeatRule::Monthly { days, months } => {
            resolve_monthly(search_start, days, months.as_deref())
        }
    }?;
    if !next.fits_compact() {
        return Err(EvaluationError::DateOverflow(format!(
            "{next} does not fit YYYYMMDD"
        )));
    }
    Ok(next)
}

/// Parse a rule, attaching the rule text to any parser error.
pub fn parse_rule(rule: &str) -> Result<RepeatRule> {
    RepeatRule::parse(rule).map_err(|kind| EvaluationError::InvalidRule {
        rule: rule.to_string(),
        kind,
    })
}

/// The next date as `YYYYMMDD` text, from an anchor date in the same form and
/// rule text.
///
/// # Errors
///
/// - [`EvaluationError::InvalidAnchorDate`] if `anchor` is not an 8-digit date
/// - [`EvaluationError::InvalidRule`] if `rule` does not parse
/// - [`EvaluationError::DateOverflow`] if the result does not fit the 8-digit form
///
/// # Examples
///
/// ```
/// use repeat_engine::{next_date, CalendarDate};
///
/// let today = CalendarDate::parse_compact("20230317").unwrap();
/// assert_eq!(next_date(today, "20230301", "w 1,4").unwrap(), "20230320");
/// assert_eq!(next_date(today, "20230317", "y").unwrap(), "20240317");
/// ```
pub fn next_date(reference: CalendarDate, anchor: &str, rule: &str) -> Result<String> {
    let anchor = CalendarDate::parse_compact(anchor).map_err(EvaluationError::InvalidAnchorDate)?;
    let rule = parse_rule(rule)?;
    next_occurrence(reference, anchor, &rule).map(|next| next.compact())
}

/// [`next_date`] with the reference date given as `YYYYMMDD` text as well.
pub fn next_date_from_text(reference: &str, anchor: &str, rule: &str) -> Result<String> {
    let reference =
        CalendarDate::parse_compact(reference).map_err(EvaluationError::InvalidReferenceDate)?;
    next_date(reference, anchor, rule)
}
