//! Weekday resolution for `w` rules.
//!
//! Rules number weekdays 1 = Monday through 7 = Sunday. The offset arithmetic
//! runs against [`CalendarDate::weekday_index`] (Sunday = 0), so rule value 7
//! and index 0 both land on Sunday through the wraparound.

use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};
use crate::nearest::Nearest;

/// The first date strictly after `start` that falls on `weekday` (1-7).
pub fn nearest_weekday(start: CalendarDate, weekday: u8) -> Result<CalendarDate> {
    let mut offset = i64::from(weekday) - start.weekday_index();
    if offset <= 0 {
        offset += 7;
    }
    start
        .add_days(offset.unsigned_abs())
        .ok_or_else(|| EvaluationError::DateOverflow(format!("weekday {weekday} after {start}")))
}

/// The nearest date after `search_start` on any of `weekdays`, measured from
/// `reference`. Ties keep the weekday listed first.
pub fn resolve_weekly(
    reference: CalendarDate,
    search_start: CalendarDate,
    weekdays: &[u8],
) -> Result<CalendarDate> {
    weekdays
        .iter()
        .try_fold(Nearest::new(reference), |nearest, &weekday| {
            Ok::<_, EvaluationError>(nearest.offer(nearest_weekday(search_start, weekday)?))
        })?
        .finish(|| format!("no weekday in {weekdays:?} after {search_start}"))
}
