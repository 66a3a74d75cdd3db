//! Closest-candidate selection shared by the multi-value resolvers.

use crate::date::CalendarDate;
use crate::error::{EvaluationError, Result};

/// Accumulator for a fold over candidate dates, keeping the one with the
/// smallest distance from `origin`. Equal distances keep the earlier offer.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Nearest {
    origin: CalendarDate,
    best: Option<(i64, CalendarDate)>,
}

impl Nearest {
    pub(crate) fn new(origin: CalendarDate) -> Self {
        Self { origin, best: None }
    }

    pub(crate) fn offer(self, candidate: CalendarDate) -> Self {
        let distance = self.origin.days_until(&candidate);
        match self.best {
            Some((best, _)) if best <= distance => self,
            _ => Self {
                best: Some((distance, candidate)),
                ..self
            },
        }
    }

    pub(crate) fn finish(self, rule: impl FnOnce() -> String) -> Result<CalendarDate> {
        self.best
            .map(|(_, date)| date)
            .ok_or_else(|| EvaluationError::NoCandidateFound(rule()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_keeps_smallest_distance() {
        let nearest = Nearest::new(date(2023, 3, 17))
            .offer(date(2023, 3, 23))
            .offer(date(2023, 3, 20))
            .offer(date(2023, 3, 31));
        assert_eq!(nearest.finish(String::new).unwrap(), date(2023, 3, 20));
    }

    #[test]
    fn test_tie_keeps_first_offer() {
        let first = date(2023, 3, 20);
        let nearest = Nearest::new(date(2023, 3, 17)).offer(first).offer(first);
        assert_eq!(nearest.best, Some((3, first)));
    }

    #[test]
    fn test_empty_fold_is_no_candidate() {
        let err = Nearest::new(date(2023, 3, 17))
            .finish(|| "w".to_string())
            .unwrap_err();
        assert_eq!(err, EvaluationError::NoCandidateFound("w".to_string()));
    }
}
