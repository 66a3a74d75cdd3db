//! # repeat-engine
//!
//! Deterministic next-date computation for task repeat rules.
//!
//! Given a reference date ("today"), the previous date of a task and a compact
//! repeat rule, the engine returns the next date the task falls on. Every
//! function is pure: the reference date is always an argument, never read from
//! the system clock.
//!
//! ## Rules
//!
//! - `y`: every year on the anchor's month and day
//! - `d 7`: every 7 days (1 to 400)
//! - `w 1,4`: on Mondays and Thursdays (1 = Monday, 7 = Sunday)
//! - `m 1,-1`: on the 1st and the last day of every month
//! - `m 15 3,9`: on 15 March and 15 September
//!
//! ## Modules
//!
//! - [`rule`]: rule grammar and parser
//! - [`date`]: day-granularity dates, `YYYYMMDD` and `DD.MM.YYYY` forms
//! - [`advance`]: fixed-interval stepping for `y` and `d` rules
//! - [`weekday`]: weekday resolution for `w` rules
//! - [`monthday`]: day-of-month resolution for `m` rules
//! - [`evaluator`]: the top-level entry points
//! - [`lifecycle`]: task date normalisation and completion
//! - [`error`]: Error types

pub mod advance;
pub mod date;
pub mod error;
pub mod evaluator;
pub mod lifecycle;
pub mod monthday;
mod nearest;
pub mod rule;
pub mod weekday;

pub use date::{parse_search_date, CalendarDate};
pub use error::{DateParseError, EvaluationError, Result, RuleError};
pub use evaluator::{next_date, next_date_from_text, next_occurrence, parse_rule};
pub use lifecycle::{complete, schedule_date, Completion};
pub use rule::RepeatRule;
