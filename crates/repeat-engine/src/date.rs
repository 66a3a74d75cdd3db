//! Day-granularity calendar dates and their two textual forms.
//!
//! - compact `YYYYMMDD`, used on the wire and in storage
//! - display `DD.MM.YYYY`, used by the task list search box

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::DateParseError;

/// `strftime` pattern of the compact form.
pub const COMPACT_FORMAT: &str = "%Y%m%d";

/// `strftime` pattern of the display form.
pub const DISPLAY_FORMAT: &str = "%d.%m.%Y";

/// A calendar date without time of day. Ordering is chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

impl CalendarDate {
    /// Build a date from its components, `None` if no such day exists.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    pub fn as_naive(&self) -> NaiveDate {
        self.0
    }

    /// Parse the compact `YYYYMMDD` form.
    ///
    /// Exactly eight ASCII digits are required; `"2023317"` or `"2023-03-17"`
    /// are rejected rather than guessed at.
    ///
    /// # Examples
    ///
    /// ```
    /// use repeat_engine::CalendarDate;
    ///
    /// let date = CalendarDate::parse_compact("20240229").unwrap();
    /// assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    /// assert!(CalendarDate::parse_compact("20230229").is_err());
    /// ```
    pub fn parse_compact(text: &str) -> Result<Self, DateParseError> {
        if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateParseError::new(text, "expected 8 digits (YYYYMMDD)"));
        }
        let year: i32 = parse_digits(text, &text[0..4])?;
        let month: u32 = parse_digits(text, &text[4..6])?;
        let day: u32 = parse_digits(text, &text[6..8])?;
        Self::from_ymd(year, month, day)
            .ok_or_else(|| DateParseError::new(text, "no such calendar date"))
    }

    /// Parse the display `DD.MM.YYYY` form.
    pub fn parse_display(text: &str) -> Result<Self, DateParseError> {
        let shape_ok = text.len() == 10
            && text.bytes().enumerate().all(|(i, b)| match i {
                2 | 5 => b == b'.',
                _ => b.is_ascii_digit(),
            });
        if !shape_ok {
            return Err(DateParseError::new(text, "expected DD.MM.YYYY"));
        }
        NaiveDate::parse_from_str(text, DISPLAY_FORMAT)
            .map(Self)
            .map_err(|_| DateParseError::new(text, "no such calendar date"))
    }

    /// Format as `YYYYMMDD`.
    pub fn compact(&self) -> String {
        self.0.format(COMPACT_FORMAT).to_string()
    }

    /// Format as `DD.MM.YYYY`.
    pub fn display(&self) -> String {
        self.0.format(DISPLAY_FORMAT).to_string()
    }

    /// Whether [`compact`](Self::compact) yields exactly eight digits.
    pub fn fits_compact(&self) -> bool {
        (0..=9999).contains(&self.year())
    }

    /// Weekday number, Sunday = 0 through Saturday = 6.
    ///
    /// Counted from 0001-01-01 (day 1 of the common era), which was a Monday.
    pub fn weekday_index(&self) -> i64 {
        i64::from(self.0.num_days_from_ce()).rem_euclid(7)
    }

    pub fn add_days(&self, days: u64) -> Option<Self> {
        self.0.checked_add_days(Days::new(days)).map(Self)
    }

    /// Add whole years, clamping 29 February to 28 February in common years.
    pub fn add_years(&self, years: u32) -> Option<Self> {
        let months = years.checked_mul(12)?;
        self.0.checked_add_months(Months::new(months)).map(Self)
    }

    /// Signed number of days from `self` to `later`.
    pub fn days_until(&self, later: &Self) -> i64 {
        (later.0 - self.0).num_days()
    }

    /// Months elapsed since January of year 0.
    pub(crate) fn month_ordinal(&self) -> i64 {
        i64::from(self.year()) * 12 + i64::from(self.month()) - 1
    }

    /// Construct a date from a month ordinal and a day that may lie outside the
    /// month, normalising overflow into neighbouring months: day 0 is the last
    /// day of the previous month, day 32 of a 31-day month is the 1st of the next.
    pub(crate) fn normalized(month_ordinal: i64, day: i64) -> Option<Self> {
        let year = i32::try_from(month_ordinal.div_euclid(12)).ok()?;
        let month = u32::try_from(month_ordinal.rem_euclid(12) + 1).ok()?;
        let first = NaiveDate::from_ymd_opt(year, month, 1)?;
        let offset = chrono::Duration::try_days(day - 1)?;
        first.checked_add_signed(offset).map(Self)
    }
}

fn parse_digits<T: FromStr>(input: &str, digits: &str) -> Result<T, DateParseError> {
    digits
        .parse()
        .map_err(|_| DateParseError::new(input, "expected 8 digits (YYYYMMDD)"))
}

/// Number of days in `month` (1-12) of `year`, or 0 for a month chrono
/// cannot represent.
pub fn month_length(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|first_next| first_next.pred_opt())
        .map_or(0, |last_day| last_day.day())
}

/// Longest length `month` can have in any year.
pub fn max_month_length(month: u32) -> u32 {
    month_length(2000, month)
}

/// Convert display-form search text to the compact form used in storage.
///
/// Returns `None` when the text is not a display-form date, in which case the
/// caller searches with the text as typed.
pub fn parse_search_date(text: &str) -> Option<CalendarDate> {
    CalendarDate::parse_display(text.trim()).ok()
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<CalendarDate> for NaiveDate {
    fn from(date: CalendarDate) -> Self {
        date.0
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(COMPACT_FORMAT))
    }
}

impl FromStr for CalendarDate {
    type Err = DateParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_compact(s)
    }
}

impl Serialize for CalendarDate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for CalendarDate {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::parse_compact(&text).map_err(de::Error::custom)
    }
}
