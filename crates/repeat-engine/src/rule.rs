//! Repeat rule grammar.
//!
//! ```text
//! rule         := "y" | daily | weekly | monthly
//! daily        := "d" SP int(1..400)
//! weekly       := "w" SP weekday_list
//! monthly      := "m" SP day_list [SP month_list]
//! weekday_list := int(1..7) ("," int(1..7))*
//! day_list     := int(-31..31, nonzero) ("," int(-31..31, nonzero))*
//! month_list   := int(1..12) ("," int(1..12))*
//! ```
//!
//! Tokens are separated by exactly one space. Operand lists keep the order in
//! which they were written; resolvers break ties in that order.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

use serde::Serialize;

use crate::date::max_month_length;
use crate::error::RuleError;

/// Largest interval accepted by the `d` modifier.
pub const MAX_DAY_INTERVAL: u32 = 400;

/// A parsed repeat rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RepeatRule {
    /// `y`: same month and day every year.
    Yearly,
    /// `d N`: every `n` days.
    EveryNDays { n: u32 },
    /// `w 1,4`: on the listed weekdays, 1 = Monday through 7 = Sunday.
    Weekly { days: Vec<u8> },
    /// `m 1,-1 [3,6]`: on the listed days of month, optionally only in the
    /// listed months. Negative days count back from the end of the month.
    Monthly {
        days: Vec<i8>,
        #[serde(skip_serializing_if = "Option::is_none")]
        months: Option<Vec<u8>>,
    },
}

impl RepeatRule {
    /// Parse rule text.
    ///
    /// # Examples
    ///
    /// ```
    /// use repeat_engine::RepeatRule;
    ///
    /// let rule = RepeatRule::parse("m 1,-1 1,7").unwrap();
    /// assert_eq!(
    ///     rule,
    ///     RepeatRule::Monthly { days: vec![1, -1], months: Some(vec![1, 7]) }
    /// );
    /// ```
    ///
    /// # Errors
    ///
    /// Returns [`RuleError::UnknownModifier`] for anything but `y`, `d`, `w`, `m`,
    /// [`RuleError::ArityMismatch`] for a wrong number of tokens,
    /// [`RuleError::MalformedOperand`] for a token that is not an integer, and
    /// [`RuleError::OutOfRange`] for an integer outside the modifier's domain.
    pub fn parse(text: &str) -> Result<Self, RuleError> {
        let tokens: Vec<&str> = text.split(' ').collect();
        let Some((modifier, operands)) = tokens.split_first() else {
            return Err(RuleError::UnknownModifier(String::new()));
        };

        match *modifier {
            "y" => {
                expect_arity('y', operands, 0..=0, "no values")?;
                Ok(RepeatRule::Yearly)
            }
            "d" => {
                expect_arity('d', operands, 1..=1, "exactly one value")?;
                let n = parse_in_range(operands[0], 1, i64::from(MAX_DAY_INTERVAL))?;
                Ok(RepeatRule::EveryNDays { n: n as u32 })
            }
            "w" => {
                expect_arity('w', operands, 1..=1, "exactly one value list")?;
                let days = parse_list(operands[0], |token| {
                    parse_in_range(token, 1, 7).map(|v| v as u8)
                })?;
                Ok(RepeatRule::Weekly { days })
            }
            "m" => {
                expect_arity('m', operands, 1..=2, "a day list and an optional month list")?;
                let days = parse_list(operands[0], parse_month_day)?;
                let months = match operands.get(1) {
                    Some(list) => {
                        let months = parse_list(list, |token| {
                            parse_in_range(token, 1, 12).map(|v| v as u8)
                        })?;
                        check_days_fit_months(&days, &months)?;
                        Some(months)
                    }
                    None => None,
                };
                Ok(RepeatRule::Monthly { days, months })
            }
            other => Err(RuleError::UnknownModifier(other.to_string())),
        }
    }

    /// The single-letter modifier of this rule.
    pub fn modifier(&self) -> char {
        match self {
            RepeatRule::Yearly => 'y',
            RepeatRule::EveryNDays { .. } => 'd',
            RepeatRule::Weekly { .. } => 'w',
            RepeatRule::Monthly { .. } => 'm',
        }
    }
}

fn expect_arity(
    modifier: char,
    operands: &[&str],
    allowed: std::ops::RangeInclusive<usize>,
    expected: &'static str,
) -> Result<(), RuleError> {
    if allowed.contains(&operands.len()) {
        Ok(())
    } else {
        Err(RuleError::ArityMismatch {
            modifier,
            expected,
            found: operands.len(),
        })
    }
}

fn parse_int(token: &str) -> Result<i64, RuleError> {
    token.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => RuleError::OutOfRange {
            value: token.to_string(),
            expected: "a 64-bit integer".to_string(),
        },
        _ => RuleError::MalformedOperand(token.to_string()),
    })
}

fn parse_in_range(token: &str, min: i64, max: i64) -> Result<i64, RuleError> {
    let value = parse_int(token)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RuleError::OutOfRange {
            value: value.to_string(),
            expected: format!("{min}..={max}"),
        })
    }
}

fn parse_month_day(token: &str) -> Result<i8, RuleError> {
    let value = parse_int(token)?;
    if value == 0 || !(-31..=31).contains(&value) {
        return Err(RuleError::OutOfRange {
            value: value.to_string(),
            expected: "-31..=31 excluding 0".to_string(),
        });
    }
    Ok(value as i8)
}

fn parse_list<T>(
    list: &str,
    parse_item: impl Fn(&str) -> Result<T, RuleError>,
) -> Result<Vec<T>, RuleError> {
    list.split(',').map(parse_item).collect()
}

fn check_days_fit_months(days: &[i8], months: &[u8]) -> Result<(), RuleError> {
    for &month in months {
        let longest = max_month_length(u32::from(month));
        for &day in days {
            if u32::from(day.unsigned_abs()) > longest {
                return Err(RuleError::OutOfRange {
                    value: day.to_string(),
                    expected: format!("a day within month {month} (at most {longest} days)"),
                });
            }
        }
    }
    Ok(())
}

fn write_list<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

/// Canonical rule text, which parses back to an equal rule.
impl fmt::Display for RepeatRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RepeatRule::Yearly => f.write_str("y"),
            RepeatRule::EveryNDays { n } => write!(f, "d {n}"),
            RepeatRule::Weekly { days } => {
                f.write_str("w ")?;
                write_list(f, days)
            }
            RepeatRule::Monthly { days, months } => {
                f.write_str("m ")?;
                write_list(f, days)?;
                if let Some(months) = months {
                    f.write_str(" ")?;
                    write_list(f, months)?;
                }
                Ok(())
            }
        }
    }
}

impl FromStr for RepeatRule {
    type Err = RuleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_each_modifier() {
        assert_eq!(RepeatRule::parse("y").unwrap(), RepeatRule::Yearly);
        assert_eq!(
            RepeatRule::parse("d 7").unwrap(),
            RepeatRule::EveryNDays { n: 7 }
        );
        assert_eq!(
            RepeatRule::parse("w 1,4").unwrap(),
            RepeatRule::Weekly { days: vec![1, 4] }
        );
        assert_eq!(
            RepeatRule::parse("m 31").unwrap(),
            RepeatRule::Monthly {
                days: vec![31],
                months: None
            }
        );
        assert_eq!(
            RepeatRule::parse("m -1,15 2,8").unwrap(),
            RepeatRule::Monthly {
                days: vec![-1, 15],
                months: Some(vec![2, 8])
            }
        );
    }

    #[test]
    fn test_unknown_modifier() {
        assert_eq!(
            RepeatRule::parse("x 5").unwrap_err(),
            RuleError::UnknownModifier("x".to_string())
        );
        assert_eq!(
            RepeatRule::parse("").unwrap_err(),
            RuleError::UnknownModifier(String::new())
        );
        // modifiers are case sensitive
        assert!(matches!(
            RepeatRule::parse("Y").unwrap_err(),
            RuleError::UnknownModifier(_)
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        for text in ["y 1", "d", "d 1 2", "w", "w 1 2", "m", "m 1 2 3"] {
            assert!(
                matches!(
                    RepeatRule::parse(text).unwrap_err(),
                    RuleError::ArityMismatch { .. }
                ),
                "rule {text:?}"
            );
        }
    }

    #[test]
    fn test_double_space_counts_as_token() {
        assert_eq!(
            RepeatRule::parse("d  7").unwrap_err(),
            RuleError::ArityMismatch {
                modifier: 'd',
                expected: "exactly one value",
                found: 2
            }
        );
        assert!(matches!(
            RepeatRule::parse("y ").unwrap_err(),
            RuleError::ArityMismatch { found: 1, .. }
        ));
    }

    #[test]
    fn test_daily_range() {
        assert!(RepeatRule::parse("d 1").is_ok());
        assert!(RepeatRule::parse("d 400").is_ok());
        for text in ["d 0", "d 401", "d -3"] {
            assert!(
                matches!(
                    RepeatRule::parse(text).unwrap_err(),
                    RuleError::OutOfRange { .. }
                ),
                "rule {text:?}"
            );
        }
    }

    #[test]
    fn test_malformed_operands() {
        for text in ["d seven", "d 1.5", "w 1,,2", "w 1,", "m a", "m 1 jan"] {
            assert!(
                matches!(
                    RepeatRule::parse(text).unwrap_err(),
                    RuleError::MalformedOperand(_)
                ),
                "rule {text:?}"
            );
        }
    }

    #[test]
    fn test_overflowing_integer_is_out_of_range() {
        assert!(matches!(
            RepeatRule::parse("d 99999999999999999999").unwrap_err(),
            RuleError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_weekday_range() {
        assert!(RepeatRule::parse("w 1,2,3,4,5,6,7").is_ok());
        assert!(matches!(
            RepeatRule::parse("w 0").unwrap_err(),
            RuleError::OutOfRange { .. }
        ));
        assert!(matches!(
            RepeatRule::parse("w 1,8").unwrap_err(),
            RuleError::OutOfRange { .. }
        ));
    }

    #[test]
    fn test_month_day_range() {
        assert!(RepeatRule::parse("m -31,31").is_ok());
        for text in ["m 0", "m 32", "m -32", "m 1 0", "m 1 13"] {
            assert!(
                matches!(
                    RepeatRule::parse(text).unwrap_err(),
                    RuleError::OutOfRange { .. }
                ),
                "rule {text:?}"
            );
        }
    }

    #[test]
    fn test_day_must_fit_every_listed_month() {
        assert!(RepeatRule::parse("m 29 2").is_ok());
        assert!(RepeatRule::parse("m -29 2").is_ok());
        assert!(RepeatRule::parse("m 31 1,3").is_ok());
        for text in ["m 30 2", "m 31 1,4", "m -31 6"] {
            assert!(
                matches!(
                    RepeatRule::parse(text).unwrap_err(),
                    RuleError::OutOfRange { .. }
                ),
                "rule {text:?}"
            );
        }
    }

    #[test]
    fn test_display_is_canonical() {
        for text in ["y", "d 7", "w 1,4", "m 31", "m -1,15 2,8"] {
            let rule: RepeatRule = text.parse().unwrap();
            assert_eq!(rule.to_string(), text);
            assert_eq!(rule.to_string().parse::<RepeatRule>().unwrap(), rule);
        }
        // leading plus signs and zeros are normalised away
        let rule = RepeatRule::parse("d +07").unwrap();
        assert_eq!(rule.to_string(), "d 7");
    }

    #[test]
    fn test_modifier() {
        assert_eq!(RepeatRule::parse("y").unwrap().modifier(), 'y');
        assert_eq!(RepeatRule::parse("m 1").unwrap().modifier(), 'm');
    }

    #[test]
    fn test_serializes_with_kind_tag() {
        let json = serde_json::to_value(RepeatRule::parse("w 1,4").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "weekly", "days": [1, 4]}));
        let json = serde_json::to_value(RepeatRule::parse("m -1").unwrap()).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "monthly", "days": [-1]}));
        let json = serde_json::to_value(RepeatRule::Yearly).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "yearly"}));
    }
}
