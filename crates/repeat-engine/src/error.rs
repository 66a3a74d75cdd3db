//! Error types for repeat-engine operations.

use thiserror::Error;

/// A date string that is not a valid calendar date in the expected form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("'{input}': {reason}")]
pub struct DateParseError {
    /// The text that failed to parse.
    pub input: String,
    /// What was wrong with it.
    pub reason: &'static str,
}

impl DateParseError {
    pub(crate) fn new(input: &str, reason: &'static str) -> Self {
        Self {
            input: input.to_string(),
            reason,
        }
    }
}

/// Why a repeat rule string was rejected by the parser.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("unknown modifier '{0}', expected one of y, d, w, m")]
    UnknownModifier(String),

    #[error("modifier '{modifier}' takes {expected}, got {found}")]
    ArityMismatch {
        modifier: char,
        expected: &'static str,
        found: usize,
    },

    #[error("value {value} is out of range, expected {expected}")]
    OutOfRange { value: String, expected: String },

    #[error("'{0}' is not an integer")]
    MalformedOperand(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvaluationError {
    #[error("Invalid anchor date: {0}")]
    InvalidAnchorDate(DateParseError),

    #[error("Invalid reference date: {0}")]
    InvalidReferenceDate(DateParseError),

    #[error("Invalid repeat rule '{rule}': {kind}")]
    InvalidRule { rule: String, kind: RuleError },

    #[error("No candidate found: {0}")]
    NoCandidateFound(String),

    #[error("Date overflow: {0}")]
    DateOverflow(String),
}

impl EvaluationError {
    /// The parser error behind an [`EvaluationError::InvalidRule`].
    pub fn rule_error(&self) -> Option<&RuleError> {
        match self {
            EvaluationError::InvalidRule { kind, .. } => Some(kind),
            _ => None,
        }
    }

    /// `true` when the caller supplied bad input, `false` for failures of the
    /// engine's own search (which never happen for rules the parser accepts).
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            EvaluationError::InvalidAnchorDate(_)
                | EvaluationError::InvalidReferenceDate(_)
                | EvaluationError::InvalidRule { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, EvaluationError>;
