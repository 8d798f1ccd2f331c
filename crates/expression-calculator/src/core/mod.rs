//! Core calculator module: editor state machine, validation and evaluation
//!
//! Nothing in here executes the expression as code. Text is validated
//! against a fixed character set, tokenized, parsed with a small
//! recursive-descent grammar and evaluated over `f64`.

pub mod editor;
pub mod evaluator;
pub mod format;
mod operations;
pub mod parser;

pub use editor::{EvalOutcome, ExpressionEditor};
pub use format::format_number;
pub use operations::Operation;

use thiserror::Error;

/// Result type for calculator operations
pub type CalcResult<T> = Result<T, CalcError>;

/// Calculator error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CalcError {
    /// Expression contains a character outside the accepted set
    #[error("Invalid character '{ch}' at position {position}")]
    InvalidCharacter {
        /// The offending character
        ch: char,
        /// Byte offset into the expression
        position: usize,
    },
    /// Characters are valid but the text is not an arithmetic expression
    #[error("Invalid expression: {0}")]
    ParseError(String),
    /// Empty expression provided
    #[error("Empty expression")]
    EmptyExpression,
    /// Configuration could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Broad classification of a [`CalcError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Rejected by the character-set check
    Validation,
    /// Rejected by the parser
    Evaluation,
    /// Rejected while loading configuration
    Config,
}

impl CalcError {
    /// Returns which stage produced this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidCharacter { .. } => ErrorKind::Validation,
            Self::ParseError(_) | Self::EmptyExpression => ErrorKind::Evaluation,
            Self::Config(_) => ErrorKind::Config,
        }
    }
}

/// Returns true if `ch` may appear in an expression handed to the evaluator
///
/// Accepted: ASCII digits, `+ - * /`, parentheses, `.`, whitespace and `%`.
#[must_use]
pub fn is_allowed_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '+' | '-' | '*' | '/' | '(' | ')' | '.' | '%') || ch.is_whitespace()
}

/// Character-set gate run before any parsing
///
/// The whole expression must be non-empty and consist only of
/// [allowed characters](is_allowed_char).
pub fn validate_expression(expr: &str) -> CalcResult<()> {
    if expr.is_empty() {
        return Err(CalcError::EmptyExpression);
    }
    match expr.char_indices().find(|&(_, ch)| !is_allowed_char(ch)) {
        Some((position, ch)) => Err(CalcError::InvalidCharacter { ch, position }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== CalcError tests =====

    #[test]
    fn test_calc_error_display_invalid_character() {
        let err = CalcError::InvalidCharacter { ch: 'x', position: 3 };
        assert_eq!(format!("{err}"), "Invalid character 'x' at position 3");
    }

    #[test]
    fn test_calc_error_display_parse_error() {
        let err = CalcError::ParseError("unexpected token".into());
        assert_eq!(format!("{err}"), "Invalid expression: unexpected token");
    }

    #[test]
    fn test_calc_error_display_empty_expression() {
        assert_eq!(format!("{}", CalcError::EmptyExpression), "Empty expression");
    }

    #[test]
    fn test_calc_error_display_config() {
        let err = CalcError::Config("missing field".into());
        assert_eq!(format!("{err}"), "Invalid configuration: missing field");
    }

    #[test]
    fn test_calc_error_is_error_trait() {
        let err: Box<dyn std::error::Error> = Box::new(CalcError::EmptyExpression);
        assert!(err.to_string().contains("Empty"));
    }

    #[test]
    fn test_calc_error_kind() {
        let invalid = CalcError::InvalidCharacter { ch: 'a', position: 0 };
        assert_eq!(invalid.kind(), ErrorKind::Validation);
        assert_eq!(CalcError::ParseError(String::new()).kind(), ErrorKind::Evaluation);
        assert_eq!(CalcError::EmptyExpression.kind(), ErrorKind::Evaluation);
        assert_eq!(CalcError::Config(String::new()).kind(), ErrorKind::Config);
    }

    // ===== Validation tests =====

    #[test]
    fn test_allowed_chars() {
        for ch in "0123456789+-*/().% \t".chars() {
            assert!(is_allowed_char(ch), "{ch:?} should be allowed");
        }
        for ch in "aZe^,=!_".chars() {
            assert!(!is_allowed_char(ch), "{ch:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_accepts_arithmetic() {
        assert_eq!(validate_expression("2 + (3 * 4) / 5.5 % 2"), Ok(()));
    }

    #[test]
    fn test_validate_rejects_letters() {
        assert_eq!(
            validate_expression("Infinity+1"),
            Err(CalcError::InvalidCharacter { ch: 'I', position: 0 })
        );
    }

    #[test]
    fn test_validate_reports_first_offender() {
        assert_eq!(
            validate_expression("1e+21"),
            Err(CalcError::InvalidCharacter { ch: 'e', position: 1 })
        );
    }

    #[test]
    fn test_validate_empty() {
        assert_eq!(validate_expression(""), Err(CalcError::EmptyExpression));
    }
}
