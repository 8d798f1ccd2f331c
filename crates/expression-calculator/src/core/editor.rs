//! Expression editor: the calculator's editing state machine
//!
//! ```text
//! Empty --append--> Editing --evaluate--> Result --append--> Editing
//!   ^                  |                    |
//!   +------ clear / evaluation error -------+
//! ```
//!
//! The editor owns the expression text and nothing else. Rendering is the
//! caller's job (see [`crate::wasm::WasmCalculator`]).

use std::ops::Range;

use tracing::warn;

use crate::core::evaluator::Evaluator;
use crate::core::{format_number, CalcError, Operation};

/// Result of [`ExpressionEditor::evaluate_expression`]
#[derive(Debug, Clone, PartialEq)]
pub enum EvalOutcome {
    /// Nothing to evaluate; state untouched
    Empty,
    /// Expression was replaced by the formatted value
    Success(f64),
    /// Expression was rejected and has been reset
    Failure(CalcError),
}

impl EvalOutcome {
    /// Returns true if evaluation was rejected
    #[must_use]
    pub const fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }
}

/// Stateful expression editor
#[derive(Debug, Clone, Default)]
pub struct ExpressionEditor {
    expression: String,
    evaluator: Evaluator,
}

impl ExpressionEditor {
    /// Creates an editor with an empty expression
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editor starting from existing text
    #[must_use]
    pub fn with_expression(expression: &str) -> Self {
        Self {
            expression: expression.to_string(),
            evaluator: Evaluator::new(),
        }
    }

    /// Current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// Returns true if the expression is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expression.is_empty()
    }

    /// Appends a digit, decimal point or operator
    ///
    /// - `.` is ignored if the number being typed already has one, and
    ///   becomes `0.` when no number has been started.
    /// - An operator replaces a trailing operator, is dropped on an empty
    ///   expression, except `-` which starts a negative number.
    /// - Anything else is appended as-is.
    pub fn append_value(&mut self, token: char) {
        if token == '.' {
            let segment = self.current_segment();
            if segment.contains('.') {
                return;
            }
            if segment.is_empty() {
                self.expression.push('0');
            }
        }

        if Operation::is_keypad_operator(token) {
            if self.expression.is_empty() && token == '-' {
                self.expression.push('-');
                return;
            }
            if self.expression.ends_with(Operation::is_keypad_operator) {
                self.expression.pop();
                self.expression.push(token);
                return;
            }
            if self.expression.is_empty() {
                return;
            }
        }

        self.expression.push(token);
    }

    /// Resets the expression to empty
    pub fn clear_all(&mut self) {
        self.expression.clear();
    }

    /// Removes the last character, if any
    pub fn backspace(&mut self) {
        self.expression.pop();
    }

    /// Rewrites the last number `n` as `(n/100)`
    ///
    /// No-op if the expression contains no digits.
    pub fn apply_percent(&mut self) {
        let Some(span) = last_number_span(&self.expression) else {
            return;
        };
        let replacement = format!("({}/100)", &self.expression[span.clone()]);
        self.expression.replace_range(span, &replacement);
    }

    /// Evaluates the expression in place
    ///
    /// On success the expression becomes the formatted result, on failure
    /// it is cleared. Errors are reported in the outcome, never raised.
    pub fn evaluate_expression(&mut self) -> EvalOutcome {
        if self.expression.is_empty() {
            return EvalOutcome::Empty;
        }

        match self.evaluator.evaluate_str(&self.expression) {
            Ok(value) => {
                self.expression = format_number(value);
                EvalOutcome::Success(value)
            }
            Err(err) => {
                warn!(expression = %self.expression, kind = ?err.kind(), error = %err, "evaluation rejected");
                self.expression.clear();
                EvalOutcome::Failure(err)
            }
        }
    }

    /// The number currently being typed: text after the last operator or
    /// whitespace.
    fn current_segment(&self) -> &str {
        self.expression
            .rsplit(|c: char| Operation::is_keypad_operator(c) || c.is_whitespace())
            .next()
            .unwrap_or("")
    }
}

/// Byte range of the last number in `text`
///
/// The last number is the maximal run of digits and at most one `.` that
/// ends at the last digit of `text`. A `.` right after that digit is part
/// of the number when the run has no other `.` (`12.` counts as a number).
pub(crate) fn last_number_span(text: &str) -> Option<Range<usize>> {
    let bytes = text.as_bytes();
    let last_digit = bytes.iter().rposition(u8::is_ascii_digit)?;

    let mut start = last_digit;
    let mut seen_dot = false;
    while start > 0 {
        match bytes[start - 1] {
            b'0'..=b'9' => start -= 1,
            b'.' if !seen_dot => {
                seen_dot = true;
                start -= 1;
            }
            _ => break,
        }
    }

    let mut end = last_digit + 1;
    if !seen_dot && bytes.get(end) == Some(&b'.') {
        end += 1;
    }

    Some(start..end)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(keys: &str) -> ExpressionEditor {
        let mut editor = ExpressionEditor::new();
        for ch in keys.chars() {
            editor.append_value(ch);
        }
        editor
    }

    // ===== append_value tests =====

    #[test]
    fn test_digits_concatenate() {
        assert_eq!(typed("12345").expression(), "12345");
    }

    #[test]
    fn test_second_decimal_point_ignored() {
        assert_eq!(typed("1.2.").expression(), "1.2");
    }

    #[test]
    fn test_decimal_point_on_empty_gets_leading_zero() {
        assert_eq!(typed(".").expression(), "0.");
        assert_eq!(typed(".5").expression(), "0.5");
    }

    #[test]
    fn test_decimal_point_after_operator_gets_leading_zero() {
        assert_eq!(typed("3+.").expression(), "3+0.");
    }

    #[test]
    fn test_decimal_point_per_number() {
        assert_eq!(typed("1.5*2.5").expression(), "1.5*2.5");
    }

    #[test]
    fn test_decimal_point_after_whitespace_boundary() {
        let mut editor = ExpressionEditor::with_expression("1.5 ");
        editor.append_value('.');
        assert_eq!(editor.expression(), "1.5 0.");
    }

    #[test]
    fn test_decimal_point_after_wide_whitespace_boundary() {
        let mut editor = ExpressionEditor::new();
        editor.append_value('2');
        editor.append_value('\u{3000}');
        editor.append_value('.');
        assert_eq!(editor.expression(), "2\u{3000}0.");

        let mut editor = ExpressionEditor::with_expression("1.5\u{a0}7");
        editor.append_value('.');
        editor.append_value('.');
        assert_eq!(editor.expression(), "1.5\u{a0}7.");
    }

    #[test]
    fn test_percent_after_wide_whitespace() {
        let mut editor = ExpressionEditor::with_expression("3\u{3000}12");
        editor.apply_percent();
        assert_eq!(editor.expression(), "3\u{3000}(12/100)");
    }

    #[test]
    fn test_decimal_point_after_paren_is_same_segment() {
        // Parentheses are not boundaries
        let mut editor = ExpressionEditor::with_expression("(2.5)");
        editor.append_value('.');
        assert_eq!(editor.expression(), "(2.5)");
    }

    #[test]
    fn test_operator_on_empty_ignored() {
        for op in ['+', '*', '/'] {
            assert_eq!(typed(&op.to_string()).expression(), "");
        }
    }

    #[test]
    fn test_minus_on_empty_starts_negative() {
        assert_eq!(typed("-").expression(), "-");
        assert_eq!(typed("-5").expression(), "-5");
    }

    #[test]
    fn test_operator_replaces_trailing_operator() {
        assert_eq!(typed("3+*").expression(), "3*");
        assert_eq!(typed("3+-/").expression(), "3/");
    }

    #[test]
    fn test_operator_replaces_leading_minus() {
        assert_eq!(typed("-+").expression(), "+");
    }

    #[test]
    fn test_operator_appends_after_number() {
        assert_eq!(typed("3+4").expression(), "3+4");
    }

    #[test]
    fn test_other_tokens_appended_verbatim() {
        let mut editor = ExpressionEditor::new();
        editor.append_value('(');
        editor.append_value('7');
        editor.append_value(')');
        assert_eq!(editor.expression(), "(7)");
    }

    // ===== clear / backspace tests =====

    #[test]
    fn test_clear_all() {
        let mut editor = typed("12+3");
        editor.clear_all();
        assert!(editor.is_empty());
    }

    #[test]
    fn test_backspace() {
        let mut editor = typed("12");
        editor.backspace();
        assert_eq!(editor.expression(), "1");
    }

    #[test]
    fn test_backspace_empty() {
        let mut editor = ExpressionEditor::new();
        editor.backspace();
        assert_eq!(editor.expression(), "");
    }

    // ===== apply_percent tests =====

    #[test]
    fn test_percent_last_number() {
        let mut editor = typed("50+20");
        editor.apply_percent();
        assert_eq!(editor.expression(), "50+(20/100)");
    }

    #[test]
    fn test_percent_decimal_number() {
        let mut editor = typed("12.5");
        editor.apply_percent();
        assert_eq!(editor.expression(), "(12.5/100)");
    }

    #[test]
    fn test_percent_keeps_trailing_text() {
        let mut editor = typed("50+");
        editor.apply_percent();
        assert_eq!(editor.expression(), "(50/100)+");
    }

    #[test]
    fn test_percent_includes_trailing_dot() {
        let mut editor = typed("12.");
        editor.apply_percent();
        assert_eq!(editor.expression(), "(12./100)");
    }

    #[test]
    fn test_percent_negative_number() {
        let mut editor = typed("-5");
        editor.apply_percent();
        assert_eq!(editor.expression(), "-(5/100)");
    }

    #[test]
    fn test_percent_no_number() {
        let mut editor = typed("-");
        editor.apply_percent();
        assert_eq!(editor.expression(), "-");

        let mut empty = ExpressionEditor::new();
        empty.apply_percent();
        assert!(empty.is_empty());
    }

    #[test]
    fn test_percent_twice_nests() {
        let mut editor = typed("50");
        editor.apply_percent();
        editor.apply_percent();
        assert_eq!(editor.expression(), "(50/(100/100))");
    }

    #[test]
    fn test_last_number_span() {
        assert_eq!(last_number_span("50+20"), Some(3..5));
        assert_eq!(last_number_span("1.2.3"), Some(2..5));
        assert_eq!(last_number_span("(7)"), Some(1..2));
        assert_eq!(last_number_span("+-"), None);
        assert_eq!(last_number_span(""), None);
    }

    // ===== evaluate_expression tests =====

    #[test]
    fn test_evaluate_precedence() {
        let mut editor = typed("2+3*4");
        assert_eq!(editor.evaluate_expression(), EvalOutcome::Success(14.0));
        assert_eq!(editor.expression(), "14");
    }

    #[test]
    fn test_evaluate_integral_result_has_no_fraction() {
        let mut editor = typed("6");
        editor.evaluate_expression();
        assert_eq!(editor.expression(), "6");
    }

    #[test]
    fn test_evaluate_division_by_zero() {
        let mut editor = typed("5/0");
        assert_eq!(
            editor.evaluate_expression(),
            EvalOutcome::Success(f64::INFINITY)
        );
        assert_eq!(editor.expression(), "Infinity");
    }

    #[test]
    fn test_evaluate_zero_by_zero() {
        let mut editor = typed("0/0");
        assert!(!editor.evaluate_expression().is_failure());
        assert_eq!(editor.expression(), "NaN");
    }

    #[test]
    fn test_evaluate_unbalanced_resets() {
        let mut editor = ExpressionEditor::with_expression("2+(3");
        let outcome = editor.evaluate_expression();
        assert!(matches!(outcome, EvalOutcome::Failure(CalcError::ParseError(_))));
        assert_eq!(editor.expression(), "");
    }

    #[test]
    fn test_evaluate_trailing_operator_resets() {
        let mut editor = typed("3*");
        assert!(editor.evaluate_expression().is_failure());
        assert!(editor.is_empty());
    }

    #[test]
    fn test_evaluate_invalid_characters_resets() {
        let mut editor = typed("5/0");
        editor.evaluate_expression();
        editor.append_value('+');
        editor.append_value('1');
        assert_eq!(editor.expression(), "Infinity+1");
        let outcome = editor.evaluate_expression();
        assert!(matches!(
            outcome,
            EvalOutcome::Failure(CalcError::InvalidCharacter { ch: 'I', .. })
        ));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_evaluate_empty_is_noop() {
        let mut editor = ExpressionEditor::new();
        assert_eq!(editor.evaluate_expression(), EvalOutcome::Empty);
        assert!(editor.is_empty());
    }

    #[test]
    fn test_evaluate_percent_expression() {
        let mut editor = typed("50+20");
        editor.apply_percent();
        editor.evaluate_expression();
        assert_eq!(editor.expression(), "50.2");
    }

    #[test]
    fn test_result_continues_editing() {
        let mut editor = typed("2*3");
        editor.evaluate_expression();
        editor.append_value('+');
        editor.append_value('4');
        assert_eq!(editor.expression(), "6+4");
        editor.evaluate_expression();
        assert_eq!(editor.expression(), "10");
    }

    #[test]
    fn test_negative_result_continues_editing() {
        let mut editor = typed("2-5");
        editor.evaluate_expression();
        assert_eq!(editor.expression(), "-3");
        editor.append_value('*');
        editor.append_value('2');
        editor.evaluate_expression();
        assert_eq!(editor.expression(), "-6");
    }

    // ===== Nesting limit tests =====

    #[test]
    fn test_repeated_percent_resets_instead_of_overflowing() {
        let mut editor = typed("5");
        for _ in 0..5000 {
            editor.apply_percent();
        }
        let outcome = editor.evaluate_expression();
        assert!(matches!(outcome, EvalOutcome::Failure(CalcError::ParseError(_))));
        assert!(editor.is_empty());
    }

    #[test]
    fn test_moderate_percent_nesting_evaluates() {
        let mut editor = typed("5");
        for _ in 0..3 {
            editor.apply_percent();
        }
        assert_eq!(editor.expression(), "(5/(100/(100/100)))");
        assert_eq!(editor.evaluate_expression(), EvalOutcome::Success(0.05));
    }
}
