//! Binary arithmetic operations
//!
//! All operations follow IEEE-754 `f64` semantics: dividing by zero yields
//! an infinity (or NaN for `0/0`), never an error.

/// Type-safe operation enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Addition (+)
    Add,
    /// Subtraction (-)
    Subtract,
    /// Multiplication (*)
    Multiply,
    /// Division (/)
    Divide,
    /// Remainder (%)
    Remainder,
}

impl Operation {
    /// Maps an operator character to its operation
    #[must_use]
    pub const fn from_char(ch: char) -> Option<Self> {
        match ch {
            '+' => Some(Self::Add),
            '-' => Some(Self::Subtract),
            '*' => Some(Self::Multiply),
            '/' => Some(Self::Divide),
            '%' => Some(Self::Remainder),
            _ => None,
        }
    }

    /// Returns true for the four operators the keypad can enter
    ///
    /// `%` is excluded: the keypad's percent key rewrites the last number
    /// instead of inserting an operator.
    #[must_use]
    pub const fn is_keypad_operator(ch: char) -> bool {
        matches!(ch, '+' | '-' | '*' | '/')
    }

    /// Applies the operation to two operands
    #[must_use]
    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Add => a + b,
            Self::Subtract => a - b,
            Self::Multiply => a * b,
            Self::Divide => a / b,
            Self::Remainder => a % b,
        }
    }
}
