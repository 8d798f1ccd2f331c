//! Expression Calculator
//!
//! The editing and evaluation core of a keypad calculator, plus the thin
//! browser front end that feeds it button clicks and key presses.
//!
//! - [`core::ExpressionEditor`] owns the expression text and implements the
//!   editing rules (decimal point, operator replacement, percent, backspace).
//! - [`core::evaluator::Evaluator`] validates the text against a fixed
//!   character set and evaluates it with its own recursive-descent parser.
//!   Nothing is ever executed as code.
//! - [`wasm::WasmCalculator`] maps input commands to editor operations and
//!   keeps the display text in sync.
//!
//! # Example
//!
//! ```rust
//! use expression_calculator::prelude::*;
//!
//! let mut editor = ExpressionEditor::new();
//! for ch in "50+20".chars() {
//!     editor.append_value(ch);
//! }
//! editor.apply_percent();
//! assert_eq!(editor.expression(), "50+(20/100)");
//!
//! editor.evaluate_expression();
//! assert_eq!(editor.expression(), "50.2");
//!
//! // Keyboard-driven, with a display
//! let mut calc = WasmCalculator::new();
//! for key in ["5", "/", "0", "Enter"] {
//!     calc.handle_key(key);
//! }
//! assert_eq!(calc.display(), "Infinity");
//! ```

// Allow common test patterns in this crate
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod driver;
pub mod wasm;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::CalculatorConfig;
    pub use crate::core::evaluator::Evaluator;
    pub use crate::core::parser::{AstNode, Parser, Token, Tokenizer};
    pub use crate::core::{
        format_number, validate_expression, CalcError, CalcResult, ErrorKind, EvalOutcome,
        ExpressionEditor, Operation,
    };
    pub use crate::driver::CalculatorDriver;

    #[cfg(feature = "wasm")]
    pub use crate::wasm::BrowserCalculator;
    pub use crate::wasm::{
        CalculatorSnapshot, DomElement, DomEvent, KeypadAction, MockDom, WasmCalculator,
        WasmDriver, WasmKeypad,
    };
}
