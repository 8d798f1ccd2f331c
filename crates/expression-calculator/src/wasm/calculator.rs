//! Calculator front end: command dispatch and display rendering
//!
//! Every input (button or key) becomes a [`KeypadAction`], which maps to
//! exactly one editor operation. The display text is recomputed right
//! after each operation.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::keypad::{KeypadAction, WasmKeypad};
use crate::config::CalculatorConfig;
use crate::core::{CalcError, EvalOutcome, ExpressionEditor};

/// Serializable view of the calculator state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculatorSnapshot {
    /// Current expression text
    pub expression: String,
    /// Text currently shown on the display
    pub display: String,
}

/// Browser-ready calculator
#[derive(Debug)]
pub struct WasmCalculator {
    editor: ExpressionEditor,
    config: CalculatorConfig,
    display: String,
    last_error: Option<CalcError>,
}

impl Default for WasmCalculator {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmCalculator {
    /// Creates a calculator with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a calculator with a custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let mut calc = Self {
            editor: ExpressionEditor::new(),
            config,
            display: String::new(),
            last_error: None,
        };
        calc.refresh();
        calc
    }

    /// Current configuration
    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    /// Current expression text
    #[must_use]
    pub fn expression(&self) -> &str {
        self.editor.expression()
    }

    /// Text currently shown on the display
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Error from the most recent evaluation, if it was rejected
    #[must_use]
    pub fn last_error(&self) -> Option<&CalcError> {
        self.last_error.as_ref()
    }

    /// Runs one action against the editor and refreshes the display
    pub fn dispatch(&mut self, action: KeypadAction) {
        debug!(?action, expression = self.editor.expression(), "dispatch");
        match action {
            KeypadAction::Digit(_) | KeypadAction::Decimal | KeypadAction::Operator(_) => {
                if let Some(ch) = action.to_char() {
                    self.append_value(ch);
                }
            }
            KeypadAction::Equals => {
                self.evaluate();
            }
            KeypadAction::Clear => self.clear_all(),
            KeypadAction::Backspace => self.backspace(),
            KeypadAction::Percent => self.apply_percent(),
        }
    }

    /// Handles a keyboard key; returns true if the key was consumed
    pub fn handle_key(&mut self, key: &str) -> bool {
        match WasmKeypad::key_to_action(key) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Handles a button click from its dataset; returns true if handled
    pub fn handle_button(&mut self, value: Option<&str>, action: Option<&str>) -> bool {
        match WasmKeypad::from_dataset(value, action) {
            Some(action) => {
                self.dispatch(action);
                true
            }
            None => false,
        }
    }

    /// Appends a token to the expression
    pub fn append_value(&mut self, token: char) {
        self.editor.append_value(token);
        self.refresh();
    }

    /// Clears the expression
    pub fn clear_all(&mut self) {
        self.editor.clear_all();
        self.refresh();
    }

    /// Removes the last character
    pub fn backspace(&mut self) {
        self.editor.backspace();
        self.refresh();
    }

    /// Converts the last number into a percentage
    pub fn apply_percent(&mut self) {
        self.editor.apply_percent();
        self.refresh();
    }

    /// Evaluates the expression
    ///
    /// An empty expression leaves the display untouched. A rejected
    /// expression shows the error indicator until the next input.
    pub fn evaluate(&mut self) -> EvalOutcome {
        let outcome = self.editor.evaluate_expression();
        match &outcome {
            EvalOutcome::Empty => {}
            EvalOutcome::Success(_) => self.refresh(),
            EvalOutcome::Failure(err) => {
                self.last_error = Some(err.clone());
                self.display.clone_from(&self.config.error_indicator);
            }
        }
        outcome
    }

    /// Returns a serializable view of the state
    #[must_use]
    pub fn snapshot(&self) -> CalculatorSnapshot {
        CalculatorSnapshot {
            expression: self.editor.expression().to_string(),
            display: self.display.clone(),
        }
    }

    /// Returns the state as JSON (for browser interop)
    #[must_use]
    pub fn state_json(&self) -> String {
        serde_json::to_string(&self.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }

    fn refresh(&mut self) {
        self.last_error = None;
        if self.editor.is_empty() {
            self.display.clone_from(&self.config.empty_display);
        } else {
            self.display = self.editor.expression().to_string();
        }
    }
}
