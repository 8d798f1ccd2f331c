//! Unified Calculator Driver
//!
//! Write the behavioural checks once, run them against every front end:
//! the bare [`WasmCalculator`](crate::wasm::WasmCalculator) and the
//! DOM-level [`WasmDriver`](crate::wasm::WasmDriver).

use crate::wasm::{KeypadAction, WasmKeypad};

/// Abstract driver trait for calculator interactions
pub trait CalculatorDriver {
    /// Delivers one input command
    fn press(&mut self, action: KeypadAction);

    /// Text currently on the display
    fn display(&self) -> String;

    /// Current expression text
    fn expression(&self) -> String;

    /// Types a key sequence, one character per key
    ///
    /// `=` evaluates and `%` applies percent; characters without a key
    /// binding are skipped.
    fn type_keys(&mut self, keys: &str) {
        for ch in keys.chars() {
            if let Some(action) = WasmKeypad::key_to_action(ch.encode_utf8(&mut [0; 4])) {
                self.press(action);
            }
        }
    }

    /// Resets the calculator
    fn clear(&mut self) {
        self.press(KeypadAction::Clear);
    }
}

// ===== Unified Behaviour Checks =====
// These work with ANY CalculatorDriver implementation

/// Verifies that digits concatenate and the empty display shows `0`
pub fn verify_digit_entry<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    assert_eq!(driver.display(), "0");

    driver.type_keys("9081726354");
    assert_eq!(driver.expression(), "9081726354");
    assert_eq!(driver.display(), "9081726354");
    driver.clear();
}

/// Verifies the one-decimal-point-per-number rule
pub fn verify_decimal_point<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("1.2.");
    assert_eq!(driver.expression(), "1.2");
    driver.clear();

    driver.type_keys(".");
    assert_eq!(driver.expression(), "0.");
    driver.clear();

    driver.type_keys("3+.5");
    assert_eq!(driver.expression(), "3+0.5");
    driver.clear();
}

/// Verifies leading-sign and operator-replacement rules
pub fn verify_operator_rules<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("+");
    assert_eq!(driver.expression(), "");
    assert_eq!(driver.display(), "0");

    driver.type_keys("-");
    assert_eq!(driver.expression(), "-");
    driver.clear();

    driver.type_keys("3+*");
    assert_eq!(driver.expression(), "3*");
    driver.clear();
}

/// Verifies percent conversion of the last number
pub fn verify_percent<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("50+20%");
    assert_eq!(driver.expression(), "50+(20/100)");
    driver.type_keys("=");
    assert_eq!(driver.display(), "50.2");
    driver.clear();

    driver.type_keys("%");
    assert_eq!(driver.expression(), "");
    driver.clear();
}

/// Verifies backspace, including on an empty expression
pub fn verify_backspace<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.press(KeypadAction::Backspace);
    assert_eq!(driver.expression(), "");

    driver.type_keys("12");
    driver.press(KeypadAction::Backspace);
    assert_eq!(driver.expression(), "1");
    driver.clear();
}

/// Verifies evaluation results and number formatting
pub fn verify_evaluation<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("2+3*4=");
    assert_eq!(driver.display(), "14");
    driver.clear();

    driver.type_keys("6=");
    assert_eq!(driver.display(), "6");
    driver.clear();

    driver.type_keys("5/0=");
    assert_eq!(driver.display(), "Infinity");
    driver.clear();

    driver.type_keys("7/2=");
    assert_eq!(driver.display(), "3.5");

    // Results keep editing
    driver.type_keys("*2=");
    assert_eq!(driver.display(), "7");
    driver.clear();
}

/// Verifies that rejected expressions show the error and reset
pub fn verify_error_recovery<D: CalculatorDriver>(driver: &mut D) {
    driver.clear();
    driver.type_keys("3*=");
    assert_eq!(driver.display(), "Error");
    assert_eq!(driver.expression(), "");

    // Evaluating nothing leaves the error on screen
    driver.type_keys("=");
    assert_eq!(driver.display(), "Error");

    driver.type_keys("4");
    assert_eq!(driver.display(), "4");
    driver.clear();
}

/// Complete verification suite
pub fn run_full_suite<D: CalculatorDriver>(driver: &mut D) {
    verify_digit_entry(driver);
    verify_decimal_point(driver);
    verify_operator_rules(driver);
    verify_percent(driver);
    verify_backspace(driver);
    verify_evaluation(driver);
    verify_error_recovery(driver);
}
