//! DOM-level driver
//!
//! Routes clicks and key presses through the mock page exactly as the
//! browser event listeners would, and renders into the display element.

use super::calculator::WasmCalculator;
use super::dom::{DomEvent, MockDom};
use super::keypad::{KeypadAction, WasmKeypad};
use crate::config::CalculatorConfig;
use crate::driver::CalculatorDriver;

/// Driver wrapping a calculator and its mock page
#[derive(Debug)]
pub struct WasmDriver {
    calculator: WasmCalculator,
    dom: MockDom,
    keypad: WasmKeypad,
}

impl Default for WasmDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmDriver {
    /// Creates a driver with the default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(CalculatorConfig::default())
    }

    /// Creates a driver with a custom configuration
    #[must_use]
    pub fn with_config(config: CalculatorConfig) -> Self {
        let dom = MockDom::calculator(&config);
        let mut driver = Self {
            calculator: WasmCalculator::with_config(config),
            dom,
            keypad: WasmKeypad::new(),
        };
        driver.sync_dom();
        driver
    }

    /// Returns a reference to the calculator
    #[must_use]
    pub fn calculator(&self) -> &WasmCalculator {
        &self.calculator
    }

    /// Returns a reference to the DOM
    #[must_use]
    pub fn dom(&self) -> &MockDom {
        &self.dom
    }

    /// Simulates clicking an element; returns true if it was a keypad button
    pub fn click(&mut self, element_id: &str) -> bool {
        let event = DomEvent::click(element_id);
        self.dom.dispatch_event(event);

        // Read the dataset the way the page listener does
        let handled = match self.dom.get_element(element_id) {
            Some(elem) if elem.has_class("btn") => {
                let value = elem.get_attr("data-value").map(str::to_string);
                let action = elem.get_attr("data-action").map(str::to_string);
                self.calculator
                    .handle_button(value.as_deref(), action.as_deref())
            }
            _ => false,
        };

        self.sync_dom();
        handled
    }

    /// Simulates a key press; returns true if the default was prevented
    pub fn press_key(&mut self, key: &str) -> bool {
        let event = DomEvent::key_press(key);
        self.dom.dispatch_event(event.clone());

        let handled = self.calculator.handle_key(key);
        if handled {
            self.dom.prevent_default(event);
        }

        self.sync_dom();
        handled
    }

    /// Text of the display element
    #[must_use]
    pub fn display_element_text(&self) -> Option<&str> {
        self.dom
            .get_element_text(&self.calculator.config().display_element_id)
    }

    fn sync_dom(&mut self) {
        let id = self.calculator.config().display_element_id.clone();
        self.dom.set_element_text(&id, self.calculator.display());
    }
}

impl CalculatorDriver for WasmDriver {
    fn press(&mut self, action: KeypadAction) {
        // Prefer the on-screen button; fall back to the keyboard for
        // actions without one.
        let button_id = self
            .keypad
            .buttons()
            .iter()
            .find(|b| b.action == action)
            .map(|b| b.id.clone());
        match button_id {
            Some(id) => {
                self.click(&id);
            }
            None => {
                self.calculator.dispatch(action);
                self.sync_dom();
            }
        }
    }

    fn display(&self) -> String {
        self.display_element_text().unwrap_or_default().to_string()
    }

    fn expression(&self) -> String {
        self.calculator.expression().to_string()
    }
}

impl CalculatorDriver for WasmCalculator {
    fn press(&mut self, action: KeypadAction) {
        self.dispatch(action);
    }

    fn display(&self) -> String {
        WasmCalculator::display(self).to_string()
    }

    fn expression(&self) -> String {
        WasmCalculator::expression(self).to_string()
    }
}
