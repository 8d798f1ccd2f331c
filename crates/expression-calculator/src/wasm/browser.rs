//! Browser WASM bindings for the calculator
//!
//! The page forwards button clicks (their `data-value` / `data-action`)
//! and `keydown` keys; the calculator writes the display element itself.

use wasm_bindgen::prelude::*;
#[cfg(target_arch = "wasm32")]
use web_sys::console;

use crate::config::CalculatorConfig;
use crate::wasm::calculator::WasmCalculator;

/// Browser Calculator - the main WASM entry point
#[derive(Debug)]
#[wasm_bindgen]
pub struct BrowserCalculator {
    calculator: WasmCalculator,
}

#[wasm_bindgen]
impl BrowserCalculator {
    /// Create a calculator with the default configuration
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::from_config(CalculatorConfig::default())
    }

    /// Create a calculator from a JSON configuration
    #[wasm_bindgen(js_name = withConfig)]
    pub fn with_config(json: &str) -> Result<BrowserCalculator, JsValue> {
        let config = CalculatorConfig::from_json(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(Self::from_config(config))
    }

    /// Text currently on the display
    #[wasm_bindgen(getter)]
    pub fn display(&self) -> String {
        self.calculator.display().to_string()
    }

    /// Current expression text
    #[wasm_bindgen(getter)]
    pub fn expression(&self) -> String {
        self.calculator.expression().to_string()
    }

    /// Handle a click on a `.btn` element; returns true if handled
    #[wasm_bindgen(js_name = handleButton)]
    pub fn handle_button(&mut self, value: Option<String>, action: Option<String>) -> bool {
        let handled = self
            .calculator
            .handle_button(value.as_deref(), action.as_deref());
        self.render();
        handled
    }

    /// Handle a `keydown` key; the caller should `preventDefault()` when
    /// this returns true
    #[wasm_bindgen(js_name = handleKey)]
    pub fn handle_key(&mut self, key: &str) -> bool {
        let handled = self.calculator.handle_key(key);
        if handled {
            self.render();
        }
        handled
    }

    /// Current state as JSON
    #[wasm_bindgen(js_name = stateJson)]
    pub fn state_json(&self) -> String {
        self.calculator.state_json()
    }

    /// Write the display text into the page
    pub fn render(&self) {
        #[cfg(target_arch = "wasm32")]
        {
            let id = &self.calculator.config().display_element_id;
            let element = web_sys::window()
                .and_then(|w| w.document())
                .and_then(|d| d.get_element_by_id(id));
            match element {
                Some(el) => el.set_text_content(Some(self.calculator.display())),
                None => console::warn_1(&format!("display element #{id} not found").into()),
            }
        }
    }
}

impl BrowserCalculator {
    fn from_config(config: CalculatorConfig) -> Self {
        console_error_panic_hook::set_once();
        let calc = Self {
            calculator: WasmCalculator::with_config(config),
        };
        calc.render();
        calc
    }
}

impl Default for BrowserCalculator {
    fn default() -> Self {
        Self::new()
    }
}

/// Initialize the calculator module in the browser
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    console::log_1(&"Calculator WASM initialized".into());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browser_calculator_new() {
        let calc = BrowserCalculator::new();
        assert_eq!(calc.display(), "0");
        assert!(calc.expression().is_empty());
    }

    #[test]
    fn test_handle_key_flow() {
        let mut calc = BrowserCalculator::new();
        assert!(calc.handle_key("7"));
        assert!(calc.handle_key("*"));
        assert!(calc.handle_key("6"));
        assert!(calc.handle_key("Enter"));
        assert_eq!(calc.display(), "42");
        assert!(!calc.handle_key("F5"));
    }

    #[test]
    fn test_handle_button_flow() {
        let mut calc = BrowserCalculator::new();
        assert!(calc.handle_button(Some("5".into()), None));
        assert!(calc.handle_button(None, Some("percent".into())));
        assert_eq!(calc.expression(), "(5/100)");
        assert!(calc.handle_button(None, Some("clear".into())));
        assert_eq!(calc.display(), "0");
    }

    #[test]
    fn test_state_json() {
        let mut calc = BrowserCalculator::new();
        calc.handle_key("3");
        assert_eq!(calc.state_json(), r#"{"expression":"3","display":"3"}"#);
    }
}
