//! Calculator configuration

use serde::{Deserialize, Serialize};

use crate::core::{CalcError, CalcResult};

/// Display configuration for a calculator instance
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorConfig {
    /// Text shown after a rejected evaluation
    pub error_indicator: String,
    /// Text shown while the expression is empty
    pub empty_display: String,
    /// Element id of the display in the page
    pub display_element_id: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            error_indicator: Self::DEFAULT_ERROR_INDICATOR.to_string(),
            empty_display: Self::DEFAULT_EMPTY_DISPLAY.to_string(),
            display_element_id: Self::DEFAULT_DISPLAY_ELEMENT_ID.to_string(),
        }
    }
}

impl CalculatorConfig {
    /// Default error indicator
    pub const DEFAULT_ERROR_INDICATOR: &'static str = "Error";
    /// Default text for an empty expression
    pub const DEFAULT_EMPTY_DISPLAY: &'static str = "0";
    /// Default display element id
    pub const DEFAULT_DISPLAY_ELEMENT_ID: &'static str = "display";

    /// Create a new config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the error indicator
    #[must_use]
    pub fn with_error_indicator(mut self, text: impl Into<String>) -> Self {
        self.error_indicator = text.into();
        self
    }

    /// Set the empty-expression text
    #[must_use]
    pub fn with_empty_display(mut self, text: impl Into<String>) -> Self {
        self.empty_display = text.into();
        self
    }

    /// Set the display element id
    #[must_use]
    pub fn with_display_element_id(mut self, id: impl Into<String>) -> Self {
        self.display_element_id = id.into();
        self
    }

    /// Load a config from JSON; missing fields keep their defaults
    pub fn from_json(json: &str) -> CalcResult<Self> {
        serde_json::from_str(json).map_err(|e| CalcError::Config(e.to_string()))
    }

    /// Serialize the config to JSON
    pub fn to_json(&self) -> CalcResult<String> {
        serde_json::to_string(self).map_err(|e| CalcError::Config(e.to_string()))
    }
}
