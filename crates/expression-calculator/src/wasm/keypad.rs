//! Keypad and keyboard input mapping
//!
//! Buttons carry their meaning in the page markup: append buttons have a
//! `data-value`, command buttons a `data-action`. Keyboard keys map 1:1 onto
//! the same actions.

use super::dom::{DomElement, MockDom};
use crate::core::Operation;

/// Actions that keypad buttons and keys can perform
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeypadAction {
    /// Insert a digit (0-9)
    Digit(u8),
    /// Insert a decimal point
    Decimal,
    /// Insert an operator (`+ - * /`); any other character inserts nothing
    Operator(char),
    /// Evaluate the expression
    Equals,
    /// Clear the expression
    Clear,
    /// Remove the last character
    Backspace,
    /// Turn the last number into a percentage
    Percent,
}

impl KeypadAction {
    /// Returns the character to append for this action
    #[must_use]
    pub fn to_char(&self) -> Option<char> {
        match self {
            KeypadAction::Digit(d) => char::from_digit(u32::from(*d), 10),
            KeypadAction::Decimal => Some('.'),
            KeypadAction::Operator(op) if Operation::is_keypad_operator(*op) => Some(*op),
            KeypadAction::Operator(_)
            | KeypadAction::Equals
            | KeypadAction::Clear
            | KeypadAction::Backspace
            | KeypadAction::Percent => None,
        }
    }

    /// Maps an appendable character back to its action
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        match ch {
            '0'..='9' => ch.to_digit(10).map(|d| KeypadAction::Digit(d as u8)),
            '.' => Some(KeypadAction::Decimal),
            _ if Operation::is_keypad_operator(ch) => Some(KeypadAction::Operator(ch)),
            _ => None,
        }
    }

    /// Returns the button label for this action
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            KeypadAction::Digit(d) => d.to_string(),
            KeypadAction::Decimal => ".".to_string(),
            KeypadAction::Operator(op) => op.to_string(),
            KeypadAction::Equals => "=".to_string(),
            KeypadAction::Clear => "C".to_string(),
            KeypadAction::Backspace => "⌫".to_string(),
            KeypadAction::Percent => "%".to_string(),
        }
    }

    /// Returns the `data-action` name for command buttons
    #[must_use]
    pub const fn action_name(&self) -> Option<&'static str> {
        match self {
            KeypadAction::Equals => Some("equals"),
            KeypadAction::Clear => Some("clear"),
            KeypadAction::Backspace => Some("backspace"),
            KeypadAction::Percent => Some("percent"),
            KeypadAction::Digit(_) | KeypadAction::Decimal | KeypadAction::Operator(_) => None,
        }
    }
}

/// A single keypad button definition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeypadButtonDef {
    /// The action this button performs
    pub action: KeypadAction,
    /// The DOM element ID for this button
    pub id: String,
    /// Grid row (0-indexed)
    pub row: usize,
    /// Grid column (0-indexed)
    pub col: usize,
}

impl KeypadButtonDef {
    /// Creates a new button definition
    #[must_use]
    pub fn new(action: KeypadAction, row: usize, col: usize) -> Self {
        let id = match action {
            KeypadAction::Digit(d) => format!("btn-{d}"),
            KeypadAction::Decimal => "btn-decimal".to_string(),
            KeypadAction::Operator(op) => format!("btn-{}", op_name(op)),
            other => format!("btn-{}", other.action_name().unwrap_or("unknown")),
        };
        Self {
            action,
            id,
            row,
            col,
        }
    }

    /// Returns the dataset attribute this button carries in the markup
    ///
    /// `("data-value", "7")` for append buttons, `("data-action", "clear")`
    /// for command buttons.
    #[must_use]
    pub fn data_attribute(&self) -> (&'static str, String) {
        match (self.action.action_name(), self.action.to_char()) {
            (Some(name), _) => ("data-action", name.to_string()),
            (None, Some(ch)) => ("data-value", ch.to_string()),
            (None, None) => ("data-value", String::new()),
        }
    }
}

/// Returns a name for an operator (for element IDs)
fn op_name(op: char) -> &'static str {
    match op {
        '+' => "plus",
        '-' => "minus",
        '*' => "times",
        '/' => "divide",
        _ => "op",
    }
}

/// Keypad layout definition
///
/// ```text
/// [ C ] [ ⌫ ] [ % ] [ / ]
/// [ 7 ] [ 8 ] [ 9 ] [ * ]
/// [ 4 ] [ 5 ] [ 6 ] [ - ]
/// [ 1 ] [ 2 ] [ 3 ] [ + ]
/// [ 0 ] [ . ] [ = ]
/// ```
#[derive(Debug, Clone)]
pub struct WasmKeypad {
    buttons: Vec<KeypadButtonDef>,
    cols: usize,
    rows: usize,
}

impl Default for WasmKeypad {
    fn default() -> Self {
        Self::new()
    }
}

impl WasmKeypad {
    /// Creates the standard calculator keypad
    #[must_use]
    pub fn new() -> Self {
        let buttons = vec![
            // Row 0: C ⌫ % /
            KeypadButtonDef::new(KeypadAction::Clear, 0, 0),
            KeypadButtonDef::new(KeypadAction::Backspace, 0, 1),
            KeypadButtonDef::new(KeypadAction::Percent, 0, 2),
            KeypadButtonDef::new(KeypadAction::Operator('/'), 0, 3),
            // Row 1: 7 8 9 *
            KeypadButtonDef::new(KeypadAction::Digit(7), 1, 0),
            KeypadButtonDef::new(KeypadAction::Digit(8), 1, 1),
            KeypadButtonDef::new(KeypadAction::Digit(9), 1, 2),
            KeypadButtonDef::new(KeypadAction::Operator('*'), 1, 3),
            // Row 2: 4 5 6 -
            KeypadButtonDef::new(KeypadAction::Digit(4), 2, 0),
            KeypadButtonDef::new(KeypadAction::Digit(5), 2, 1),
            KeypadButtonDef::new(KeypadAction::Digit(6), 2, 2),
            KeypadButtonDef::new(KeypadAction::Operator('-'), 2, 3),
            // Row 3: 1 2 3 +
            KeypadButtonDef::new(KeypadAction::Digit(1), 3, 0),
            KeypadButtonDef::new(KeypadAction::Digit(2), 3, 1),
            KeypadButtonDef::new(KeypadAction::Digit(3), 3, 2),
            KeypadButtonDef::new(KeypadAction::Operator('+'), 3, 3),
            // Row 4: 0 . =
            KeypadButtonDef::new(KeypadAction::Digit(0), 4, 0),
            KeypadButtonDef::new(KeypadAction::Decimal, 4, 1),
            KeypadButtonDef::new(KeypadAction::Equals, 4, 2),
        ];

        Self {
            buttons,
            cols: 4,
            rows: 5,
        }
    }

    /// Returns the number of buttons
    #[must_use]
    pub fn button_count(&self) -> usize {
        self.buttons.len()
    }

    /// Returns the grid dimensions (rows, cols)
    #[must_use]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Gets all button definitions
    #[must_use]
    pub fn buttons(&self) -> &[KeypadButtonDef] {
        &self.buttons
    }

    /// Gets a button by row and column
    #[must_use]
    pub fn get_button_at(&self, row: usize, col: usize) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.row == row && b.col == col)
    }

    /// Finds a button by element ID
    #[must_use]
    pub fn find_button_by_id(&self, id: &str) -> Option<&KeypadButtonDef> {
        self.buttons.iter().find(|b| b.id == id)
    }

    /// Creates DOM elements for all keypad buttons
    pub fn create_dom_elements(&self) -> Vec<DomElement> {
        self.buttons
            .iter()
            .map(|btn| {
                let (attr, value) = btn.data_attribute();
                DomElement::new("button")
                    .with_id(&btn.id)
                    .with_text(&btn.action.label())
                    .with_class("btn")
                    .with_class(&format!("keypad-row-{}", btn.row))
                    .with_class(&format!("keypad-col-{}", btn.col))
                    .with_attr(attr, &value)
            })
            .collect()
    }

    /// Creates a keypad container element with all buttons
    #[must_use]
    pub fn create_keypad_element(&self) -> DomElement {
        self.create_dom_elements().into_iter().fold(
            DomElement::new("div").with_id("calc-keypad").with_class("keypad"),
            DomElement::with_child,
        )
    }

    /// Resolves a clicked button from its dataset
    ///
    /// A known `data-action` wins; otherwise `data-value` is used when it is
    /// a single appendable character.
    #[must_use]
    pub fn from_dataset(value: Option<&str>, action: Option<&str>) -> Option<KeypadAction> {
        let command = match action {
            Some("clear") => Some(KeypadAction::Clear),
            Some("backspace") => Some(KeypadAction::Backspace),
            Some("equals") => Some(KeypadAction::Equals),
            Some("percent") => Some(KeypadAction::Percent),
            _ => None,
        };
        command.or_else(|| {
            let mut chars = value?.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) => KeypadAction::from_char(ch),
                _ => None,
            }
        })
    }

    /// Maps a keyboard key to a keypad action
    ///
    /// `None` means the key is not handled and its default should not be
    /// prevented.
    #[must_use]
    pub fn key_to_action(key: &str) -> Option<KeypadAction> {
        match key {
            "Enter" | "=" => Some(KeypadAction::Equals),
            "Backspace" => Some(KeypadAction::Backspace),
            "Escape" => Some(KeypadAction::Clear),
            "%" => Some(KeypadAction::Percent),
            _ => {
                let mut chars = key.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => KeypadAction::from_char(ch),
                    _ => None,
                }
            }
        }
    }
}

/// Extension trait for MockDom to add keypad
pub trait MockDomKeypadExt {
    /// Adds keypad buttons to an existing calculator DOM
    fn add_keypad(&mut self, keypad: &WasmKeypad);
}

impl MockDomKeypadExt for MockDom {
    fn add_keypad(&mut self, keypad: &WasmKeypad) {
        let keypad_elem = keypad.create_keypad_element();
        for btn_elem in &keypad_elem.children {
            self.register_element(btn_elem.clone());
        }
        self.register_element(keypad_elem);
    }
}
