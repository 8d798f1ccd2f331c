//! Mock DOM for exercising the calculator without a browser
//!
//! Mirrors the page the calculator runs in: one display element and a grid
//! of `.btn` buttons carrying `data-value` / `data-action` attributes.

use std::collections::HashMap;

use super::keypad::{MockDomKeypadExt, WasmKeypad};
use crate::config::CalculatorConfig;

/// Represents a DOM element for testing
#[derive(Debug, Clone, PartialEq)]
pub struct DomElement {
    /// Element ID
    pub id: String,
    /// Element tag name
    pub tag: String,
    /// Text content
    pub text_content: String,
    /// Element attributes
    pub attributes: HashMap<String, String>,
    /// CSS classes
    pub classes: Vec<String>,
    /// Child elements
    pub children: Vec<DomElement>,
}

impl Default for DomElement {
    fn default() -> Self {
        Self::new("div")
    }
}

impl DomElement {
    /// Creates a new DOM element with the given tag
    #[must_use]
    pub fn new(tag: &str) -> Self {
        Self {
            id: String::new(),
            tag: tag.to_string(),
            text_content: String::new(),
            attributes: HashMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Creates an element with an ID
    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = id.to_string();
        self
    }

    /// Sets the text content
    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text_content = text.to_string();
        self
    }

    /// Adds a class
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    /// Sets an attribute
    #[must_use]
    pub fn with_attr(mut self, key: &str, value: &str) -> Self {
        self.attributes.insert(key.to_string(), value.to_string());
        self
    }

    /// Adds a child element
    #[must_use]
    pub fn with_child(mut self, child: DomElement) -> Self {
        self.children.push(child);
        self
    }

    /// Sets text content
    pub fn set_text(&mut self, text: &str) {
        self.text_content = text.to_string();
    }

    /// Adds a class
    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    /// Checks if element has a class
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    /// Gets an attribute value
    #[must_use]
    pub fn get_attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }
}

/// DOM events the calculator listens to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomEvent {
    /// Click event on an element
    Click {
        /// The ID of the clicked element
        element_id: String,
    },
    /// Key press on the window
    KeyPress {
        /// The key that was pressed (`KeyboardEvent.key`)
        key: String,
    },
}

impl DomEvent {
    /// Creates a click event
    #[must_use]
    pub fn click(element_id: &str) -> Self {
        Self::Click {
            element_id: element_id.to_string(),
        }
    }

    /// Creates a key press event
    #[must_use]
    pub fn key_press(key: &str) -> Self {
        Self::KeyPress {
            key: key.to_string(),
        }
    }
}

/// Mock DOM for testing the calculator without a browser
#[derive(Debug)]
pub struct MockDom {
    /// Root element
    pub root: DomElement,
    elements: HashMap<String, DomElement>,
    event_history: Vec<DomEvent>,
    prevented: Vec<DomEvent>,
}

impl Default for MockDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MockDom {
    /// Creates an empty mock DOM
    #[must_use]
    pub fn new() -> Self {
        Self {
            root: DomElement::new("div").with_id("root"),
            elements: HashMap::new(),
            event_history: Vec::new(),
            prevented: Vec::new(),
        }
    }

    /// Creates the calculator page: display plus keypad
    #[must_use]
    pub fn calculator(config: &CalculatorConfig) -> Self {
        let mut dom = Self::new();
        let keypad = WasmKeypad::new();

        let display = DomElement::new("div")
            .with_id(&config.display_element_id)
            .with_class("display")
            .with_text(&config.empty_display);

        dom.root = DomElement::new("div")
            .with_id("calculator")
            .with_class("calculator")
            .with_child(display.clone())
            .with_child(keypad.create_keypad_element());

        dom.register_element(display);
        dom.add_keypad(&keypad);
        dom
    }

    /// Registers an element for ID lookup
    pub fn register_element(&mut self, element: DomElement) {
        if !element.id.is_empty() {
            self.elements.insert(element.id.clone(), element);
        }
    }

    /// Gets an element by ID
    #[must_use]
    pub fn get_element(&self, id: &str) -> Option<&DomElement> {
        self.elements.get(id)
    }

    /// Returns all registered elements with the given class
    #[must_use]
    pub fn elements_with_class(&self, class: &str) -> Vec<&DomElement> {
        let mut found: Vec<&DomElement> = self
            .elements
            .values()
            .filter(|e| e.has_class(class))
            .collect();
        found.sort_by(|a, b| a.id.cmp(&b.id));
        found
    }

    /// Records a dispatched event
    pub fn dispatch_event(&mut self, event: DomEvent) {
        self.event_history.push(event);
    }

    /// Marks an event as handled (`preventDefault`)
    pub fn prevent_default(&mut self, event: DomEvent) {
        self.prevented.push(event);
    }

    /// Gets the event history
    #[must_use]
    pub fn event_history(&self) -> &[DomEvent] {
        &self.event_history
    }

    /// Events whose default action was prevented
    #[must_use]
    pub fn prevented_events(&self) -> &[DomEvent] {
        &self.prevented
    }

    /// Updates element text by ID
    pub fn set_element_text(&mut self, id: &str, text: &str) {
        if let Some(elem) = self.elements.get_mut(id) {
            elem.set_text(text);
        }
    }

    /// Gets element text by ID
    #[must_use]
    pub fn get_element_text(&self, id: &str) -> Option<&str> {
        self.elements.get(id).map(|e| e.text_content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===== DomElement tests =====

    #[test]
    fn test_dom_element_new() {
        let elem = DomElement::new("span");
        assert_eq!(elem.tag, "span");
        assert!(elem.id.is_empty());
        assert!(elem.text_content.is_empty());
    }

    #[test]
    fn test_dom_element_default() {
        assert_eq!(DomElement::default().tag, "div");
    }

    #[test]
    fn test_dom_element_builders() {
        let elem = DomElement::new("button")
            .with_id("btn-1")
            .with_text("1")
            .with_class("btn")
            .with_class("btn")
            .with_attr("data-value", "1");
        assert_eq!(elem.id, "btn-1");
        assert_eq!(elem.text_content, "1");
        assert_eq!(elem.classes, vec!["btn".to_string()]);
        assert_eq!(elem.get_attr("data-value"), Some("1"));
        assert_eq!(elem.get_attr("data-action"), None);
    }

    #[test]
    fn test_dom_element_with_child() {
        let parent = DomElement::new("div").with_child(DomElement::new("span"));
        assert_eq!(parent.children.len(), 1);
    }

    // ===== DomEvent tests =====

    #[test]
    fn test_dom_event_constructors() {
        assert_eq!(
            DomEvent::click("btn-1"),
            DomEvent::Click {
                element_id: "btn-1".into()
            }
        );
        assert_eq!(
            DomEvent::key_press("Enter"),
            DomEvent::KeyPress {
                key: "Enter".into()
            }
        );
    }

    // ===== MockDom tests =====

    #[test]
    fn test_mock_dom_calculator_layout() {
        let dom = MockDom::calculator(&CalculatorConfig::default());
        assert_eq!(dom.get_element_text("display"), Some("0"));
        assert_eq!(dom.elements_with_class("btn").len(), 19);
        assert_eq!(dom.root.children.len(), 2);
    }

    #[test]
    fn test_mock_dom_custom_display_id() {
        let config = CalculatorConfig::new()
            .with_display_element_id("screen")
            .with_empty_display("");
        let dom = MockDom::calculator(&config);
        assert_eq!(dom.get_element_text("screen"), Some(""));
        assert!(dom.get_element("display").is_none());
    }

    #[test]
    fn test_mock_dom_set_text() {
        let mut dom = MockDom::calculator(&CalculatorConfig::default());
        dom.set_element_text("display", "42");
        assert_eq!(dom.get_element_text("display"), Some("42"));
        dom.set_element_text("missing", "x");
        assert_eq!(dom.get_element_text("missing"), None);
    }

    #[test]
    fn test_mock_dom_event_history() {
        let mut dom = MockDom::new();
        dom.dispatch_event(DomEvent::key_press("a"));
        dom.dispatch_event(DomEvent::key_press("1"));
        dom.prevent_default(DomEvent::key_press("1"));
        assert_eq!(dom.event_history().len(), 2);
        assert_eq!(dom.prevented_events(), &[DomEvent::key_press("1")]);
    }
}
