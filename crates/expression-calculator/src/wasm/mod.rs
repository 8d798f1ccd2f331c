//! Browser front end for the calculator
//!
//! Input adapter (keypad buttons and keyboard), display rendering and a
//! mock DOM so the whole event path runs in ordinary unit tests. The real
//! browser bindings live behind the `wasm` feature.

#[cfg(feature = "wasm")]
mod browser;
mod calculator;
mod dom;
mod driver;
mod keypad;

#[cfg(feature = "wasm")]
pub use browser::BrowserCalculator;
pub use calculator::{CalculatorSnapshot, WasmCalculator};
pub use dom::{DomElement, DomEvent, MockDom};
pub use driver::WasmDriver;
pub use keypad::{KeypadAction, KeypadButtonDef, MockDomKeypadExt, WasmKeypad};
