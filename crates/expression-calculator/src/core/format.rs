//! Number formatting for the display
//!
//! Results are rendered the way a browser renders a JavaScript number:
//! shortest round-trip digits, no trailing `.0`, exponential notation
//! outside `[1e-6, 1e21)`, and `Infinity` / `NaN` for special values.

/// Largest decimal exponent rendered without exponential notation
const MAX_FIXED_EXPONENT: i32 = 21;
/// Smallest decimal exponent rendered without exponential notation
const MIN_FIXED_EXPONENT: i32 = -6;

/// Formats a number for display
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        // Covers -0 as well
        return "0".to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    match shortest_digits(value.abs()) {
        Some((digits, point)) => format!("{sign}{}", layout(&digits, point)),
        None => value.to_string(),
    }
}

/// Splits a positive finite value into its shortest round-trip digit
/// string and the position of the decimal point relative to those digits.
///
/// `value == 0.d1d2d3... * 10^point`
fn shortest_digits(value: f64) -> Option<(String, i32)> {
    let sci = format!("{value:e}");
    let (mantissa, exponent) = sci.split_once('e')?;
    let exponent: i32 = exponent.parse().ok()?;
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    Some((digits, exponent + 1))
}

fn layout(digits: &str, point: i32) -> String {
    let len = digits.len() as i32;

    if len <= point && point <= MAX_FIXED_EXPONENT {
        // Integer: pad with zeros
        format!("{digits}{}", "0".repeat((point - len) as usize))
    } else if 0 < point && point <= MAX_FIXED_EXPONENT {
        let (int, frac) = digits.split_at(point as usize);
        format!("{int}.{frac}")
    } else if MIN_FIXED_EXPONENT < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let exponent = point - 1;
        let exp_sign = if exponent < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{exp_sign}{}", exponent.abs())
        } else {
            format!("{first}.{rest}e{exp_sign}{}", exponent.abs())
        }
    }
}
