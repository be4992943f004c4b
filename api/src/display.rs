//! Turns the loosely typed price and rating values the API sends into
//! display strings. Every function here is total: any JSON value in, one
//! string out.

use serde_json::Value;

use crate::prefs::display_preference::DisplayPreference;

/// Shown wherever there is nothing meaningful to display.
pub const DASH: &str = "-";

/// Renders a price with the default rupiah preference.
///
/// - `null` or blank strings render as [`DASH`].
/// - Any other string is already human formatted ("Rp25.000", "25k",
///   "10.000") and is returned trimmed.
/// - Numbers above zero become a currency string; zero, negatives and
///   non-finite numbers render as [`DASH`].
///
/// ```
/// use api::display::price_display;
/// use serde_json::json;
///
/// assert_eq!(price_display(&json!(50000)), "Rp50.000");
/// assert_eq!(price_display(&json!("25k")), "25k");
/// assert_eq!(price_display(&json!(0)), "-");
/// ```
pub fn price_display(value: &Value) -> String {
    price_display_with(value, &DisplayPreference::IDR)
}

/// Like [`price_display`], with an explicit currency and locale.
pub fn price_display_with(value: &Value, preference: &DisplayPreference) -> String {
    match value {
        Value::String(s) => {
            let trimmed = s.trim();
            // Whitespace-only reads as a missing price.
            if trimmed.is_empty() {
                DASH.to_string()
            } else {
                trimmed.to_string()
            }
        }
        Value::Number(n) => match n.as_f64() {
            Some(amount) if amount.is_finite() && amount > 0.0 => preference
                .format_price(amount)
                .unwrap_or_else(|_| n.to_string()),
            _ => DASH.to_string(),
        },
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => DASH.to_string(),
    }
}

/// Renders a rating with exactly one fractional digit.
///
/// Numbers and numeric strings are accepted; everything else, including
/// `null`, renders as [`DASH`]. Halves round away from zero.
///
/// ```
/// use api::display::rating_display;
/// use serde_json::json;
///
/// assert_eq!(rating_display(&json!(4)), "4.0");
/// assert_eq!(rating_display(&json!(4.66)), "4.7");
/// assert_eq!(rating_display(&json!("abc")), "-");
/// ```
pub fn rating_display(value: &Value) -> String {
    match rating_number(value) {
        Some(rating) => one_decimal(rating),
        None => DASH.to_string(),
    }
}

fn rating_number(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Null | Value::Bool(_) | Value::Array(_) | Value::Object(_) => None,
    };
    number.filter(|n| n.is_finite())
}

fn one_decimal(value: f64) -> String {
    let scaled = value * 10.0;
    if !scaled.is_finite() {
        return format!("{value:.1}");
    }
    let rounded = scaled.round() / 10.0;
    // -0.04 would otherwise print as "-0.0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded:.1}")
}
