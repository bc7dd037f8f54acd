//! Fixed-decimal rounding for monetary amounts and percentages.
//!
//! All prices and percentage figures leave the engine rounded to a known
//! number of decimal places. `f64::round` rounds halves away from zero, which
//! is how the figures are presented to operators.

/// Round `value` to `places` decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Round to 2 decimal places (monetary amounts, margin percentages).
pub fn round2(value: f64) -> f64 {
    round_to(value, 2)
}

/// Round to 4 decimal places (markup divisor expressed as a percentage).
pub fn round4(value: f64) -> f64 {
    round_to(value, 4)
}
