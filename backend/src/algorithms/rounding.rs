//! Ceiling division and display rounding. Staffing never rounds down.

/// Tolerance under which a quotient is treated as a whole number.
const WHOLE_EPSILON: f64 = 1e-9;

/// `ceil(numerator / divisor)` for integers. `divisor` must be positive.
pub fn ceil_div(numerator: u32, divisor: u32) -> u32 {
    debug_assert!(divisor > 0);
    numerator.div_ceil(divisor)
}

/// `ceil(numerator / divisor)` for real values, saturating at `u32::MAX`.
///
/// Quotients within `1e-9` of a whole number snap to it, so `3.3 / 1.1` is 3
/// rather than 4. Both arguments must be finite, `divisor` positive.
pub fn ceil_ratio(numerator: f64, divisor: f64) -> u32 {
    debug_assert!(divisor > 0.0);
    let quotient = numerator / divisor;
    let nearest = quotient.round();
    let value = if (quotient - nearest).abs() < WHOLE_EPSILON {
        nearest
    } else {
        quotient.ceil()
    };
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}

/// Round half away from zero to `decimals` places, for reported figures.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
