//! Rounding, clamping, and range helpers shared by every conversion.

use crate::constants::{HUE_TURN, MODEL_PRECISION};

/// Round `value` to `digits` fractional digits, half away from zero.
pub fn round_to(value: f64, digits: u32) -> f64 {
    let factor = 10_f64.powi(digits as i32);
    (value * factor).round() / factor
}

/// Round to the model precision.
pub(crate) fn round_model(value: f64) -> f64 {
    round_to(value, MODEL_PRECISION)
}

/// Clamp `value` into `[min, max]`. NaN passes through unchanged.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

/// Clamp into the unit interval.
pub(crate) fn clamp_unit(value: f64) -> f64 {
    clamp(value, 0.0, 1.0)
}

/// Normalize an optional alpha: missing or NaN becomes 1, anything else is
/// rounded to model precision and clamped into [0, 1].
pub fn normalize_alpha(alpha: Option<f64>) -> f64 {
    match alpha {
        Some(a) if !a.is_nan() => clamp_unit(round_model(a)),
        _ => 1.0,
    }
}

/// Round a unit-interval channel to model precision and clamp it.
pub(crate) fn normalize_unit(value: f64) -> f64 {
    clamp_unit(round_model(value))
}

/// Wrap hue into [0, 360) after rounding to model precision.
pub fn normalize_hue(hue: f64) -> f64 {
    let wrapped = round_model(hue.rem_euclid(HUE_TURN));
    if wrapped >= HUE_TURN {
        0.0
    } else {
        wrapped
    }
}

/// Inclusive range check. NaN is never within range.
pub fn within_range(value: f64, (min, max): (f64, f64)) -> bool {
    (min..=max).contains(&value)
}
