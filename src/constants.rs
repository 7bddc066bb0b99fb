//! Precision, range, and message-length constants for the engine.

/// Fractional digits kept on hue/saturation/value/alpha after every parse or transform.
pub const MODEL_PRECISION: u32 = 4;

/// Fractional digits used by the formatter when the request leaves precision unset.
pub const DEFAULT_FORMAT_PRECISION: i32 = 2;

/// Largest precision a format request may ask for (inclusive).
pub const MAX_FORMAT_PRECISION: i32 = 6;

/// Error messages shorter than this are padded with trailing periods.
pub const MIN_MESSAGE_LENGTH: usize = 15;

/// Hue wraps at this many degrees.
pub const HUE_TURN: f64 = 360.0;

/// Legal magnitude range for lighten/darken/saturate/desaturate/alpha steps.
pub const UNIT_STEP_RANGE: (f64, f64) = (-1.0, 1.0);

/// Legal magnitude range for hue rotation steps.
pub const HUE_STEP_RANGE: (f64, f64) = (-360.0, 360.0);
