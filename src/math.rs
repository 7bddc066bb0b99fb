//! Color math — direct conversions between RGB, HSV, and HSL.
//! Hue is in degrees; every other channel is normalized f64 in 0.0–1.0.

use crate::constants::HUE_TURN;

/// HSV → RGB.
pub(crate) fn hsv_to_rgb(h: f64, s: f64, v: f64) -> (f64, f64, f64) {
    if s == 0.0 {
        return (v, v, v);
    }
    let h6 = h.rem_euclid(HUE_TURN) / 60.0;
    let i = h6.floor();
    let f = h6 - i;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match i as u32 % 6 {
        0 => (v, t, p),
        1 => (q, v, p),
        2 => (p, v, t),
        3 => (p, q, v),
        4 => (t, p, v),
        _ => (v, p, q),
    }
}

/// RGB → HSV. Achromatic input reports hue 0.
pub(crate) fn rgb_to_hsv(r: f64, g: f64, b: f64) -> (f64, f64, f64) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let v = max;
    let s = if max == 0.0 { 0.0 } else { delta / max };

    let h = if delta == 0.0 {
        0.0
    } else if max == r {
        ((g - b) / delta).rem_euclid(6.0) * 60.0
    } else if max == g {
        ((b - r) / delta + 2.0) * 60.0
    } else {
        ((r - g) / delta + 4.0) * 60.0
    };

    (h, s, v)
}

/// HSL saturation/lightness → HSV saturation/value. Hue is shared.
///
/// Both sides are expressed through the chroma `C = V·S_v = (1 − |2L − 1|)·S_l`.
pub(crate) fn hsl_to_hsv(saturation: f64, lightness: f64) -> (f64, f64) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let value = lightness + chroma / 2.0;
    let saturation = if value > 0.0 { chroma / value } else { 0.0 };
    (saturation, value)
}

/// HSV saturation/value → HSL saturation/lightness. White and black report
/// zero saturation.
pub(crate) fn hsv_to_hsl(saturation: f64, value: f64) -> (f64, f64) {
    let chroma = value * saturation;
    let lightness = value - chroma / 2.0;
    let spread = 1.0 - (2.0 * lightness - 1.0).abs();
    let saturation = if spread > 0.0 { chroma / spread } else { 0.0 };
    (saturation, lightness)
}
