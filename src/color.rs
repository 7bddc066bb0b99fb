//! DeviceColor — the RGB(+alpha) bridge between the canonical model and text.
//!
//! Channels are kept unquantized so HSL/HSV round trips stay exact until a
//! format step renders 8-bit integers.

use bigcolor::color_space::RGB;

use crate::math;
use crate::numeric::clamp_unit;

/// RGBA color with every component in the 0.0–1.0 range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceColor {
    rgb: [f64; 3],
    alpha: f64,
}

impl Default for DeviceColor {
    /// Opaque black.
    fn default() -> Self {
        Self {
            rgb: [0.0; 3],
            alpha: 1.0,
        }
    }
}

impl From<RGB> for DeviceColor {
    fn from(color: RGB) -> Self {
        Self::from_bytes([color.r, color.g, color.b]).with_alpha(f64::from(color.a))
    }
}

impl DeviceColor {
    /// Build from 8-bit channels, fully opaque.
    pub fn from_bytes(bytes: [u8; 3]) -> Self {
        Self {
            rgb: bytes.map(|byte| f64::from(byte) / 255.0),
            alpha: 1.0,
        }
    }

    /// Build from fractional channels. Anything outside 0.0–1.0 is clamped.
    pub fn from_rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self {
            rgb: [r, g, b].map(clamp_unit),
            alpha: clamp_unit(a),
        }
    }

    /// Fractional red, green and blue.
    pub fn channels(&self) -> [f64; 3] {
        self.rgb
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Channels quantized to bytes.
    pub fn to_rgb(&self) -> (u8, u8, u8) {
        let [r, g, b] = self.rgb.map(to_byte);
        (r, g, b)
    }

    pub fn alpha_byte(&self) -> u8 {
        to_byte(self.alpha)
    }

    /// Copy with a different alpha (clamped).
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            alpha: clamp_unit(alpha),
            ..self
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(&self) -> String {
        let (r, g, b) = self.to_rgb();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// Lowercase `#rrggbbaa`.
    pub fn to_hex8(&self) -> String {
        format!("{}{:02x}", self.to_hex(), self.alpha_byte())
    }

    /// Hue in degrees; saturation and value are clamped to 0.0–1.0.
    pub fn from_hsv(hue: f64, saturation: f64, value: f64, alpha: f64) -> Self {
        let (r, g, b) = math::hsv_to_rgb(hue, clamp_unit(saturation), clamp_unit(value));
        Self::from_rgba(r, g, b, alpha)
    }

    /// `(hue°, saturation, value)`.
    pub fn to_hsv(&self) -> (f64, f64, f64) {
        let [r, g, b] = self.rgb;
        math::rgb_to_hsv(r, g, b)
    }

    /// Hue in degrees; saturation and lightness are clamped to 0.0–1.0.
    pub fn from_hsl(hue: f64, saturation: f64, lightness: f64, alpha: f64) -> Self {
        let (s, v) = math::hsl_to_hsv(clamp_unit(saturation), clamp_unit(lightness));
        Self::from_hsv(hue, s, v, alpha)
    }

    /// `(hue°, saturation, lightness)`.
    pub fn to_hsl(&self) -> (f64, f64, f64) {
        let (hue, s, v) = self.to_hsv();
        let (s, l) = math::hsv_to_hsl(s, v);
        (hue, s, l)
    }
}

fn to_byte(channel: f64) -> u8 {
    (clamp_unit(channel) * 255.0).round() as u8
}
