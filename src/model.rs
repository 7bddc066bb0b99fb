//! The canonical color model and its format tag.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::DeviceColor;
use crate::constants::HUE_TURN;
use crate::error::{code, ColorError};
use crate::numeric::{clamp, normalize_alpha, normalize_hue, normalize_unit};

/// External textual representation tag. Doubles as the formatter's target.
///
/// Deserializes through [`FromStr`], so an unknown name in a request payload
/// fails with the same `UNSUPPORTED_TARGET` error the formatter raises.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ColorFormat {
    Hex,
    /// Hex with a trailing alpha byte (`#rrggbbaa`).
    Hex8,
    #[default]
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Hsv,
    Hsva,
    Cmyk,
    /// Alias of `rgba` for CSS consumers.
    Css,
    /// Recognized perceptual space; formatting to it always fails.
    Oklch,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 11] = [
        Self::Hex,
        Self::Hex8,
        Self::Rgb,
        Self::Rgba,
        Self::Hsl,
        Self::Hsla,
        Self::Hsv,
        Self::Hsva,
        Self::Cmyk,
        Self::Css,
        Self::Oklch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hex => "hex",
            Self::Hex8 => "hex8",
            Self::Rgb => "rgb",
            Self::Rgba => "rgba",
            Self::Hsl => "hsl",
            Self::Hsla => "hsla",
            Self::Hsv => "hsv",
            Self::Hsva => "hsva",
            Self::Cmyk => "cmyk",
            Self::Css => "css",
            Self::Oklch => "oklch",
        }
    }

    /// The alpha-bearing sibling of this format, if it has one.
    pub fn with_alpha(self) -> Option<Self> {
        match self {
            Self::Hex => Some(Self::Hex8),
            Self::Rgb => Some(Self::Rgba),
            Self::Hsl => Some(Self::Hsla),
            Self::Hsv => Some(Self::Hsva),
            _ => None,
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for ColorFormat {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == lower)
            .ok_or_else(|| {
                ColorError::format(code::UNSUPPORTED_TARGET, format!("Unsupported format target: {s}"))
                    .with_field("target")
            })
    }
}

impl TryFrom<String> for ColorFormat {
    type Error = ColorError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// One editable channel of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Hue,
    Saturation,
    Value,
    Alpha,
}

/// The engine's single internal color representation.
///
/// Treat as read-only after construction: every engine operation returns a
/// fresh model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorModel {
    /// Degrees. Engine-produced models keep this in [0, 360).
    pub hue: f64,
    pub saturation: f64,
    pub value: f64,
    pub alpha: f64,
    #[serde(default)]
    pub format: ColorFormat,
    #[serde(default)]
    pub source: String,
}

impl Default for ColorModel {
    fn default() -> Self {
        Self::placeholder(ColorFormat::default(), "")
    }
}

impl ColorModel {
    /// The documented "no color yet" shape: black, opaque, hue 0.
    pub fn placeholder(format: ColorFormat, source: impl Into<String>) -> Self {
        Self {
            hue: 0.0,
            saturation: 0.0,
            value: 0.0,
            alpha: 1.0,
            format,
            source: source.into(),
        }
    }

    /// Build a model from a device color, rounding every channel to model precision.
    pub(crate) fn from_device(device: DeviceColor, format: ColorFormat, source: String) -> Self {
        let (h, s, v) = device.to_hsv();
        Self {
            hue: normalize_hue(h),
            saturation: normalize_unit(s),
            value: normalize_unit(v),
            alpha: normalize_alpha(Some(device.alpha())),
            format,
            source,
        }
    }

    /// Reconstruct the device color. `None` when hue/saturation/value are not
    /// finite or saturation/value fall outside [0, 1]. Alpha is clamped, NaN
    /// alpha counts as opaque.
    pub fn to_device(&self) -> Option<DeviceColor> {
        let unit = |x: f64| (0.0..=1.0).contains(&x);
        if !self.hue.is_finite() || !unit(self.saturation) || !unit(self.value) {
            return None;
        }
        let alpha = if self.alpha.is_nan() { 1.0 } else { self.alpha };
        Some(DeviceColor::from_hsv(self.hue, self.saturation, self.value, alpha))
    }

    /// `true` when hue cannot be recovered from a device-color round trip.
    pub fn is_achromatic(&self) -> bool {
        self.saturation == 0.0 || self.value == 0.0
    }

    /// Copy with one channel replaced: hue clamped to [0, 360], the rest to [0, 1].
    pub fn with_channel(&self, channel: Channel, value: f64) -> Self {
        let mut next = self.clone();
        match channel {
            Channel::Hue => next.hue = clamp(value, 0.0, HUE_TURN),
            Channel::Saturation => next.saturation = clamp(value, 0.0, 1.0),
            Channel::Value => next.value = clamp(value, 0.0, 1.0),
            Channel::Alpha => next.alpha = clamp(value, 0.0, 1.0),
        }
        next
    }
}
