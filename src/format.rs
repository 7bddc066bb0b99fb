//! Formatter: canonical model → text in a requested target format.

use serde::{Deserialize, Serialize};

use crate::cmyk::rgb_to_cmyk;
use crate::color::DeviceColor;
use crate::constants::{DEFAULT_FORMAT_PRECISION, HUE_TURN, MAX_FORMAT_PRECISION};
use crate::error::{code, ColorError, Result};
use crate::math;
use crate::model::{ColorFormat, ColorModel};
use crate::numeric::round_to;
use crate::plugin::PluginRegistry;

/// What to render and how.
///
/// Unset fields fall back to: the model's own format, precision 2, and
/// alpha included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormatRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<ColorFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precision: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_alpha: Option<bool>,
}

impl FormatRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shorthand for a request that only names the target.
    pub fn to(target: ColorFormat) -> Self {
        Self::new().target(target)
    }

    pub fn target(mut self, target: ColorFormat) -> Self {
        self.target = Some(target);
        self
    }

    pub fn precision(mut self, precision: i32) -> Self {
        self.precision = Some(precision);
        self
    }

    pub fn include_alpha(mut self, include: bool) -> Self {
        self.include_alpha = Some(include);
        self
    }
}

pub(crate) fn format_color(plugins: &PluginRegistry, model: &ColorModel, request: &FormatRequest) -> Result<String> {
    if let Some(text) = plugins.run_format(model, request)? {
        return Ok(text);
    }

    let precision = resolve_precision(request)?;
    let include_alpha = request.include_alpha.unwrap_or(true);
    let device = model.to_device().ok_or_else(|| {
        ColorError::format(code::INVALID_MODEL, "Cannot format invalid color model")
    })?;

    let requested = request.target.unwrap_or(model.format);
    let target = effective_target(requested, include_alpha, device.alpha());
    render(model, device, target, precision)
}

fn resolve_precision(request: &FormatRequest) -> Result<usize> {
    let precision = request.precision.unwrap_or(DEFAULT_FORMAT_PRECISION);
    if !(0..=MAX_FORMAT_PRECISION).contains(&precision) {
        return Err(ColorError::format(
            code::INVALID_PRECISION,
            format!("Precision must be between 0 and {MAX_FORMAT_PRECISION}, got {precision}"),
        )
        .with_field("precision"));
    }
    Ok(precision as usize)
}

/// Swap in the alpha-bearing sibling when alpha is requested. Hex only grows
/// an alpha byte when the color is actually translucent.
fn effective_target(target: ColorFormat, include_alpha: bool, alpha: f64) -> ColorFormat {
    if !include_alpha || (target == ColorFormat::Hex && alpha >= 1.0) {
        return target;
    }
    target.with_alpha().unwrap_or(target)
}

fn render(model: &ColorModel, device: DeviceColor, target: ColorFormat, precision: usize) -> Result<String> {
    let (r, g, b) = device.to_rgb();
    let alpha = fixed(device.alpha(), precision);
    let text = match target {
        ColorFormat::Hex => device.to_hex(),
        ColorFormat::Hex8 => device.to_hex8(),
        ColorFormat::Rgb => format!("rgb({r}, {g}, {b})"),
        ColorFormat::Rgba | ColorFormat::Css => format!("rgba({r}, {g}, {b}, {alpha})"),
        ColorFormat::Hsl | ColorFormat::Hsla => {
            let (s, l) = math::hsv_to_hsl(model.saturation, model.value);
            let (h, s, l) = (degrees(model.hue), percent(s), percent(l));
            if target == ColorFormat::Hsla {
                format!("hsla({h}, {s}%, {l}%, {alpha})")
            } else {
                format!("hsl({h}, {s}%, {l}%)")
            }
        }
        ColorFormat::Hsv | ColorFormat::Hsva => {
            let (h, s, v) = (degrees(model.hue), percent(model.saturation), percent(model.value));
            if target == ColorFormat::Hsva {
                format!("hsva({h}, {s}%, {v}%, {alpha})")
            } else {
                format!("hsv({h}, {s}%, {v}%)")
            }
        }
        ColorFormat::Cmyk => {
            let [c, m, y, k] = rgb_to_cmyk(r, g, b).percentages();
            format!("cmyk({c}%, {m}%, {y}%, {k}%)")
        }
        ColorFormat::Oklch => {
            return Err(ColorError::format(
                code::UNSUPPORTED_TARGET,
                "OKLCH formatting not supported yet",
            )
            .with_field("target"));
        }
    };
    Ok(text)
}

fn fixed(value: f64, precision: usize) -> String {
    format!("{:.*}", precision, round_to(value, precision as u32))
}

fn degrees(hue: f64) -> i64 {
    (hue.round() as i64).rem_euclid(HUE_TURN as i64)
}

fn percent(unit: f64) -> i64 {
    (unit * 100.0).round() as i64
}
