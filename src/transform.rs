//! Transform engine: canonical model + ordered steps → new canonical model.
//!
//! Each step is validated against its kind's magnitude range, offered to the
//! plugins, and otherwise applied to the device color. The result is
//! re-derived and rounded; `format` and `source` ride along unchanged.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::color::DeviceColor;
use crate::constants::{HUE_STEP_RANGE, UNIT_STEP_RANGE};
use crate::error::{code, ColorError, Result};
use crate::model::ColorModel;
use crate::numeric::{clamp_unit, normalize_alpha, normalize_hue, within_range};
use crate::plugin::PluginRegistry;

/// The operation a step performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransformKind {
    Lighten,
    Darken,
    Saturate,
    Desaturate,
    HueShift,
    Alpha,
}

impl TransformKind {
    pub const ALL: [TransformKind; 6] = [
        Self::Lighten,
        Self::Darken,
        Self::Saturate,
        Self::Desaturate,
        Self::HueShift,
        Self::Alpha,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Lighten => "lighten",
            Self::Darken => "darken",
            Self::Saturate => "saturate",
            Self::Desaturate => "desaturate",
            Self::HueShift => "hueShift",
            Self::Alpha => "alpha",
        }
    }

    /// Inclusive magnitude range.
    pub fn range(self) -> (f64, f64) {
        match self {
            Self::HueShift => HUE_STEP_RANGE,
            _ => UNIT_STEP_RANGE,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransformKind {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| {
                ColorError::transform(code::UNSUPPORTED_TRANSFORM, format!("Unsupported transform type: {s}"))
                    .with_field("kind")
            })
    }
}

/// A single transform step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transformation {
    pub kind: TransformKind,
    pub magnitude: f64,
}

impl Transformation {
    pub fn new(kind: TransformKind, magnitude: f64) -> Self {
        Self { kind, magnitude }
    }

    pub fn lighten(amount: f64) -> Self {
        Self::new(TransformKind::Lighten, amount)
    }

    pub fn darken(amount: f64) -> Self {
        Self::new(TransformKind::Darken, amount)
    }

    pub fn saturate(amount: f64) -> Self {
        Self::new(TransformKind::Saturate, amount)
    }

    pub fn desaturate(amount: f64) -> Self {
        Self::new(TransformKind::Desaturate, amount)
    }

    pub fn hue_shift(degrees: f64) -> Self {
        Self::new(TransformKind::HueShift, degrees)
    }

    pub fn alpha(delta: f64) -> Self {
        Self::new(TransformKind::Alpha, delta)
    }

    /// Reject magnitudes outside the kind's range (NaN included).
    pub fn validate(&self) -> Result<()> {
        let (min, max) = self.kind.range();
        if within_range(self.magnitude, (min, max)) {
            return Ok(());
        }
        Err(ColorError::transform(
            code::OUT_OF_RANGE,
            format!("Value for {} must be between {min} and {max}", self.kind),
        )
        .with_field(self.kind.as_str()))
    }
}

pub(crate) fn transform_color(
    plugins: &PluginRegistry,
    model: &ColorModel,
    steps: &[Transformation],
) -> Result<ColorModel> {
    let mut current = model.clone();
    for step in steps {
        current = apply_step(plugins, current, step)?;
    }
    Ok(current)
}

fn apply_step(plugins: &PluginRegistry, current: ColorModel, step: &Transformation) -> Result<ColorModel> {
    if let Some(replaced) = plugins.run_transform(&current, step)? {
        return Ok(replaced);
    }

    step.validate()?;
    let device = current.to_device().ok_or_else(|| {
        ColorError::transform(code::INVALID_MODEL, "Cannot transform invalid color model")
    })?;

    let changed = apply_builtin(device, current.hue, step);
    let next = ColorModel::from_device(changed, current.format, current.source.clone());
    Ok(stabilize_hue(&current, step, next))
}

/// `hue` is the model's own hue; the device color cannot carry one for grays.
fn apply_builtin(color: DeviceColor, hue: f64, step: &Transformation) -> DeviceColor {
    let amount = step.magnitude;
    match step.kind {
        TransformKind::Lighten => shift_lightness(color, hue, amount),
        TransformKind::Darken => shift_lightness(color, hue, -amount),
        TransformKind::Saturate => shift_saturation(color, hue, amount),
        TransformKind::Desaturate => shift_saturation(color, hue, -amount),
        TransformKind::HueShift => {
            let (_, s, v) = color.to_hsv();
            DeviceColor::from_hsv(hue + amount, s, v, color.alpha())
        }
        TransformKind::Alpha => color.with_alpha(normalize_alpha(Some(color.alpha() + amount))),
    }
}

/// Move HSL lightness by `delta` (a unit fraction, i.e. `delta * 100`
/// percentage points). A negative delta is the opposite operation.
fn shift_lightness(color: DeviceColor, hue: f64, delta: f64) -> DeviceColor {
    let (_, s, l) = color.to_hsl();
    DeviceColor::from_hsl(hue, s, clamp_unit(l + delta), color.alpha())
}

fn shift_saturation(color: DeviceColor, hue: f64, delta: f64) -> DeviceColor {
    let (_, s, l) = color.to_hsl();
    DeviceColor::from_hsl(hue, clamp_unit(s + delta), l, color.alpha())
}

/// Black and grays carry no recoverable hue; keep the one the step started
/// from, turned by the step itself when it is a hue shift.
fn stabilize_hue(base: &ColorModel, step: &Transformation, mut next: ColorModel) -> ColorModel {
    if next.is_achromatic() && base.hue.is_finite() {
        let turn = match step.kind {
            TransformKind::HueShift => step.magnitude,
            _ => 0.0,
        };
        next.hue = normalize_hue(base.hue + turn);
    }
    next
}

/// Decode transform steps from JSON.
///
/// The value must be an array of objects carrying `kind` (or `type`) and
/// `magnitude` (or `value`).
#[cfg(feature = "json")]
pub fn steps_from_json(value: &serde_json::Value) -> Result<Vec<Transformation>> {
    let entries = value
        .as_array()
        .ok_or_else(|| ColorError::transform(code::INVALID_STEPS, "Transform steps must be an array"))?;

    entries
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let kind = lookup(entry, ["kind", "type"])
                .and_then(serde_json::Value::as_str)
                .ok_or_else(|| {
                    ColorError::transform(code::INVALID_STEPS, format!("Step {index} has no transform kind"))
                        .with_field("kind")
                })?
                .parse::<TransformKind>()?;
            let magnitude = lookup(entry, ["magnitude", "value"])
                .and_then(serde_json::Value::as_f64)
                .ok_or_else(|| {
                    ColorError::transform(code::INVALID_STEPS, format!("Step {index} has no numeric magnitude"))
                        .with_field("magnitude")
                })?;
            Ok(Transformation::new(kind, magnitude))
        })
        .collect()
}

#[cfg(feature = "json")]
fn lookup<'a>(entry: &'a serde_json::Value, names: [&str; 2]) -> Option<&'a serde_json::Value> {
    names.into_iter().find_map(|name| entry.get(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::model::ColorFormat;

    fn orange() -> ColorModel {
        ColorModel {
            hue: 32.0,
            saturation: 1.0,
            value: 1.0,
            alpha: 1.0,
            format: ColorFormat::Hex,
            source: "#ff8800".into(),
        }
    }

    fn run(model: &ColorModel, steps: &[Transformation]) -> Result<ColorModel> {
        transform_color(&PluginRegistry::new(), model, steps)
    }

    #[test]
    fn lighten_then_darken_keeps_alpha() {
        let out = run(&orange(), &[Transformation::lighten(0.2), Transformation::darken(0.1)]).expect("transform");
        assert!((out.alpha - 1.0).abs() < 1e-4);
        assert!(out.value <= 1.0);
        assert_eq!(out.format, ColorFormat::Hex);
        assert_eq!(out.source, "#ff8800");
    }

    #[test]
    fn lighten_moves_hsl_lightness_by_percentage_points() {
        let out = run(&orange(), &[Transformation::lighten(0.2)]).unwrap();
        let (_, _, l) = out.to_device().unwrap().to_hsl();
        assert!((l - 0.7).abs() < 1e-3, "l = {l}");
    }

    #[test]
    fn negative_lighten_equals_darken() {
        let a = run(&orange(), &[Transformation::lighten(-0.3)]).unwrap();
        let b = run(&orange(), &[Transformation::darken(0.3)]).unwrap();
        assert_eq!(a, b);
        let c = run(&orange(), &[Transformation::desaturate(-0.2)]).unwrap();
        let d = run(&orange(), &[Transformation::saturate(0.2)]).unwrap();
        assert_eq!(c, d);
    }

    #[test]
    fn hue_shift_rotates_and_wraps() {
        let out = run(&orange(), &[Transformation::hue_shift(45.0)]).unwrap();
        assert!((out.hue - 77.0).abs() < 1e-3, "hue = {}", out.hue);
        let out = run(&orange(), &[Transformation::hue_shift(-40.0)]).unwrap();
        assert!((out.hue - 352.0).abs() < 1e-3, "hue = {}", out.hue);
    }

    #[test]
    fn alpha_step_adds_and_clamps() {
        let out = run(&orange(), &[Transformation::alpha(-0.25)]).unwrap();
        assert_eq!(out.alpha, 0.75);
        let out = run(&out, &[Transformation::alpha(1.0)]).unwrap();
        assert_eq!(out.alpha, 1.0);
    }

    #[test]
    fn darkening_to_black_keeps_hue() {
        let out = run(&orange(), &[Transformation::darken(1.0)]).unwrap();
        assert_eq!(out.value, 0.0);
        assert_eq!(out.hue, 32.0);
    }

    #[test]
    fn desaturating_to_gray_keeps_hue() {
        let out = run(&orange(), &[Transformation::desaturate(1.0)]).unwrap();
        assert_eq!(out.saturation, 0.0);
        assert_eq!(out.hue, 32.0);
        let back = run(&out, &[Transformation::saturate(0.5)]).unwrap();
        assert_eq!(back.hue, 32.0);
        assert!(back.saturation > 0.0);
    }

    #[test]
    fn hue_shift_on_gray_is_remembered() {
        let gray = ColorModel {
            hue: 0.0,
            saturation: 0.0,
            value: 0.502,
            alpha: 1.0,
            format: ColorFormat::Hex,
            source: "#808080".into(),
        };
        let shifted = run(&gray, &[Transformation::hue_shift(90.0)]).unwrap();
        assert_eq!(shifted.hue, 90.0);
        assert_eq!(shifted.saturation, 0.0);

        let out = run(&gray, &[Transformation::hue_shift(90.0), Transformation::saturate(0.5)]).unwrap();
        assert!((out.hue - 90.0).abs() < 0.01, "hue = {}", out.hue);
        let (r, g, b) = out.to_device().unwrap().to_rgb();
        assert!(g > r && r > b, "rgb = {r} {g} {b}");
    }

    #[test]
    fn hue_shift_on_black_wraps() {
        let black = ColorModel {
            hue: 300.0,
            value: 0.0,
            ..orange()
        };
        let out = run(&black, &[Transformation::hue_shift(90.0)]).unwrap();
        assert_eq!(out.hue, 30.0);
        assert_eq!(out.value, 0.0);
    }

    #[test]
    fn out_of_range_magnitude_fails() {
        let err = run(&orange(), &[Transformation::lighten(2.0)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transform);
        assert_eq!(err.code, code::OUT_OF_RANGE);
        assert_eq!(err.field.as_deref(), Some("lighten"));
        assert!(err.message.len() >= 15);

        assert!(run(&orange(), &[Transformation::hue_shift(360.0)]).is_ok());
        assert!(run(&orange(), &[Transformation::hue_shift(360.5)]).is_err());
        assert!(run(&orange(), &[Transformation::alpha(f64::NAN)]).is_err());
    }

    #[test]
    fn failed_step_discards_earlier_progress() {
        let steps = [Transformation::lighten(0.1), Transformation::darken(-5.0)];
        assert!(run(&orange(), &steps).is_err());
    }

    #[test]
    fn empty_steps_return_the_model() {
        assert_eq!(run(&orange(), &[]), Ok(orange()));
    }

    #[test]
    fn unknown_kind_name_is_unsupported() {
        let err = "unknown".parse::<TransformKind>().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Transform);
        assert_eq!(err.code, code::UNSUPPORTED_TRANSFORM);
        assert_eq!("hueShift".parse::<TransformKind>(), Ok(TransformKind::HueShift));
    }

    #[test]
    fn invalid_model_cannot_be_transformed() {
        let mut model = orange();
        model.value = 3.0;
        let err = run(&model, &[Transformation::lighten(0.1)]).unwrap_err();
        assert_eq!(err.code, code::INVALID_MODEL);
    }

    #[cfg(feature = "json")]
    mod json {
        use serde_json::json;

        use super::*;

        #[test]
        fn decodes_kind_and_legacy_aliases() {
            let steps = steps_from_json(&json!([
                { "kind": "lighten", "magnitude": 0.2 },
                { "type": "hueShift", "value": -30 },
            ]))
            .unwrap();
            assert_eq!(steps, [Transformation::lighten(0.2), Transformation::hue_shift(-30.0)]);
        }

        #[test]
        fn non_array_is_invalid_steps() {
            let err = steps_from_json(&json!({ "kind": "lighten", "magnitude": 0.2 })).unwrap_err();
            assert_eq!(err.code, code::INVALID_STEPS);
            assert_eq!(err.kind, ErrorKind::Transform);
        }

        #[test]
        fn unknown_kind_is_unsupported() {
            let err = steps_from_json(&json!([{ "kind": "unknown", "magnitude": 1 }])).unwrap_err();
            assert_eq!(err.code, code::UNSUPPORTED_TRANSFORM);
        }

        #[test]
        fn missing_magnitude_names_field() {
            let err = steps_from_json(&json!([{ "kind": "alpha" }])).unwrap_err();
            assert_eq!(err.code, code::INVALID_STEPS);
            assert_eq!(err.field.as_deref(), Some("magnitude"));
        }
    }
}
