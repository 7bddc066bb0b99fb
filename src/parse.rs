//! Parser: text → canonical model, including format inference.

use std::sync::LazyLock;

use bigcolor::BigColor;
use regex::Regex;

use crate::cmyk::{cmyk_input_to_rgb, is_cmyk};
use crate::color::DeviceColor;
use crate::error::{code, ColorError, Result};
use crate::model::{ColorFormat, ColorModel};
use crate::numeric::normalize_alpha;
use crate::plugin::PluginRegistry;
use crate::syntax;

static HEX_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^#?([0-9a-f]{3,4}|[0-9a-f]{6}|[0-9a-f]{8})$").expect("static regex"));

/// Fourth comma-separated argument of a functional rgb/hsl/hsv form.
static COMMA_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rgba?|hsla?|hsva?)\(\s*[^,()]+,[^,()]+,[^,()]+,\s*([^,\s()]+)\s*\)$").expect("static regex")
});

/// `/ alpha` tail of a space-separated functional form.
static SLASH_ALPHA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:rgba?|hsla?|hsva?)\([^,()/]+/\s*([^,\s()/]+)\s*\)$").expect("static regex")
});

pub(crate) fn parse_color(plugins: &PluginRegistry, input: &str) -> Result<ColorModel> {
    if let Some(model) = plugins.run_parse(input)? {
        return Ok(model);
    }

    let normalized = cmyk_input_to_rgb(input);
    let device = syntax::parse_functional(&normalized)
        .or_else(|| parse_with_bigcolor(&normalized))
        .ok_or_else(|| ColorError::parse(code::INVALID_INPUT, "Invalid color input"))?;

    let alpha = normalize_alpha(explicit_alpha(input).or(Some(device.alpha())));
    let mut model = ColorModel::from_device(device, infer_format(input), input.to_string());
    model.alpha = alpha;
    Ok(model)
}

/// Hex, CSS color names, `transparent`, and the lab/lch/oklab/oklch forms.
fn parse_with_bigcolor(text: &str) -> Option<DeviceColor> {
    let color = BigColor::new(text.trim());
    color.is_valid().then(|| DeviceColor::from(color.to_rgb()))
}

/// Alpha written out in the input text, as a fraction. Percentages are
/// divided by 100. `None` when the syntax carries no alpha or it is not a
/// finite number.
fn explicit_alpha(input: &str) -> Option<f64> {
    let trimmed = input.trim();
    let caps = COMMA_ALPHA
        .captures(trimmed)
        .or_else(|| SLASH_ALPHA.captures(trimmed))?;
    let raw = caps.get(1)?.as_str();
    let value = match raw.strip_suffix('%') {
        Some(percent) => percent.parse::<f64>().ok()? / 100.0,
        None => raw.parse::<f64>().ok()?,
    };
    value.is_finite().then_some(value)
}

/// Guess the external format tag from the shape of the text.
pub fn infer_format(input: &str) -> ColorFormat {
    let trimmed = input.trim();
    if let Some(caps) = HEX_SHAPE.captures(trimmed) {
        return match caps[1].len() {
            4 | 8 => ColorFormat::Hex8,
            _ => ColorFormat::Hex,
        };
    }

    let lower = trimmed.to_ascii_lowercase();
    if lower.contains("hsla") {
        ColorFormat::Hsla
    } else if lower.contains("hsl") {
        ColorFormat::Hsl
    } else if lower.contains("hsva") {
        ColorFormat::Hsva
    } else if lower.contains("hsv") {
        ColorFormat::Hsv
    } else if lower.contains("rgba") {
        ColorFormat::Rgba
    } else if is_cmyk(&lower) {
        ColorFormat::Cmyk
    } else {
        ColorFormat::Rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn parse(input: &str) -> Result<ColorModel> {
        parse_color(&PluginRegistry::new(), input)
    }

    #[test]
    fn hex_parses_to_opaque_model() {
        let model = parse("#ff8800").expect("hex");
        assert_eq!(model.hue, 32.0);
        assert_eq!(model.saturation, 1.0);
        assert_eq!(model.value, 1.0);
        assert_eq!(model.alpha, 1.0);
        assert_eq!(model.format, ColorFormat::Hex);
        assert_eq!(model.source, "#ff8800");
    }

    #[test]
    fn named_colors_parse() {
        let model = parse("red").expect("named color");
        assert_eq!((model.hue, model.saturation, model.value), (0.0, 1.0, 1.0));
        assert_eq!(model.alpha, 1.0);
        assert_eq!(model.format, ColorFormat::Rgb);
        assert_eq!(model.source, "red");

        let model = parse("  RebeccaPurple ").expect("mixed-case name");
        assert_eq!(model.to_device().map(|d| d.to_hex()), Some("#663399".to_string()));
    }

    #[test]
    fn transparent_keyword_has_zero_alpha() {
        assert_eq!(parse("transparent").map(|m| m.alpha), Ok(0.0));
    }

    #[test]
    fn short_and_bare_hex() {
        let short = parse("#F80").expect("3-digit hex");
        assert_eq!(short.to_device().map(|d| d.to_hex()), Some("#ff8800".to_string()));
        assert_eq!(parse("ff8800").map(|m| m.hue), Ok(32.0));
        assert_eq!(parse("#f808").map(|m| m.alpha), Ok(0.5333));
    }

    #[test]
    fn oklch_input_is_accepted() {
        assert!(parse("oklch(0.7 0.1 200)").is_ok());
    }

    #[test]
    fn hsl_input_keeps_its_hue() {
        let model = parse("hsl(210, 60%, 50%)").expect("hsl");
        assert_eq!(model.hue, 210.0);
        assert_eq!(model.saturation, 0.75);
        assert_eq!(model.value, 0.8);
    }

    #[test]
    fn explicit_alpha_is_rounded_to_four_digits() {
        let model = parse("rgba(255, 136, 0, 0.75555)").expect("rgba");
        assert!((model.alpha - 0.7556).abs() < 1e-4, "alpha = {}", model.alpha);
        assert_eq!(model.format, ColorFormat::Rgba);
        assert!(model.source.to_lowercase().contains("rgba"));
    }

    #[test]
    fn percentage_alpha() {
        assert_eq!(parse("hsla(210, 60%, 50%, 25%)").map(|m| m.alpha), Ok(0.25));
        assert_eq!(parse("rgb(0 0 0 / 40%)").map(|m| m.alpha), Ok(0.4));
    }

    #[test]
    fn rgb_without_alpha_is_opaque() {
        assert_eq!(parse("rgb(255, 136, 0)").map(|m| m.alpha), Ok(1.0));
    }

    #[test]
    fn hex8_alpha_comes_from_the_hex_digits() {
        let model = parse("#ff880080").expect("hex8");
        assert_eq!(model.format, ColorFormat::Hex8);
        assert_eq!(model.alpha, 0.502);
    }

    #[test]
    fn cmyk_input_is_accepted() {
        let model = parse("cmyk(0%, 0%, 0%, 100%)").expect("cmyk");
        assert_eq!(model.value, 0.0);
        assert_eq!(model.format, ColorFormat::Cmyk);
        assert_eq!(model.source, "cmyk(0%, 0%, 0%, 100%)");
    }

    #[test]
    fn invalid_input_is_a_parse_error() {
        let err = parse("not-a-color").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Parse);
        assert_eq!(err.code, code::INVALID_INPUT);
        assert!(err.message.len() >= 15);
    }

    #[test]
    fn malformed_cmyk_is_invalid() {
        assert!(parse("cmyk(0, 0, 0)").is_err());
    }

    #[test]
    fn format_inference() {
        assert_eq!(infer_format("#abc"), ColorFormat::Hex);
        assert_eq!(infer_format("abcd"), ColorFormat::Hex8);
        assert_eq!(infer_format("#aabbcc"), ColorFormat::Hex);
        assert_eq!(infer_format("#aabbccdd"), ColorFormat::Hex8);
        assert_eq!(infer_format("hsl(1,2%,3%)"), ColorFormat::Hsl);
        assert_eq!(infer_format("HSLA(1,2%,3%,0.5)"), ColorFormat::Hsla);
        assert_eq!(infer_format("hsv(1,2%,3%)"), ColorFormat::Hsv);
        assert_eq!(infer_format("hsva(1,2%,3%,1)"), ColorFormat::Hsva);
        assert_eq!(infer_format("rgba(1,2,3,1)"), ColorFormat::Rgba);
        assert_eq!(infer_format("cmyk(1,2,3,4)"), ColorFormat::Cmyk);
        assert_eq!(infer_format("rgb(1,2,3)"), ColorFormat::Rgb);
    }

    #[test]
    fn explicit_alpha_extraction() {
        assert_eq!(explicit_alpha("rgba(1, 2, 3, 0.3)"), Some(0.3));
        assert_eq!(explicit_alpha("hsla(1, 2%, 3%, 30%)"), Some(0.3));
        assert_eq!(explicit_alpha("hsv(1 2% 3% / .5)"), Some(0.5));
        assert_eq!(explicit_alpha("rgb(1, 2, 3)"), None);
        assert_eq!(explicit_alpha("#ff8800"), None);
    }
}
