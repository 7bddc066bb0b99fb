//! Functional `rgb()/rgba()`, `hsl()/hsla()`, `hsv()/hsva()` notations.
//!
//! These are read here rather than through `bigcolor`, which covers hex,
//! named colors and the lab/lch/oklab/oklch forms. Hue-based input stays at
//! full precision instead of passing through 8-bit RGB, out-of-range RGB
//! channels clamp, and the CSS Color 4 extras are accepted: angle units,
//! percentage alpha, fractional hsv channels, and the space-separated
//! `/ alpha` style. Alpha defaults to 1 when absent.

use std::f64::consts::PI;
use std::sync::LazyLock;

use regex::Regex;

use crate::color::DeviceColor;
use crate::numeric::clamp;

static FUNCTIONAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(rgba?|hsla?|hsva?)\(\s*(.*?)\s*\)$").expect("static regex")
});

static COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:e[+-]?\d+)?)(deg|grad|rad|turn|%)?$")
        .expect("static regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    None,
    Percent,
    Deg,
    Rad,
    Grad,
    Turn,
}

#[derive(Debug, Clone, Copy)]
struct Component {
    number: f64,
    unit: Unit,
}

impl Component {
    fn parse(raw: &str) -> Option<Self> {
        let caps = COMPONENT.captures(raw)?;
        let number: f64 = caps[1].parse().ok()?;
        let unit = match caps.get(2).map(|m| m.as_str().to_ascii_lowercase()).as_deref() {
            None => Unit::None,
            Some("%") => Unit::Percent,
            Some("deg") => Unit::Deg,
            Some("rad") => Unit::Rad,
            Some("grad") => Unit::Grad,
            Some("turn") => Unit::Turn,
            Some(_) => return None,
        };
        number.is_finite().then_some(Self { number, unit })
    }

    /// An RGB channel as 0.0–1.0; numbers are 0–255, percentages 0–100.
    fn rgb_channel(self) -> Option<f64> {
        match self.unit {
            Unit::None => Some(clamp(self.number / 255.0, 0.0, 1.0)),
            Unit::Percent => Some(clamp(self.number / 100.0, 0.0, 1.0)),
            _ => None,
        }
    }

    /// Hue in degrees.
    fn hue(self) -> Option<f64> {
        match self.unit {
            Unit::None | Unit::Deg => Some(self.number),
            Unit::Rad => Some(self.number * 180.0 / PI),
            Unit::Grad => Some(self.number * 360.0 / 400.0),
            Unit::Turn => Some(self.number * 360.0),
            Unit::Percent => None,
        }
    }

    /// A saturation/lightness/value channel; `%` is optional, always 0–100.
    fn percentage(self) -> Option<f64> {
        match self.unit {
            Unit::None | Unit::Percent => Some(clamp(self.number / 100.0, 0.0, 1.0)),
            _ => None,
        }
    }

    fn alpha(self) -> Option<f64> {
        match self.unit {
            Unit::None => Some(clamp(self.number, 0.0, 1.0)),
            Unit::Percent => Some(clamp(self.number / 100.0, 0.0, 1.0)),
            _ => None,
        }
    }
}

/// Parse a functional notation into a device color. `None` for anything
/// else, hex included.
pub fn parse_functional(input: &str) -> Option<DeviceColor> {
    let caps = FUNCTIONAL.captures(input.trim())?;
    let name = caps[1].to_ascii_lowercase();
    let (channels, alpha) = split_arguments(&caps[2])?;
    let [x, y, z] = channels;

    let alpha = match alpha {
        Some(a) => a.alpha()?,
        None => 1.0,
    };

    match &name[..3] {
        "rgb" => Some(DeviceColor::from_rgba(
            x.rgb_channel()?,
            y.rgb_channel()?,
            z.rgb_channel()?,
            alpha,
        )),
        "hsl" => Some(DeviceColor::from_hsl(x.hue()?, y.percentage()?, z.percentage()?, alpha)),
        "hsv" => Some(DeviceColor::from_hsv(x.hue()?, y.percentage()?, z.percentage()?, alpha)),
        _ => None,
    }
}

/// Split the argument list into three channels plus an optional alpha.
///
/// Comma style: `a, b, c[, alpha]`. Space style: `a b c[ / alpha]`.
fn split_arguments(args: &str) -> Option<([Component; 3], Option<Component>)> {
    let (head, alpha): (Vec<&str>, Option<&str>) = if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        match parts.len() {
            3 => (parts, None),
            4 => (parts[..3].to_vec(), Some(parts[3])),
            _ => return None,
        }
    } else {
        let (channels, alpha) = match args.split_once('/') {
            Some((channels, alpha)) => (channels, Some(alpha.trim())),
            None => (args, None),
        };
        (channels.split_whitespace().collect(), alpha)
    };

    if head.len() != 3 {
        return None;
    }
    let channels = [
        Component::parse(head[0])?,
        Component::parse(head[1])?,
        Component::parse(head[2])?,
    ];
    let alpha = match alpha {
        Some(raw) => Some(Component::parse(raw)?),
        None => None,
    };
    Some((channels, alpha))
}
