//! CMYK codec: RGB ↔ CMYK conversion and `cmyk(...)` input normalization.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

static CMYK_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)cmyk").expect("static regex"));

static CMYK_STRING: LazyLock<Regex> = LazyLock::new(|| {
    let part = r"(\d+(?:\.\d+)?)%?";
    Regex::new(&format!(r"(?i)^cmyk\({part},{part},{part},{part}\)$")).expect("static regex")
});

/// Cyan, magenta, yellow, and key (black), each 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cmyk {
    pub c: f64,
    pub m: f64,
    pub y: f64,
    pub k: f64,
}

impl Cmyk {
    /// Channels as rounded integer percentages.
    pub fn percentages(&self) -> [u8; 4] {
        [self.c, self.m, self.y, self.k].map(|x| (x.clamp(0.0, 1.0) * 100.0).round() as u8)
    }
}

/// 8-bit RGB → CMYK. Pure black maps to key only.
pub fn rgb_to_cmyk(r: u8, g: u8, b: u8) -> Cmyk {
    if r == 0 && g == 0 && b == 0 {
        return Cmyk {
            c: 0.0,
            m: 0.0,
            y: 0.0,
            k: 1.0,
        };
    }

    let c = 1.0 - r as f64 / 255.0;
    let m = 1.0 - g as f64 / 255.0;
    let y = 1.0 - b as f64 / 255.0;
    let k = c.min(m).min(y);

    Cmyk {
        c: (c - k) / (1.0 - k),
        m: (m - k) / (1.0 - k),
        y: (y - k) / (1.0 - k),
        k,
    }
}

/// CMYK percentages (0–100) → 8-bit RGB.
pub fn cmyk_to_rgb(cyan: f64, magenta: f64, yellow: f64, black: f64) -> (u8, u8, u8) {
    let k = black / 100.0;
    let channel = |x: f64| {
        let ink = (x / 100.0) * (1.0 - k) + k;
        (255.0 * (1.0 - ink)).round().clamp(0.0, 255.0) as u8
    };
    (channel(cyan), channel(magenta), channel(yellow))
}

/// `true` if the text mentions the cmyk function at all.
pub fn is_cmyk(input: &str) -> bool {
    CMYK_MARKER.is_match(input)
}

/// Rewrite a `cmyk(c, m, y, k)` string as an equivalent `rgb(r, g, b)` string.
///
/// Components are 0–100 with an optional `%`; whitespace is ignored. Anything
/// that is not a well-formed cmyk string is returned untouched.
pub fn cmyk_input_to_rgb(input: &str) -> Cow<'_, str> {
    if !is_cmyk(input) {
        return Cow::Borrowed(input);
    }
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let Some(caps) = CMYK_STRING.captures(&compact) else {
        return Cow::Borrowed(input);
    };
    let part = |i: usize| {
        caps[i]
            .parse::<f64>()
            .map_or(0.0, |x| x.clamp(0.0, 100.0))
    };
    let (r, g, b) = cmyk_to_rgb(part(1), part(2), part(3), part(4));
    Cow::Owned(format!("rgb({r}, {g}, {b})"))
}
