use once_cell::sync::Lazy;
use regex::Regex;

pub const DEFAULT_ACCENT_COLOR: &str = "#667eea";

/// Amount the gradient stops are shaded away from the accent.
pub const GRADIENT_SHADE: f64 = 0.18;

/// Saturation and lightness the form slider uses when turning a hue into an accent.
pub const SLIDER_SATURATION: f64 = 72.0;
pub const SLIDER_LIGHTNESS: f64 = 58.0;

static HEX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#?([0-9a-f]{3}|[0-9a-f]{6})$").unwrap());

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// Returns `#rrggbb` in lowercase, or [`DEFAULT_ACCENT_COLOR`] when `input`
/// is absent or not a 3/6 digit hex color.
pub fn normalize_hex_color(input: Option<&str>) -> String {
    let Some(input) = input else {
        return DEFAULT_ACCENT_COLOR.to_string();
    };
    let Some(caps) = HEX_RE.captures(input.trim()) else {
        return DEFAULT_ACCENT_COLOR.to_string();
    };
    let digits = &caps[1];
    let mut out = String::with_capacity(7);
    out.push('#');
    if digits.len() == 3 {
        for ch in digits.chars() {
            out.push(ch.to_ascii_lowercase());
            out.push(ch.to_ascii_lowercase());
        }
    } else {
        out.push_str(&digits.to_ascii_lowercase());
    }
    out
}

pub fn hex_to_rgb(hex: &str) -> Rgb {
    let normalized = normalize_hex_color(Some(hex));
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&normalized[range], 16).unwrap_or(0) as f64
    };
    Rgb::new(channel(1..3), channel(3..5), channel(5..7))
}

pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        clamp_channel(rgb.r),
        clamp_channel(rgb.g),
        clamp_channel(rgb.b)
    )
}

fn clamp_channel(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 255.0) as u8
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 1.0)
}

/// Linear per-channel blend of `base` toward `mix`; `weight` is clamped to [0, 1].
pub fn mix_hex_colors(base: &str, mix: &str, weight: f64) -> String {
    let w = clamp_unit(weight);
    let base = hex_to_rgb(base);
    let mix = hex_to_rgb(mix);
    rgb_to_hex(Rgb::new(
        base.r * (1.0 - w) + mix.r * w,
        base.g * (1.0 - w) + mix.g * w,
        base.b * (1.0 - w) + mix.b * w,
    ))
}

/// Positive amounts lighten toward white, negative darken toward black.
pub fn shade_hex_color(hex: &str, amount: f64) -> String {
    if amount == 0.0 || amount.is_nan() {
        return normalize_hex_color(Some(hex));
    }
    if amount > 0.0 {
        return mix_hex_colors(hex, "#ffffff", amount.min(1.0));
    }
    mix_hex_colors(hex, "#000000", amount.abs().min(1.0))
}

/// `h` in degrees (wrapped into [0, 360)), `s` and `l` as percentages.
pub fn hsl_to_hex(h: f64, s: f64, l: f64) -> String {
    let h = if h.is_finite() { h.rem_euclid(360.0) } else { 0.0 };
    let saturation = clamp_percent(s) / 100.0;
    let lightness = clamp_percent(l) / 100.0;
    let a = saturation * lightness.min(1.0 - lightness);
    let f = |n: f64| {
        let k = (n + h / 30.0) % 12.0;
        lightness - a * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0)
    };
    rgb_to_hex(Rgb::new(
        clamp_unit(f(0.0)) * 255.0,
        clamp_unit(f(8.0)) * 255.0,
        clamp_unit(f(4.0)) * 255.0,
    ))
}

fn clamp_percent(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

pub fn hex_to_rgba(hex: &str, alpha: f64) -> String {
    let rgb = hex_to_rgb(hex);
    format!(
        "rgba({}, {}, {}, {})",
        rgb.r,
        rgb.g,
        rgb.b,
        clamp_unit(alpha)
    )
}

/// Accent color plus the darker/lighter stops used for gradients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccentPalette {
    pub accent: String,
    pub gradient_from: String,
    pub gradient_to: String,
}

impl AccentPalette {
    pub fn from_accent(accent: Option<&str>) -> Self {
        Self::from_normalized(normalize_hex_color(accent))
    }

    pub fn from_hue(hue: f64) -> Self {
        Self::from_normalized(hsl_to_hex(hue, SLIDER_SATURATION, SLIDER_LIGHTNESS))
    }

    fn from_normalized(accent: String) -> Self {
        let gradient_from = shade_hex_color(&accent, -GRADIENT_SHADE);
        let gradient_to = shade_hex_color(&accent, GRADIENT_SHADE);
        Self {
            accent,
            gradient_from,
            gradient_to,
        }
    }
}

impl Default for AccentPalette {
    fn default() -> Self {
        Self::from_accent(None)
    }
}
