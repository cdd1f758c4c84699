//! sRGB <-> hex <-> HSL conversion.

use lazy_static::lazy_static;
use rand::Rng;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

lazy_static! {
    /// A complete `#rrggbb` color.
    static ref HEX_COLOR: Regex = Regex::new(r"^#[0-9A-Fa-f]{6}$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("not a #rrggbb color: {0:?}")]
pub struct HexError(pub String);

/// 8-bit sRGB triple.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from unchecked channel values, clamping each to 0..=255.
    pub fn clamped(r: i64, g: i64, b: i64) -> Self {
        let channel = |v: i64| v.clamp(0, 255) as u8;
        Self::new(channel(r), channel(g), channel(b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue in degrees, saturation and lightness in percent.
///
/// Components are kept unrounded so an RGB -> HSL -> RGB trip lands back on
/// the same channels; rounding happens only when displayed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Hsl {
    /// Build from unchecked values: hue to 0..=360, the rest to 0..=100.
    /// `NaN` components become 0.
    pub fn clamped(h: f64, s: f64, l: f64) -> Self {
        let clamp = |v: f64, max: f64| if v.is_nan() { 0.0 } else { v.clamp(0.0, max) };
        Self {
            h: clamp(h, 360.0),
            s: clamp(s, 100.0),
            l: clamp(l, 100.0),
        }
    }

    /// Components rounded to whole degrees and percent.
    pub fn rounded(self) -> (u16, u8, u8) {
        (
            self.h.round() as u16,
            self.s.round() as u8,
            self.l.round() as u8,
        )
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (h, s, l) = self.rounded();
        write!(f, "hsl({}, {}%, {}%)", h, s, l)
    }
}

/// Whether `text` is a complete `#rrggbb` color.
pub fn is_hex_color(text: &str) -> bool {
    HEX_COLOR.is_match(text)
}

pub fn hex_to_rgb(hex: &str) -> Result<Rgb, HexError> {
    if !is_hex_color(hex) {
        return Err(HexError(hex.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).map_err(|_| HexError(hex.to_string()))
    };
    Ok(Rgb::new(channel(1..3)?, channel(3..5)?, channel(5..7)?))
}

/// Lowercase `#rrggbb`.
pub fn rgb_to_hex(rgb: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", rgb.r, rgb.g, rgb.b)
}

pub fn rgb_to_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };
        (h * 60.0, s)
    };

    Hsl::clamped(h, s * 100.0, l * 100.0)
}

pub fn hsl_to_rgb(hsl: Hsl) -> Rgb {
    let hsl = Hsl::clamped(hsl.h, hsl.s, hsl.l);
    let h = hsl.h / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Rgb::clamped(
        (r * 255.0).round() as i64,
        (g * 255.0).round() as i64,
        (b * 255.0).round() as i64,
    )
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 1.0 / 2.0 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

/// WCAG relative luminance, 0.0 (black) to 1.0 (white).
pub fn luminance(rgb: Rgb) -> f64 {
    let linear = |c: u8| {
        let v = f64::from(c) / 255.0;
        if v <= 0.03928 {
            v / 12.92
        } else {
            ((v + 0.055) / 1.055).powf(2.4)
        }
    };
    0.2126 * linear(rgb.r) + 0.7152 * linear(rgb.g) + 0.0722 * linear(rgb.b)
}

/// Color of text laid over a swatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TextColor {
    Black,
    White,
}

/// Black text on light backgrounds (luminance above 0.5), white otherwise.
pub fn text_color(rgb: Rgb) -> TextColor {
    if luminance(rgb) > 0.5 {
        TextColor::Black
    } else {
        TextColor::White
    }
}

/// A uniformly random 24-bit color as `#rrggbb`.
pub fn random_hex<R: Rng + ?Sized>(rng: &mut R) -> String {
    let value: u32 = rng.gen_range(0..0x100_0000);
    format!("#{:06x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn hsl(h: f64, s: f64, l: f64) -> Hsl {
        Hsl { h, s, l }
    }

    #[test]
    fn test_hex_to_rgb() {
        assert_eq!(hex_to_rgb("#ff0000"), Ok(Rgb::new(255, 0, 0)));
        assert_eq!(hex_to_rgb("#4F46E5"), Ok(Rgb::new(79, 70, 229)));
    }

    #[test]
    fn test_malformed_hex_rejected() {
        for bad in ["ff0000", "#ff00", "#ff00000", "#gg0000", "", "#"] {
            assert!(hex_to_rgb(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_hex_round_trip_is_exact() {
        for r in (0..=255u8).step_by(15) {
            for g in (0..=255u8).step_by(17) {
                for b in [0u8, 1, 127, 128, 254, 255] {
                    let rgb = Rgb::new(r, g, b);
                    assert_eq!(hex_to_rgb(&rgb_to_hex(rgb)), Ok(rgb));
                }
            }
        }
    }

    #[test]
    fn test_rgb_to_hsl_primaries() {
        assert_eq!(rgb_to_hsl(Rgb::new(255, 0, 0)), hsl(0.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 255, 0)), hsl(120.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(0, 0, 255)), hsl(240.0, 100.0, 50.0));
        assert_eq!(rgb_to_hsl(Rgb::new(255, 255, 255)), hsl(0.0, 0.0, 100.0));
        assert_eq!(rgb_to_hsl(Rgb::new(79, 70, 229)).rounded(), (243, 75, 59));
    }

    #[test]
    fn test_hsl_to_rgb() {
        assert_eq!(hsl_to_rgb(hsl(0.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(hsl(360.0, 100.0, 50.0)), Rgb::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(hsl(0.0, 0.0, 50.0)), Rgb::new(128, 128, 128));
        assert_eq!(hsl_to_rgb(hsl(245.0, 79.0, 59.0)), Rgb::new(82, 68, 233));
    }

    #[test]
    fn test_hsl_round_trip_within_one() {
        let mut worst = 0;
        for r in (0..=255u8).step_by(3) {
            for g in (0..=255u8).step_by(3) {
                for b in (0..=255u8).step_by(3) {
                    let rgb = Rgb::new(r, g, b);
                    let back = hsl_to_rgb(rgb_to_hsl(rgb));
                    for (x, y) in [(rgb.r, back.r), (rgb.g, back.g), (rgb.b, back.b)] {
                        worst = worst.max((i16::from(x) - i16::from(y)).abs());
                    }
                }
            }
        }
        assert!(worst <= 1, "worst drift {worst}");
    }

    #[test]
    fn test_clamping() {
        assert_eq!(Rgb::clamped(-10, 300, 128), Rgb::new(0, 255, 128));
        assert_eq!(Hsl::clamped(400.0, -5.0, 101.0), hsl(360.0, 0.0, 100.0));
        assert_eq!(Hsl::clamped(f64::NAN, 50.0, 50.0), hsl(0.0, 50.0, 50.0));
    }

    #[test]
    fn test_luminance_and_text_color() {
        assert!(luminance(Rgb::new(0, 0, 0)).abs() < 1e-12);
        assert!((luminance(Rgb::new(255, 255, 255)) - 1.0).abs() < 1e-9);
        assert_eq!(text_color(Rgb::new(255, 255, 255)), TextColor::Black);
        assert_eq!(text_color(Rgb::new(255, 255, 0)), TextColor::Black);
        assert_eq!(text_color(Rgb::new(79, 70, 229)), TextColor::White);
        assert_eq!(text_color(Rgb::new(255, 0, 0)), TextColor::White);
    }

    #[test]
    fn test_css_strings() {
        assert_eq!(Rgb::new(1, 2, 3).to_string(), "rgb(1, 2, 3)");
        assert_eq!(hsl(245.4, 78.6, 59.0).to_string(), "hsl(245, 79%, 59%)");
    }

    #[test]
    fn test_random_hex_is_valid() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            let hex = random_hex(&mut rng);
            assert!(is_hex_color(&hex), "{hex}");
        }
    }
}
