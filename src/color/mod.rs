//! Color format conversion between hex, RGB and HSL.

mod convert;
mod state;

pub use convert::{
    HexError, Hsl, Rgb, TextColor, hex_to_rgb, hsl_to_rgb, is_hex_color, luminance, random_hex,
    rgb_to_hex, rgb_to_hsl, text_color,
};
pub use state::{
    ColorAction, ColorState, ColorValue, HslComponent, INITIAL_COLOR, RECENT_COLORS_CAPACITY,
    RgbChannel, luminance_of, reduce, reduce_with,
};

/// Parse, clamp and re-derive from a hex string.
pub fn from_hex(hex: &str) -> Result<ColorValue, HexError> {
    ColorValue::from_hex(hex)
}

pub fn from_rgb(r: i64, g: i64, b: i64) -> ColorValue {
    ColorValue::from_rgb(Rgb::clamped(r, g, b))
}

pub fn from_hsl(h: f64, s: f64, l: f64) -> ColorValue {
    ColorValue::from_hsl(Hsl::clamped(h, s, l))
}

pub fn random_color() -> ColorValue {
    ColorValue::random()
}
