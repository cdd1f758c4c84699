//! The color tool's state: one color in three coordinate systems.
//!
//! Whichever representation was edited is the source of truth for that edit;
//! the other two are recomputed from it, never stored independently.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::convert::{
    HexError, Hsl, Rgb, TextColor, hex_to_rgb, hsl_to_rgb, luminance, random_hex, rgb_to_hex,
    rgb_to_hsl, text_color,
};
use crate::history::{BoundedHistory, Dedup};

/// Number of saved colors kept in the recent list.
pub const RECENT_COLORS_CAPACITY: usize = 10;

/// Longest text the hex field accepts.
const HEX_FIELD_MAX_LEN: usize = 7;

/// The color the tool starts from.
pub const INITIAL_COLOR: &str = "#4f46e5";

/// A color in hex, RGB and HSL at once, all describing the same value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorValue {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
}

impl ColorValue {
    /// From a `#rrggbb` string. Malformed input is rejected.
    pub fn from_hex(hex: &str) -> Result<Self, HexError> {
        let rgb = hex_to_rgb(hex)?;
        Ok(Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsl: rgb_to_hsl(rgb),
        })
    }

    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsl: rgb_to_hsl(rgb),
        }
    }

    /// From HSL, clamped first. The given HSL is kept as-is.
    pub fn from_hsl(hsl: Hsl) -> Self {
        let hsl = Hsl::clamped(hsl.h, hsl.s, hsl.l);
        let rgb = hsl_to_rgb(hsl);
        Self {
            hex: rgb_to_hex(rgb),
            rgb,
            hsl,
        }
    }

    pub fn random() -> Self {
        Self::random_with(&mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let hex = random_hex(rng);
        // random_hex always yields a well-formed #rrggbb
        Self::from_hex(&hex).unwrap_or_default()
    }

    pub fn luminance(&self) -> f64 {
        luminance(self.rgb)
    }

    /// Black or white, whichever reads better on top of this color.
    pub fn text_color(&self) -> TextColor {
        text_color(self.rgb)
    }

    /// `rgb(r, g, b)`.
    pub fn css_rgb(&self) -> String {
        self.rgb.to_string()
    }

    /// `hsl(h, s%, l%)` with whole-number components.
    pub fn css_hsl(&self) -> String {
        self.hsl.to_string()
    }
}

impl Default for ColorValue {
    fn default() -> Self {
        Self::from_rgb(Rgb::default())
    }
}

/// Relative luminance of a color.
pub fn luminance_of(color: &ColorValue) -> f64 {
    color.luminance()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RgbChannel {
    Red,
    Green,
    Blue,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HslComponent {
    Hue,
    Saturation,
    Lightness,
}

/// One edit to the color tool.
#[derive(Clone, Debug, PartialEq)]
pub enum ColorAction {
    /// Text typed into the hex field.
    EditHex(String),
    SetRgb(i64, i64, i64),
    SetRgbChannel(RgbChannel, i64),
    SetHsl(f64, f64, f64),
    SetHslComponent(HslComponent, f64),
    Random,
    /// Remember the current color in the recent list.
    Save,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ColorState {
    pub color: ColorValue,
    /// Raw contents of the hex field; may be half-typed and invalid.
    pub hex_input: String,
    /// Saved hex colors, newest first, no duplicates.
    pub recent: BoundedHistory<String>,
}

impl Default for ColorState {
    fn default() -> Self {
        let color = ColorValue::from_hex(INITIAL_COLOR).unwrap_or_default();
        Self::new(color)
    }
}

impl ColorState {
    pub fn new(color: ColorValue) -> Self {
        Self {
            hex_input: color.hex.clone(),
            color,
            recent: BoundedHistory::new(RECENT_COLORS_CAPACITY, Dedup::Anywhere),
        }
    }

    /// Take text from the hex field. A complete valid color replaces the
    /// current one; anything else only updates the field.
    pub fn edit_hex(mut self, text: &str) -> Self {
        if text.chars().count() > HEX_FIELD_MAX_LEN {
            return self;
        }
        self.hex_input = text.to_string();

        match ColorValue::from_hex(text) {
            Ok(color) => self.color = color,
            Err(err) => {
                if text.chars().count() == HEX_FIELD_MAX_LEN {
                    warn!(%err, "rejected hex edit");
                }
            }
        }
        self
    }

    pub fn set_rgb(self, r: i64, g: i64, b: i64) -> Self {
        self.replace(ColorValue::from_rgb(Rgb::clamped(r, g, b)))
    }

    pub fn set_rgb_channel(self, channel: RgbChannel, value: i64) -> Self {
        let Rgb { r, g, b } = self.color.rgb;
        let (r, g, b) = (i64::from(r), i64::from(g), i64::from(b));
        match channel {
            RgbChannel::Red => self.set_rgb(value, g, b),
            RgbChannel::Green => self.set_rgb(r, value, b),
            RgbChannel::Blue => self.set_rgb(r, g, value),
        }
    }

    pub fn set_hsl(self, h: f64, s: f64, l: f64) -> Self {
        self.replace(ColorValue::from_hsl(Hsl::clamped(h, s, l)))
    }

    pub fn set_hsl_component(self, component: HslComponent, value: f64) -> Self {
        let Hsl { h, s, l } = self.color.hsl;
        match component {
            HslComponent::Hue => self.set_hsl(value, s, l),
            HslComponent::Saturation => self.set_hsl(h, value, l),
            HslComponent::Lightness => self.set_hsl(h, s, value),
        }
    }

    pub fn randomize<R: Rng + ?Sized>(self, rng: &mut R) -> Self {
        self.replace(ColorValue::random_with(rng))
    }

    /// Push the current hex to the recent list unless it is already there.
    pub fn save(mut self) -> Self {
        if !self.recent.push(self.color.hex.clone()) {
            debug!(hex = %self.color.hex, "color already saved");
        }
        self
    }

    fn replace(mut self, color: ColorValue) -> Self {
        self.hex_input = color.hex.clone();
        self.color = color;
        self
    }
}

/// Apply one edit, producing the next state.
pub fn reduce(state: ColorState, action: ColorAction) -> ColorState {
    reduce_with(state, action, &mut rand::thread_rng())
}

/// Like [`reduce`], drawing random colors from `rng`.
pub fn reduce_with<R: Rng + ?Sized>(
    state: ColorState,
    action: ColorAction,
    rng: &mut R,
) -> ColorState {
    debug!(?action, "color transition");
    match action {
        ColorAction::EditHex(text) => state.edit_hex(&text),
        ColorAction::SetRgb(r, g, b) => state.set_rgb(r, g, b),
        ColorAction::SetRgbChannel(channel, value) => state.set_rgb_channel(channel, value),
        ColorAction::SetHsl(h, s, l) => state.set_hsl(h, s, l),
        ColorAction::SetHslComponent(component, value) => {
            state.set_hsl_component(component, value)
        }
        ColorAction::Random => state.randomize(rng),
        ColorAction::Save => state.save(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_from_hex_red() {
        let color = ColorValue::from_hex("#ff0000").unwrap();
        assert_eq!(color.rgb, Rgb::new(255, 0, 0));
        assert_eq!(color.hsl.rounded(), (0, 100, 50));
        assert_eq!(color.css_hsl(), "hsl(0, 100%, 50%)");
    }

    #[test]
    fn test_from_hex_normalizes_case() {
        let color = ColorValue::from_hex("#4F46E5").unwrap();
        assert_eq!(color.hex, "#4f46e5");
        assert_eq!(color.css_rgb(), "rgb(79, 70, 229)");
    }

    #[test]
    fn test_default_state() {
        let state = ColorState::default();
        assert_eq!(state.color.hex, INITIAL_COLOR);
        assert_eq!(state.hex_input, INITIAL_COLOR);
        assert!(state.recent.is_empty());
    }

    #[test]
    fn test_malformed_hex_leaves_color_alone() {
        let state = ColorState::default().edit_hex("#12");
        assert_eq!(state.hex_input, "#12");
        assert_eq!(state.color.hex, INITIAL_COLOR);

        let state = state.edit_hex("#zzzzzz");
        assert_eq!(state.color.hex, INITIAL_COLOR);
    }

    #[test]
    fn test_overlong_hex_ignored() {
        let state = ColorState::default().edit_hex("#1234567");
        assert_eq!(state.hex_input, INITIAL_COLOR);
    }

    #[test]
    fn test_valid_hex_edit_updates_everything() {
        let state = ColorState::default().edit_hex("#00ff00");
        assert_eq!(state.color.rgb, Rgb::new(0, 255, 0));
        assert_eq!(state.color.hsl.rounded(), (120, 100, 50));
    }

    #[test]
    fn test_rgb_edit_clamps_and_rederives() {
        let state = ColorState::default().set_rgb(300, -4, 0);
        assert_eq!(state.color.rgb, Rgb::new(255, 0, 0));
        assert_eq!(state.color.hex, "#ff0000");
        assert_eq!(state.hex_input, "#ff0000");
        assert_eq!(state.color.hsl.rounded(), (0, 100, 50));
    }

    #[test]
    fn test_single_channel_edit() {
        let state = ColorState::default()
            .set_rgb(0, 0, 0)
            .set_rgb_channel(RgbChannel::Blue, 255);
        assert_eq!(state.color.hex, "#0000ff");
    }

    #[test]
    fn test_hsl_edit_keeps_hsl_as_source() {
        let state = ColorState::default().set_hsl(120.0, 100.0, 25.0);
        assert_eq!(state.color.rgb, Rgb::new(0, 128, 0));
        assert_eq!(state.color.hsl.rounded(), (120, 100, 25));

        let state = state.set_hsl_component(HslComponent::Lightness, 150.0);
        assert_eq!(state.color.hsl.l, 100.0);
        assert_eq!(state.color.hex, "#ffffff");
    }

    #[test]
    fn test_save_dedups_anywhere() {
        let state = ColorState::default()
            .save()
            .edit_hex("#ff0000")
            .save()
            .edit_hex("#4f46e5")
            .save();
        assert_eq!(
            state.recent.as_slice(),
            &["#ff0000".to_string(), "#4f46e5".to_string()]
        );
    }

    #[test]
    fn test_recent_colors_capped() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut state = ColorState::default();
        for _ in 0..30 {
            state = reduce_with(state, ColorAction::Random, &mut rng);
            state = reduce_with(state, ColorAction::Save, &mut rng);
        }
        assert!(state.recent.len() <= RECENT_COLORS_CAPACITY);
        assert_eq!(state.recent.latest(), Some(&state.color.hex));
    }

    #[test]
    fn test_random_is_consistent() {
        let mut rng = StdRng::seed_from_u64(1);
        let color = ColorValue::random_with(&mut rng);
        assert_eq!(ColorValue::from_hex(&color.hex).unwrap(), color);
    }

    #[test]
    fn test_luminance_of() {
        let white = ColorValue::from_hex("#ffffff").unwrap();
        assert!((luminance_of(&white) - 1.0).abs() < 1e-9);
        assert_eq!(white.text_color(), TextColor::Black);
        assert_eq!(ColorState::default().color.text_color(), TextColor::White);
    }
}
