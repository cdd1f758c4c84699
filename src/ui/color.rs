//! Color tool rendering with a truecolor swatch.

use crate::color::{ColorState, ColorValue, TextColor};

/// The hex label printed on the color itself, in whichever of black or white
/// reads better.
pub fn swatch(color: &ColorValue) -> String {
    let (fr, fg, fb) = match color.text_color() {
        TextColor::Black => (0, 0, 0),
        TextColor::White => (255, 255, 255),
    };
    format!(
        "\x1b[48;2;{};{};{}m\x1b[38;2;{};{};{}m   {}   \x1b[0m",
        color.rgb.r, color.rgb.g, color.rgb.b, fr, fg, fb, color.hex
    )
}

pub fn render_color(state: &ColorState, with_swatch: bool) -> String {
    let color = &state.color;
    let mut lines = Vec::new();

    if with_swatch {
        lines.push(swatch(color));
    }
    lines.push(format!("HEX  {}", color.hex));
    lines.push(format!("RGB  {}", color.css_rgb()));
    lines.push(format!("HSL  {}", color.css_hsl()));
    lines.push(format!("Luminance {:.3}", color.luminance()));

    // Accepted edits are stored lowercase, the field keeps what was typed
    if !state.hex_input.eq_ignore_ascii_case(&color.hex) {
        lines.push(format!("(ignored input {:?})", state.hex_input));
    }

    if !state.recent.is_empty() {
        lines.push(String::new());
        lines.push("Recent Colors".to_string());
        lines.extend(state.recent.iter().map(|hex| format!("  {}", hex)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_plain() {
        let state = ColorState::default().edit_hex("#ff0000").save();
        let text = render_color(&state, false);
        assert_eq!(
            text,
            "HEX  #ff0000\nRGB  rgb(255, 0, 0)\nHSL  hsl(0, 100%, 50%)\nLuminance 0.213\n\nRecent Colors\n  #ff0000"
        );
    }

    #[test]
    fn test_rejected_input_noted() {
        let state = ColorState::default().edit_hex("#ff");
        assert!(render_color(&state, false).contains("(ignored input \"#ff\")"));
    }

    #[test]
    fn test_uppercase_hex_is_accepted() {
        let state = ColorState::default().edit_hex("#FF0000");
        let text = render_color(&state, false);
        assert!(text.contains("HEX  #ff0000"));
        assert!(!text.contains("ignored input"));
    }

    #[test]
    fn test_swatch_text_color() {
        let white = ColorValue::from_hex("#ffffff").unwrap();
        assert!(swatch(&white).contains("\x1b[38;2;0;0;0m"));
        let navy = ColorValue::from_hex("#000080").unwrap();
        assert!(swatch(&navy).contains("\x1b[38;2;255;255;255m"));
    }
}
