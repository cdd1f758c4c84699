//! Plain-text rendering of the widgets for the terminal.
//!
//! Each renderer returns a `String` so the shell decides where it goes and
//! tests can inspect it.

mod calculator;
mod color;
mod converter;

pub use calculator::render_calculator;
pub use color::{render_color, swatch};
pub use converter::{render_conversion, render_converter, render_units};

use crate::items::SavedItem;

/// Render a saved item as a two-line listing entry.
/// This is the main dispatch point for item rendering.
pub fn render_item(item: &SavedItem) -> String {
    let mut out = format!(
        "{}  [{}]  {}",
        item.id,
        item.kind(),
        item.created_at.format("%Y-%m-%d %H:%M")
    );
    out.push_str("\n    ");
    out.push_str(&item.payload.name());
    if let Some(description) = item.payload.description() {
        out.push_str("  (");
        out.push_str(&description);
        out.push(')');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::CalculationItem;
    use uuid::Uuid;

    #[test]
    fn test_render_item() {
        let item = SavedItem::new(Uuid::nil(), CalculationItem::new("8 ÷ 0", "NaN"));
        let text = render_item(&item);
        assert!(text.contains("[calculation]"));
        assert!(text.contains("8 ÷ 0 = NaN  (invalid arithmetic)"));
    }
}
