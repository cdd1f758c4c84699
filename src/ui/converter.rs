//! Unit converter rendering.

use crate::converter::{Category, ConverterState, display_name};

/// The current conversion on one line.
pub fn render_conversion(state: &ConverterState) -> String {
    format!(
        "{}: {} {} = {} {}",
        state.category.label(),
        state.input.trim(),
        display_name(state.from_unit),
        state.output_text(),
        display_name(state.to_unit),
    )
}

/// The current conversion followed by the recent list.
pub fn render_converter(state: &ConverterState) -> String {
    let mut out = render_conversion(state);

    if !state.recent.is_empty() {
        out.push_str("\n\nRecent Conversions");
        for entry in state.recent.iter() {
            out.push_str("\n  ");
            out.push_str(entry);
        }
    }
    out
}

/// One line per unit, marking the category's default pair.
pub fn render_units(category: Category) -> String {
    let (from, to) = category.default_pair();
    category
        .units()
        .map(|unit| {
            let marker = if unit == from || unit == to { "*" } else { " " };
            format!("{} {:<18} {}", marker, unit, display_name(unit))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_converter() {
        let state = ConverterState::new(Category::Temperature, 10).set_input("100");
        let text = render_converter(&state);
        assert!(text.starts_with("Temperature: 100 Celsius = 212 Fahrenheit"));
        assert!(text.contains("Recent Conversions\n  100 celsius = 212 fahrenheit"));
    }

    #[test]
    fn test_render_not_available_text() {
        let mut state = ConverterState::default();
        state.output = Some(crate::converter::Conversion::NotAvailable);
        assert!(render_converter(&state).contains("= Conversion not available"));
    }

    #[test]
    fn test_render_units() {
        let text = render_units(Category::Temperature);
        assert_eq!(text.lines().count(), 3);
        assert!(text.lines().next().unwrap().starts_with("* celsius"));
        assert!(text.lines().last().unwrap().starts_with("  kelvin"));
    }
}
