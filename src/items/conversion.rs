//! Conversion item representing a finished unit conversion.

use serde::{Deserialize, Serialize};

use crate::converter::{Category, Conversion, ConverterState};
use crate::format::{format_grouped, format_number, parse_number};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConversionItem {
    pub category: Category,
    pub from_unit: String,
    pub to_unit: String,
    pub input: f64,
    pub output: f64,
}

impl ConversionItem {
    /// The converter's current conversion, if it produced a number.
    pub fn from_state(state: &ConverterState) -> Option<Self> {
        let Some(Conversion::Value(output)) = state.output else {
            return None;
        };
        Some(Self {
            category: state.category,
            from_unit: state.from_unit.to_string(),
            to_unit: state.to_unit.to_string(),
            input: parse_number(&state.input),
            output,
        })
    }

    /// One-line summary, e.g. `"1 mile = 1.609344 kilometer"`.
    pub fn summary(&self) -> String {
        format!(
            "{} {} = {} {}",
            format_number(self.input),
            self.from_unit,
            format_grouped(self.output, 10),
            self.to_unit
        )
    }

    pub fn text_for_clipboard(&self) -> String {
        format_number(self.output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_state() {
        let state = ConverterState::new(Category::Temperature, 10).set_input("100");
        let item = ConversionItem::from_state(&state).unwrap();
        assert_eq!(item.from_unit, "celsius");
        assert_eq!(item.to_unit, "fahrenheit");
        assert_eq!(item.output, 212.0);
        assert_eq!(item.summary(), "100 celsius = 212 fahrenheit");
        assert_eq!(item.text_for_clipboard(), "212");
    }

    #[test]
    fn test_no_output_nothing_to_save() {
        let state = ConverterState::default().set_input("");
        assert!(ConversionItem::from_state(&state).is_none());
    }
}
