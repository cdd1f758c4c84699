//! Calculation item representing a finished calculator expression.

use serde::{Deserialize, Serialize};

use crate::calculator::CalculatorState;

/// A finished calculation worth keeping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CalculationItem {
    /// The expression as entered, e.g. `"2 + 3"`.
    pub expression: String,
    /// The result as displayed.
    pub result: String,
    /// Whether the result is the not-a-number sentinel or an overflow.
    pub is_error: bool,
}

impl CalculationItem {
    pub fn new(expression: impl Into<String>, result: impl Into<String>) -> Self {
        let result = result.into();
        let is_error = matches!(result.as_str(), "NaN" | "Infinity" | "-Infinity");
        Self {
            expression: expression.into(),
            result,
            is_error,
        }
    }

    /// The most recent calculation in the calculator's history.
    pub fn from_state(state: &CalculatorState) -> Option<Self> {
        state
            .last_calculation()
            .map(|(expression, result)| Self::new(expression, result))
    }

    /// Text to copy to the clipboard: the raw result.
    pub fn text_for_clipboard(&self) -> &str {
        &self.result
    }
}
