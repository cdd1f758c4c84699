//! Calculator rendering.
//!
//! Shows the running expression as a muted line above the display, the
//! memory indicator when memory is non-zero, and the history underneath.

use crate::calculator::CalculatorState;
use crate::format::format_number;

pub fn render_calculator(state: &CalculatorState) -> String {
    let mut lines = Vec::new();

    if !state.expression.is_empty() {
        lines.push(format!("  {}", state.expression.trim_end()));
    }

    let memory = if state.memory != 0.0 {
        format!("   [M {}]", format_number(state.memory))
    } else {
        String::new()
    };
    lines.push(format!("= {}{}", state.display, memory));

    if !state.history.is_empty() {
        lines.push(String::new());
        lines.push("History".to_string());
        lines.extend(state.history.iter().map(|entry| format!("  {}", entry)));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::{Action, Operator, reduce};

    #[test]
    fn test_pending_expression_shown() {
        let state = [Action::Digit(2), Action::Operator(Operator::Add)]
            .into_iter()
            .fold(CalculatorState::new(), reduce);
        assert_eq!(render_calculator(&state), "  2 +\n= 2");
    }

    #[test]
    fn test_memory_and_history() {
        let state = [
            Action::Digit(2),
            Action::Operator(Operator::Add),
            Action::Digit(3),
            Action::Equals,
            Action::MemoryAdd,
        ]
        .into_iter()
        .fold(CalculatorState::new(), reduce);
        assert_eq!(
            render_calculator(&state),
            "= 5   [M 5]\n\nHistory\n  2 + 3 = 5"
        );
    }
}
