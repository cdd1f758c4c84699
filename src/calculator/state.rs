//! The calculator's input state machine.
//!
//! Evaluation is strictly left to right: each operator press resolves the
//! pending one against the current display, so `2 + 3 × 4` is `20`.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use super::keys::ParseKeyError;
use crate::format::{format_number, parse_number};
use crate::history::{BoundedHistory, Dedup};

/// Number of finished expressions kept in the history.
pub const HISTORY_CAPACITY: usize = 10;

/// A binary operator button.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// The symbol shown on the button and in the expression trace.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
        }
    }

    /// Apply the operator. Division by zero yields `NaN`.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Subtract => lhs - rhs,
            Self::Multiply => lhs * rhs,
            Self::Divide => {
                if rhs != 0.0 {
                    lhs / rhs
                } else {
                    f64::NAN
                }
            }
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Add),
            "-" | "−" => Ok(Self::Subtract),
            "×" | "x" | "X" | "*" => Ok(Self::Multiply),
            "÷" | "/" => Ok(Self::Divide),
            other => Err(ParseKeyError::Unknown(other.to_string())),
        }
    }
}

/// One button press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    Digit(u8),
    Decimal,
    Operator(Operator),
    Equals,
    Clear,
    Negate,
    Percent,
    MemoryAdd,
    MemorySubtract,
    MemoryRecall,
    MemoryClear,
}

/// Everything the calculator shows and remembers.
#[derive(Clone, Debug, PartialEq)]
pub struct CalculatorState {
    /// The number being entered or the last result, as shown.
    pub display: String,
    /// Left operand of the running computation.
    pub result: Option<f64>,
    /// Set only while a binary operation waits for its right operand.
    pub pending_operator: Option<Operator>,
    /// The next digit starts a fresh number.
    pub awaiting_operand: bool,
    /// Survives `clear`.
    pub memory: f64,
    /// Human-readable trace of the running computation, e.g. `"2 + "`.
    pub expression: String,
    /// Finished expressions, newest first.
    pub history: BoundedHistory<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorState {
    pub fn new() -> Self {
        Self {
            display: "0".to_string(),
            result: None,
            pending_operator: None,
            awaiting_operand: false,
            memory: 0.0,
            expression: String::new(),
            history: BoundedHistory::new(HISTORY_CAPACITY, Dedup::Never),
        }
    }

    /// Current display parsed as a number (`NaN` if it isn't one).
    pub fn display_value(&self) -> f64 {
        parse_number(&self.display)
    }

    pub fn input_digit(mut self, digit: u8) -> Self {
        if digit > 9 {
            debug!(digit, "ignoring out-of-range digit");
            return self;
        }
        let digit = char::from(b'0' + digit);

        if self.awaiting_operand {
            self.display = digit.to_string();
            self.awaiting_operand = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }

        // Typing after a finished calculation starts over
        if self.result.is_some() && self.pending_operator.is_none() {
            self.result = None;
            self.expression.clear();
        }

        self
    }

    pub fn input_decimal(mut self) -> Self {
        if self.awaiting_operand {
            self.display = "0.".to_string();
            self.awaiting_operand = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
        self
    }

    pub fn apply_operator(mut self, op: Operator) -> Self {
        let input = self.display_value();

        match (self.result, self.pending_operator) {
            (None, _) => {
                self.result = Some(input);
                self.expression = format!("{} {} ", self.display, op);
            }
            (Some(result), Some(pending)) => {
                let value = pending.apply(result, input);
                self.result = Some(value);
                self.expression = format!("{} {} ", format_number(value), op);
            }
            (Some(result), None) => {
                self.expression = format!("{} {} ", format_number(result), op);
            }
        }

        self.pending_operator = Some(op);
        self.awaiting_operand = true;
        self
    }

    pub fn equals(mut self) -> Self {
        let (Some(result), Some(pending)) = (self.result, self.pending_operator) else {
            return self;
        };

        let value = pending.apply(result, self.display_value());
        let shown = format_number(value);
        let entry = format!("{}{} = {}", self.expression, self.display, shown);
        debug!(%entry, "calculation finished");

        self.history.push(entry);
        self.display = shown;
        self.result = Some(value);
        self.pending_operator = None;
        self.awaiting_operand = true;
        self.expression.clear();
        self
    }

    /// Reset entry state. Memory and history are kept.
    pub fn clear(self) -> Self {
        Self {
            memory: self.memory,
            history: self.history,
            ..Self::new()
        }
    }

    pub fn negate(mut self) -> Self {
        self.display = format_number(-self.display_value());
        self
    }

    /// Divide the display by 100 in place.
    pub fn percent(mut self) -> Self {
        self.display = format_number(self.display_value() / 100.0);
        self
    }

    pub fn memory_add(mut self) -> Self {
        self.memory += self.display_value();
        self
    }

    pub fn memory_subtract(mut self) -> Self {
        self.memory -= self.display_value();
        self
    }

    pub fn memory_recall(mut self) -> Self {
        self.display = format_number(self.memory);
        self
    }

    pub fn memory_clear(mut self) -> Self {
        self.memory = 0.0;
        self
    }

    /// The latest finished calculation split into expression and result.
    pub fn last_calculation(&self) -> Option<(&str, &str)> {
        self.history
            .latest()
            .and_then(|entry| entry.rsplit_once(" = "))
    }
}

/// Apply one action to a state, producing the next state.
pub fn reduce(state: CalculatorState, action: Action) -> CalculatorState {
    let next = match action {
        Action::Digit(d) => state.input_digit(d),
        Action::Decimal => state.input_decimal(),
        Action::Operator(op) => state.apply_operator(op),
        Action::Equals => state.equals(),
        Action::Clear => state.clear(),
        Action::Negate => state.negate(),
        Action::Percent => state.percent(),
        Action::MemoryAdd => state.memory_add(),
        Action::MemorySubtract => state.memory_subtract(),
        Action::MemoryRecall => state.memory_recall(),
        Action::MemoryClear => state.memory_clear(),
    };
    debug!(
        ?action,
        display = %next.display,
        expression = %next.expression,
        "calculator transition"
    );
    next
}
