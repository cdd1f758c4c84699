//! Four-function calculator with memory and a bounded history.
//!
//! This module provides:
//! - A state record and a pure `reduce(state, action)` transition function
//! - Parsing of keypad labels into actions

mod keys;
mod state;

pub use keys::{ParseKeyError, parse_keys};
pub use state::{Action, CalculatorState, HISTORY_CAPACITY, Operator, reduce};
