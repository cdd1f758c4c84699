//! Conversion between units and the converter's input state.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::units::{Category, factor};
use crate::format::{format_grouped, format_number, parse_number};
use crate::history::{BoundedHistory, Dedup};

/// Number of conversions kept in the recent list.
pub const RECENT_CAPACITY: usize = 5;

/// Default maximum number of fractional digits in formatted results.
pub const DEFAULT_FRACTION_DIGITS: usize = 10;

/// Outcome of a conversion.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Conversion {
    Value(f64),
    /// No factor or formula exists for the requested pair.
    NotAvailable,
}

impl Conversion {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::NotAvailable => None,
        }
    }

    pub fn is_available(self) -> bool {
        matches!(self, Self::Value(_))
    }
}

/// Convert `value` from one unit to another within `category`.
pub fn convert(category: Category, from: &str, to: &str, value: f64) -> Conversion {
    if category == Category::Temperature {
        return convert_temperature(from, to, value);
    }

    match factor(category, from, to) {
        Some(f) => Conversion::Value(value * f),
        None => Conversion::NotAvailable,
    }
}

fn convert_temperature(from: &str, to: &str, value: f64) -> Conversion {
    let converted = match (from, to) {
        ("celsius", "fahrenheit") => value * 9.0 / 5.0 + 32.0,
        ("fahrenheit", "celsius") => (value - 32.0) * 5.0 / 9.0,
        ("celsius", "kelvin") => value + 273.15,
        ("kelvin", "celsius") => value - 273.15,
        ("fahrenheit", "kelvin") => (value - 32.0) * 5.0 / 9.0 + 273.15,
        ("kelvin", "fahrenheit") => (value - 273.15) * 9.0 / 5.0 + 32.0,
        (a, b) if a == b && Category::Temperature.contains(a) => value,
        _ => return Conversion::NotAvailable,
    };
    Conversion::Value(converted)
}

/// One edit to the converter.
#[derive(Clone, Debug, PartialEq)]
pub enum ConverterAction {
    SetCategory(Category),
    SetFromUnit(String),
    SetToUnit(String),
    SetInput(String),
    /// Exchange the units and carry the last output into the input.
    Swap,
}

/// Everything the converter shows and remembers.
#[derive(Clone, Debug, PartialEq)]
pub struct ConverterState {
    pub category: Category,
    pub from_unit: &'static str,
    pub to_unit: &'static str,
    /// Raw input text as typed.
    pub input: String,
    /// Result of the last run; `None` when the input isn't a number.
    pub output: Option<Conversion>,
    /// Formatted conversions, newest first.
    pub recent: BoundedHistory<String>,
    pub fraction_digits: usize,
}

impl Default for ConverterState {
    fn default() -> Self {
        Self::new(Category::Length, DEFAULT_FRACTION_DIGITS)
    }
}

impl ConverterState {
    /// A converter on `category` with input `1` already converted.
    pub fn new(category: Category, fraction_digits: usize) -> Self {
        let (from_unit, to_unit) = category.default_pair();
        Self {
            category,
            from_unit,
            to_unit,
            input: "1".to_string(),
            output: None,
            recent: BoundedHistory::new(RECENT_CAPACITY, Dedup::AgainstHead),
            fraction_digits,
        }
        .run()
    }

    /// A converter already showing `input` converted from `from` to `to`.
    /// Units outside the category fall back to the default pair.
    pub fn with_units(
        category: Category,
        from: &str,
        to: &str,
        input: impl Into<String>,
        fraction_digits: usize,
    ) -> Self {
        let (default_from, default_to) = category.default_pair();
        let mut state = Self {
            category,
            from_unit: default_from,
            to_unit: default_to,
            input: input.into(),
            output: None,
            recent: BoundedHistory::new(RECENT_CAPACITY, Dedup::AgainstHead),
            fraction_digits,
        };
        state.from_unit = state.member(from).unwrap_or(default_from);
        state.to_unit = state.member(to).unwrap_or(default_to);
        state.run()
    }

    /// Output as shown in the read-only result field.
    pub fn output_text(&self) -> String {
        match self.output {
            Some(Conversion::Value(v)) => format_number(v),
            Some(Conversion::NotAvailable) => "Conversion not available".to_string(),
            None => String::new(),
        }
    }

    /// Trace line for a finished conversion, e.g. `"1 mile = 1.609344 kilometer"`.
    pub fn trace(&self, value: f64) -> String {
        format!(
            "{} {} = {} {}",
            self.input.trim(),
            self.from_unit,
            format_grouped(value, self.fraction_digits),
            self.to_unit
        )
    }

    pub fn set_category(mut self, category: Category) -> Self {
        let (from_unit, to_unit) = category.default_pair();
        self.category = category;
        self.from_unit = from_unit;
        self.to_unit = to_unit;
        self.run()
    }

    pub fn set_from_unit(mut self, unit: &str) -> Self {
        match self.member(unit) {
            Some(unit) => {
                self.from_unit = unit;
                self.run()
            }
            None => self,
        }
    }

    pub fn set_to_unit(mut self, unit: &str) -> Self {
        match self.member(unit) {
            Some(unit) => {
                self.to_unit = unit;
                self.run()
            }
            None => self,
        }
    }

    pub fn set_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self.run()
    }

    pub fn swap(mut self) -> Self {
        std::mem::swap(&mut self.from_unit, &mut self.to_unit);
        self.input = self.output_text();
        self.run()
    }

    /// The category's own `&'static str` for `unit`, if it is a member.
    fn member(&self, unit: &str) -> Option<&'static str> {
        let found = self.category.units().find(|u| *u == unit);
        if found.is_none() {
            warn!(category = %self.category, unit, "unit not in category, ignoring");
        }
        found
    }

    /// Convert the current input and record the trace on success.
    fn run(mut self) -> Self {
        let value = parse_number(&self.input);
        if value.is_nan() {
            self.output = None;
            return self;
        }

        let conversion = convert(self.category, self.from_unit, self.to_unit, value);
        self.output = Some(conversion);

        if let Conversion::Value(result) = conversion {
            let trace = self.trace(result);
            if self.recent.push(trace) {
                debug!(category = %self.category, "recorded conversion");
            }
        }
        self
    }
}

/// Apply one edit to the converter, producing the next state.
pub fn reduce(state: ConverterState, action: ConverterAction) -> ConverterState {
    debug!(?action, "converter transition");
    match action {
        ConverterAction::SetCategory(category) => state.set_category(category),
        ConverterAction::SetFromUnit(unit) => state.set_from_unit(&unit),
        ConverterAction::SetToUnit(unit) => state.set_to_unit(&unit),
        ConverterAction::SetInput(input) => state.set_input(input),
        ConverterAction::Swap => state.swap(),
    }
}
