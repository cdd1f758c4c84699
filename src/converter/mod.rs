//! Unit conversion across six fixed categories.
//!
//! Temperature uses closed-form formulas; every other category multiplies by
//! a factor derived from its unit table.

mod engine;
mod units;

pub use engine::{
    Conversion, ConverterAction, ConverterState, DEFAULT_FRACTION_DIGITS, RECENT_CAPACITY,
    convert, reduce,
};
pub use units::{Category, ParseCategoryError, display_name, factor, list_units, resolve_unit};
