//! Unit categories and their conversion tables.
//!
//! Each non-temperature category lists its units together with the size of
//! one unit expressed in the category's base unit. The pairwise factor for
//! `from -> to` is the ratio of the two, so every unit in a category has a
//! factor to every other unit (and to itself, exactly 1).

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// A family of mutually convertible units.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Length,
    Mass,
    Volume,
    Temperature,
    Area,
    Time,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown unit category: {0:?}")]
pub struct ParseCategoryError(pub String);

/// Base unit: meter.
const LENGTH: &[(&str, f64)] = &[
    ("meter", 1.0),
    ("kilometer", 1000.0),
    ("centimeter", 0.01),
    ("millimeter", 0.001),
    ("inch", 0.0254),
    ("foot", 0.3048),
    ("yard", 0.9144),
    ("mile", 1609.344),
];

/// Base unit: gram. `ton` is the metric tonne.
const MASS: &[(&str, f64)] = &[
    ("gram", 1.0),
    ("kilogram", 1000.0),
    ("milligram", 0.001),
    ("pound", 453.592_37),
    ("ounce", 28.349_523_125),
    ("ton", 1_000_000.0),
];

/// Base unit: liter. Gallon, quart, pint and cup are US customary.
const VOLUME: &[(&str, f64)] = &[
    ("liter", 1.0),
    ("milliliter", 0.001),
    ("cubic meter", 1000.0),
    ("gallon", 3.785_411_784),
    ("quart", 0.946_352_946),
    ("pint", 0.473_176_473),
    ("cup", 0.236_588_236_5),
];

const TEMPERATURE: &[(&str, f64)] = &[("celsius", 1.0), ("fahrenheit", 1.0), ("kelvin", 1.0)];

/// Base unit: square meter.
const AREA: &[(&str, f64)] = &[
    ("square meter", 1.0),
    ("square kilometer", 1_000_000.0),
    ("square foot", 0.092_903_04),
    ("square mile", 2_589_988.110_336),
    ("acre", 4_046.856_422_4),
    ("hectare", 10_000.0),
];

/// Base unit: second. A month is 730 hours, a year 365 days.
const TIME: &[(&str, f64)] = &[
    ("second", 1.0),
    ("minute", 60.0),
    ("hour", 3_600.0),
    ("day", 86_400.0),
    ("week", 604_800.0),
    ("month", 2_628_000.0),
    ("year", 31_536_000.0),
];

impl Category {
    pub const ALL: [Category; 6] = [
        Self::Length,
        Self::Mass,
        Self::Volume,
        Self::Temperature,
        Self::Area,
        Self::Time,
    ];

    /// Identifier used on the command line and in saved records.
    pub fn id(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Mass => "mass",
            Self::Volume => "volume",
            Self::Temperature => "temperature",
            Self::Area => "area",
            Self::Time => "time",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Length => "Length",
            Self::Mass => "Mass",
            Self::Volume => "Volume",
            Self::Temperature => "Temperature",
            Self::Area => "Area",
            Self::Time => "Time",
        }
    }

    fn table(self) -> &'static [(&'static str, f64)] {
        match self {
            Self::Length => LENGTH,
            Self::Mass => MASS,
            Self::Volume => VOLUME,
            Self::Temperature => TEMPERATURE,
            Self::Area => AREA,
            Self::Time => TIME,
        }
    }

    /// Units of this category in display order.
    pub fn units(self) -> impl ExactSizeIterator<Item = &'static str> {
        self.table().iter().map(|(name, _)| *name)
    }

    /// Whether `unit` (exact name) belongs to this category.
    pub fn contains(self, unit: &str) -> bool {
        self.table().iter().any(|(name, _)| *name == unit)
    }

    /// The first two units, used as from/to when switching category.
    pub fn default_pair(self) -> (&'static str, &'static str) {
        let table = self.table();
        (table[0].0, table[1].0)
    }

    /// Size of one `unit` in the category's base unit.
    fn base_size(self, unit: &str) -> Option<f64> {
        self.table()
            .iter()
            .find(|(name, _)| *name == unit)
            .map(|(_, size)| *size)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.id() == wanted)
            .ok_or_else(|| ParseCategoryError(s.to_string()))
    }
}

/// List the units of a category.
pub fn list_units(category: Category) -> Vec<&'static str> {
    category.units().collect()
}

/// Multiplicative factor from `from` to `to`.
///
/// `None` for temperature (formula based) and for units outside the
/// category.
pub fn factor(category: Category, from: &str, to: &str) -> Option<f64> {
    if category == Category::Temperature {
        return None;
    }
    let from_size = category.base_size(from)?;
    let to_size = category.base_size(to)?;
    Some(from_size / to_size)
}

/// Title-case a unit identifier: `"square meter"` -> `"Square Meter"`.
pub fn display_name(unit: &str) -> String {
    unit.split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Find the unit of `category` the user meant.
///
/// Exact (case-insensitive) names win, then simple plurals, then the best
/// fuzzy match among the category's units.
pub fn resolve_unit(category: Category, query: &str) -> Option<&'static str> {
    let wanted = query.trim().to_lowercase();
    if wanted.is_empty() {
        return None;
    }

    if let Some(unit) = category.units().find(|unit| *unit == wanted) {
        return Some(unit);
    }

    let singular = wanted
        .strip_suffix("es")
        .filter(|s| category.contains(s))
        .or_else(|| wanted.strip_suffix('s'));
    if let Some(unit) = singular.and_then(|s| category.units().find(|unit| *unit == s)) {
        return Some(unit);
    }
    // "feet" is the one irregular plural in the tables
    if wanted == "feet" && category.contains("foot") {
        return Some("foot");
    }

    let matcher = SkimMatcherV2::default();
    let best = category
        .units()
        .filter_map(|unit| matcher.fuzzy_match(unit, &wanted).map(|score| (unit, score)))
        .max_by_key(|(_, score)| *score)
        .map(|(unit, _)| unit);

    debug!(category = %category, query, resolved = ?best, "fuzzy unit lookup");
    best
}
