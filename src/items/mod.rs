mod calculation;
mod color;
mod conversion;
mod profile;

pub use calculation::CalculationItem;
pub use color::ColorItem;
pub use conversion::ConversionItem;
pub use profile::Profile;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Which widget a saved item came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemKind {
    Calculation,
    Conversion,
    Color,
}

impl ItemKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Calculation => "calculation",
            Self::Conversion => "conversion",
            Self::Color => "color",
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown item kind: {0:?} (expected calculation, conversion or color)")]
pub struct ParseItemKindError(pub String);

impl FromStr for ItemKind {
    type Err = ParseItemKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "calculation" | "calc" => Ok(Self::Calculation),
            "conversion" | "convert" => Ok(Self::Conversion),
            "color" | "colour" => Ok(Self::Color),
            _ => Err(ParseItemKindError(s.to_string())),
        }
    }
}

/// The data of a saved item, tagged by the widget it came from.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "item_type", content = "data", rename_all = "lowercase")]
pub enum ItemPayload {
    Calculation(CalculationItem),
    Conversion(ConversionItem),
    Color(ColorItem),
}

impl ItemPayload {
    pub fn kind(&self) -> ItemKind {
        match self {
            Self::Calculation(_) => ItemKind::Calculation,
            Self::Conversion(_) => ItemKind::Conversion,
            Self::Color(_) => ItemKind::Color,
        }
    }

    /// Title line for listings.
    pub fn name(&self) -> String {
        match self {
            Self::Calculation(calc) => format!("{} = {}", calc.expression, calc.result),
            Self::Conversion(conv) => conv.summary(),
            Self::Color(color) => color.hex.clone(),
        }
    }

    /// Secondary line for listings.
    pub fn description(&self) -> Option<String> {
        match self {
            Self::Calculation(calc) if calc.is_error => Some("invalid arithmetic".to_string()),
            Self::Calculation(_) => None,
            Self::Conversion(conv) => Some(conv.category.label().to_string()),
            Self::Color(color) => Some(color.description()),
        }
    }

    /// What `--copy` puts on the clipboard.
    pub fn text_for_clipboard(&self) -> String {
        match self {
            Self::Calculation(calc) => calc.text_for_clipboard().to_string(),
            Self::Conversion(conv) => conv.text_for_clipboard(),
            Self::Color(color) => color.hex.clone(),
        }
    }
}

// Convenient From implementations

impl From<CalculationItem> for ItemPayload {
    fn from(item: CalculationItem) -> Self {
        Self::Calculation(item)
    }
}

impl From<ConversionItem> for ItemPayload {
    fn from(item: ConversionItem) -> Self {
        Self::Conversion(item)
    }
}

impl From<ColorItem> for ItemPayload {
    fn from(item: ColorItem) -> Self {
        Self::Color(item)
    }
}

/// A payload stored on behalf of a user.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SavedItem {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(flatten)]
    pub payload: ItemPayload,
    pub created_at: DateTime<Utc>,
}

impl SavedItem {
    /// A fresh item with a new id, stamped now.
    pub fn new(user_id: Uuid, payload: impl Into<ItemPayload>) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            payload: payload.into(),
            created_at: Utc::now(),
        }
    }

    pub fn kind(&self) -> ItemKind {
        self.payload.kind()
    }
}
