//! Color item representing a saved color.

use serde::{Deserialize, Serialize};

use crate::color::{ColorValue, Hsl, Rgb};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorItem {
    pub hex: String,
    pub rgb: Rgb,
    pub hsl: Hsl,
}

impl From<&ColorValue> for ColorItem {
    fn from(color: &ColorValue) -> Self {
        Self {
            hex: color.hex.clone(),
            rgb: color.rgb,
            hsl: color.hsl,
        }
    }
}

impl ColorItem {
    pub fn description(&self) -> String {
        format!("{} · {}", self.rgb, self.hsl)
    }
}
