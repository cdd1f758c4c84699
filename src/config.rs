//! User configuration, read from `config.toml`.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::color::INITIAL_COLOR;
use crate::converter::{Category, ConverterState, DEFAULT_FRACTION_DIGITS};

const APP_DIR: &str = "toolbelt";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Which record store backs saved items and profiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreKind {
    #[default]
    File,
    Memory,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where the file store and the session live.
    pub data_dir: PathBuf,
    pub store: StoreKind,
    pub default_category: Category,
    pub initial_color: String,
    /// Maximum fractional digits in formatted conversion results.
    pub fraction_digits: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store: StoreKind::default(),
            default_category: Category::Length,
            initial_color: INITIAL_COLOR.to_string(),
            fraction_digits: DEFAULT_FRACTION_DIGITS,
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join(APP_DIR)
}

/// `$XDG_CONFIG_HOME/toolbelt/config.toml` or the platform equivalent.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

impl Config {
    /// Parse a config from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> Result<Self, ConfigError> {
        let mut config: Config = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.fraction_digits = config.fraction_digits.min(15);
        Ok(config)
    }

    /// Load from `path`, or from the default location when `None`.
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
            return Ok(Self::default());
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => {
                debug!(path = %path.display(), "loading config");
                Self::from_toml(&text, &path)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Io { path, source }),
        }
    }

    pub fn session_path(&self) -> PathBuf {
        self.data_dir.join("session.json")
    }

    /// The category to convert in when none is asked for.
    pub fn converter_category(&self, requested: Option<Category>) -> Category {
        requested.unwrap_or(self.default_category)
    }

    /// The converter as it starts: default category, its first two units.
    pub fn converter(&self) -> ConverterState {
        ConverterState::new(self.default_category, self.fraction_digits)
    }
}
