use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
    str::FromStr,
};

use gagyebu_domain::{CategoryRegistry, EntryKind};
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// User-configurable preferences for the ledger CLI. Every field has a default, so a
/// config file only needs the settings it changes; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "Config::default_currency_suffix")]
    pub currency_suffix: String,
    #[serde(default = "Config::default_grouping_separator")]
    pub grouping_separator: char,
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "Config::default_ledger_name")]
    pub ledger_name: String,
    #[serde(default = "Config::default_ui_color_enabled")]
    pub ui_color_enabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    /// Directory holding `ledgers/`. Defaults to the configuration base directory.
    pub data_dir: Option<PathBuf>,

    #[serde(default)]
    pub categories: CategoryRegistry,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_suffix: Self::default_currency_suffix(),
            grouping_separator: Self::default_grouping_separator(),
            backend: StoreBackend::default(),
            ledger_name: Self::default_ledger_name(),
            ui_color_enabled: Self::default_ui_color_enabled(),
            data_dir: None,
            categories: CategoryRegistry::default(),
        }
    }
}

impl Config {
    pub fn default_currency_suffix() -> String {
        "원".into()
    }

    pub fn default_grouping_separator() -> char {
        ','
    }

    pub fn default_ledger_name() -> String {
        "default".into()
    }

    pub fn default_ui_color_enabled() -> bool {
        true
    }

    pub fn resolve_data_dir(&self, base: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => base.to_path_buf(),
        }
    }

    /// Rejects registries the chart layer cannot color or address unambiguously.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.categories.palette.is_empty() {
            return Err(ConfigError::Invalid(
                "palette must contain at least one color".into(),
            ));
        }
        if self.ledger_name.trim().is_empty() {
            return Err(ConfigError::Invalid("ledger_name must not be empty".into()));
        }
        for kind in EntryKind::ALL {
            let mut seen = HashSet::new();
            for name in self.categories.canonical(kind) {
                if name.trim().is_empty() {
                    return Err(ConfigError::Invalid(format!(
                        "{kind} categories contain an empty name"
                    )));
                }
                if !seen.insert(name.as_str()) {
                    return Err(ConfigError::Invalid(format!(
                        "{kind} category `{name}` is listed twice"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Persistence backend for ledger entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Json,
    Memory,
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StoreBackend::Json => "json",
            StoreBackend::Memory => "memory",
        };
        f.write_str(label)
    }
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(StoreBackend::Json),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::Invalid(format!("unknown backend `{other}`"))),
        }
    }
}
