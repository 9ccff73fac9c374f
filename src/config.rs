use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;

use crate::error::Result;
use crate::parser::ParseOptions;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub parser: ParseOptions,
    pub page: PageConfig,
    pub font: FontConfig,
    pub table: TableConfig,
    pub spacing: SpacingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct PageConfig {
    pub paper: String,
    pub numbers: bool,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            paper: "a4".to_string(),
            numbers: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct FontConfig {
    pub family: String,
    /// Typst length, e.g. `11pt`
    pub size: String,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "Libertinus Serif".to_string(),
            size: "11pt".to_string(),
        }
    }
}

/// Table colors as Typst color literals (`#rrggbb`). `None` leaves cells unfilled.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub header_fill: Option<String>,
    pub stripe_fill: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpacingConfig {
    /// Vertical gap emitted for a spacer block.
    pub spacer: String,
}

impl Default for SpacingConfig {
    fn default() -> Self {
        Self {
            spacer: "0.6em".to_string(),
        }
    }
}

impl Config {
    /// The config bundled with the crate, checked by the build script.
    pub fn compiled_default() -> Self {
        toml::from_str(DEFAULT_CONFIG).unwrap_or_else(|e| {
            warn!("bundled config did not parse ({e}), using built-in defaults");
            Self::default()
        })
    }

    /// Parse config from TOML text. Missing keys fall back to defaults.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Load config from a TOML file, or return the bundled default if it does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        match fs::read_to_string(path) {
            Ok(content) => {
                debug!("loading config from {}", path.display());
                Self::from_toml(&content)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no config at {}, using defaults", path.display());
                Ok(Self::compiled_default())
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::table::SeparatorPolicy;
    use pretty_assertions::assert_eq;

    #[test]
    fn bundled_default_parses() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.parser, ParseOptions::default());
        assert_eq!(config.page, PageConfig::default());
        assert_eq!(config.table.header_fill.as_deref(), Some("#f3e8ff"));
        assert_eq!(config.spacing.spacer, "0.6em");
    }

    #[test]
    fn bundled_default_sets_every_section() {
        let table: toml::Table = toml::from_str(DEFAULT_CONFIG).unwrap();
        let mut sections: Vec<&str> = table.keys().map(String::as_str).collect();
        sections.sort_unstable();
        assert_eq!(sections, vec!["font", "page", "parser", "spacing", "table"]);
    }

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_toml(
            "[parser]\nspacers = true\ntable_separator = \"detect\"\n[font]\nsize = \"10pt\"\n",
        )
        .unwrap();
        assert!(config.parser.spacers);
        assert_eq!(config.parser.table_separator, SeparatorPolicy::Detect);
        assert_eq!(config.font.size, "10pt");
        assert_eq!(config.font.family, "Libertinus Serif");
        assert!(config.page.numbers);
    }

    #[test]
    fn invalid_config_is_an_error() {
        let err = Config::from_toml("[parser]\ntable_separator = \"sometimes\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn missing_file_uses_bundled_default() {
        let config = Config::load(Path::new("/nonexistent/reportdoc.toml")).unwrap();
        assert_eq!(config, Config::compiled_default());
    }
}
