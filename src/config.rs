//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/aidtree/aidtree.toml`
//! 3. Local config: `<dir>/.aidtree.toml` (working directory unless `-C` is given)
//! 4. Environment variables: `AIDTREE_*` prefix

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::format::OutputFormat;
use crate::application::ApplicationError;

/// Text shown by the standard leaf views.
///
/// Defaults are English; a deployment can restore the Turkish
/// wording through the `[labels]` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Labels {
    pub name: String,
    pub phone: String,
    pub status: String,
    pub source: String,
    pub location: String,
    pub link: String,
    pub source_or_map: String,
    pub verified: String,
    pub unverified: String,
    pub branch: String,
    pub owner: String,
    pub local_currency: String,
    pub eur: String,
    pub usd: String,
    pub gbp: String,
    pub swift: String,
    pub donate: String,
    pub sms: String,
    pub number: String,
    pub amount: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            name: "Name".into(),
            phone: "Phone".into(),
            status: "Status".into(),
            source: "Source".into(),
            location: "Location".into(),
            link: "Link".into(),
            source_or_map: "Source/Map".into(),
            verified: "Verified".into(),
            unverified: "Unverified".into(),
            branch: "Branch".into(),
            owner: "Account owner".into(),
            local_currency: "TL".into(),
            eur: "EUR".into(),
            usd: "USD".into(),
            gbp: "GBP".into(),
            swift: "SWIFT".into(),
            donate: "Donate".into(),
            sms: "SMS".into(),
            number: "Number".into(),
            amount: "Amount".into(),
        }
    }
}

impl Labels {
    /// Replace the labels named in `overlay`, keep the others.
    fn merge(&self, overlay: &toml::Table) -> Result<Self, ApplicationError> {
        let mut value = toml::Value::try_from(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize labels: {e}"),
        })?;
        if let toml::Value::Table(table) = &mut value {
            for (key, label) in overlay {
                table.insert(key.clone(), label.clone());
            }
        }
        value.try_into().map_err(|e| ApplicationError::Config {
            message: format!("labels: {e}"),
        })
    }
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub format: Option<OutputFormat>,
    pub width: Option<usize>,
    pub color: Option<bool>,
    pub warn_unknown_tags: Option<bool>,
    pub labels: Option<toml::Table>,
}

/// Unified configuration for aidtree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Output format when `--format` is not given
    pub format: OutputFormat,
    /// Line width used to center terminal output
    pub width: usize,
    /// Colorize terminal output
    pub color: bool,
    /// Warn when a data leaf carries a tag no view is registered for
    pub warn_unknown_tags: bool,
    /// View labels
    pub labels: Labels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            width: 80,
            color: true,
            warn_unknown_tags: true,
            labels: Labels::default(),
        }
    }
}

/// Get the XDG config directory for aidtree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "aidtree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("aidtree.toml"))
}

/// Get the path to the local config file in a directory.
pub fn local_config_path(dir: &Path) -> PathBuf {
    dir.join(".aidtree.toml")
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Merge overlay config onto self (base). Options that are `Some` win.
    fn merge_with(&self, overlay: &RawSettings) -> Result<Self, ApplicationError> {
        let labels = match &overlay.labels {
            Some(table) => self.labels.merge(table)?,
            None => self.labels.clone(),
        };
        Ok(Self {
            format: overlay.format.unwrap_or(self.format),
            width: overlay.width.unwrap_or(self.width),
            color: overlay.color.unwrap_or(self.color),
            warn_unknown_tags: overlay.warn_unknown_tags.unwrap_or(self.warn_unknown_tags),
            labels,
        })
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `local_dir` - Optional directory holding a `.aidtree.toml`
    ///
    /// # Precedence (lowest to highest)
    /// 1. Compiled defaults
    /// 2. Global config: `$XDG_CONFIG_HOME/aidtree/aidtree.toml`
    /// 3. Local config: `<local_dir>/.aidtree.toml`
    /// 4. Environment variables: `AIDTREE_*` prefix
    pub fn load(local_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                let raw = load_raw_settings(&global_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        if let Some(dir) = local_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                let raw = load_raw_settings(&local_path)?;
                current = current.merge_with(&raw)?;
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply AIDTREE_* environment variables as explicit overrides.
    ///
    /// Labels use a double underscore: `AIDTREE_LABELS__VERIFIED=Doğrulanmış`.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("AIDTREE").separator("__"))
            .build()
            .map_err(config_err)?;
        Self::apply_overrides(settings, &config)
    }

    /// Apply the keys present in `config`; a present but unparsable value is
    /// a config error.
    fn apply_overrides(mut settings: Self, config: &Config) -> Result<Self, ApplicationError> {
        if let Ok(val) = config.get_string("format") {
            settings.format = val.parse().map_err(|message| ApplicationError::Config {
                message: format!("AIDTREE_FORMAT: {message}"),
            })?;
        }
        if let Ok(val) = config.get_string("width") {
            settings.width = match val.trim().parse::<usize>() {
                Ok(width) if width > 0 => width,
                _ => {
                    return Err(ApplicationError::Config {
                        message: format!("AIDTREE_WIDTH: invalid width {val:?}"),
                    })
                }
            };
        }
        if let Ok(val) = config.get_string("color") {
            settings.color = parse_flag("AIDTREE_COLOR", &val)?;
        }
        if let Ok(val) = config.get_string("warn_unknown_tags") {
            settings.warn_unknown_tags = parse_flag("AIDTREE_WARN_UNKNOWN_TAGS", &val)?;
        }
        if let Ok(labels) = config.get::<HashMap<String, String>>("labels") {
            let table: toml::Table = labels
                .into_iter()
                .map(|(k, v)| (k, toml::Value::String(v)))
                .collect();
            settings.labels = settings.labels.merge(&table)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# aidtree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/aidtree/aidtree.toml
#   Local:  ./.aidtree.toml
#   Env:    AIDTREE_* environment variables (AIDTREE_LABELS__VERIFIED=...)

# Output format: "text", "markdown" or "json"
# format = "text"

# Line width for centering terminal output
# width = 80

# Colorize terminal output (NO_COLOR is respected as well)
# color = true

# Warn on stderr when a data leaf has a dataType without a view
# warn_unknown_tags = true

[labels]
# verified = "Doğrulanmış"
# unverified = "Doğrulanmamış"
# source = "Kaynak"
# source_or_map = "Kaynak/Harita"
# name = "Yer"
# phone = "Telefon"
# location = "Lokasyon"
"#
        .to_string()
    }
}

fn parse_flag(key: &str, raw: &str) -> Result<bool, ApplicationError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(ApplicationError::Config {
            message: format!("{key}: expected a boolean, got {raw:?}"),
        }),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
