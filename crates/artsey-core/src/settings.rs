// Artsey Settings Module
// Optional user settings that supply defaults for the command line

use std::path::{Path, PathBuf};

use serde::Deserialize;
use strum_macros::{AsRefStr, Display, EnumString};

use crate::key::SpecialKey;
use crate::layout::Hand;

/// Default layout document, relative to the working directory
pub const DEFAULT_LAYOUT_PATH: &str = "artsey.yaml";

/// Where chord key events come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, EnumString, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Backend {
    /// Linux event devices
    Evdev,
    /// The controlling terminal
    #[default]
    Terminal,
}

/// Settings loaded from a TOML file (default: ~/.config/artsey/settings.toml).
///
/// Every field is optional; anything left unset falls back to the command
/// line or the built-in default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    layout_path: Option<PathBuf>,
    hand: Option<Hand>,
    keys: Option<Vec<String>>,
    backend: Option<Backend>,
    devices: Vec<String>,
    grab: Option<bool>,
    exit_key: Option<SpecialKey>,

    /// Path to the settings file, if loaded from one
    source_path: Option<PathBuf>,
}

/// Errors that can occur when loading settings
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("Invalid setting value: {0}")]
    InvalidValue(String),
}

/// TOML representation for deserializing settings
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct SettingsToml {
    #[serde(default)]
    layout: Option<LayoutSettings>,

    #[serde(default)]
    input: Option<InputSettings>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct LayoutSettings {
    path: Option<PathBuf>,
    hand: Option<String>,
    keys: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
struct InputSettings {
    backend: Option<Backend>,
    #[serde(default)]
    devices: Vec<String>,
    grab: Option<bool>,
    exit_key: Option<String>,
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(&path)?;
        let mut settings = Self::from_toml(&content)?;
        settings.source_path = Some(path.as_ref().to_path_buf());
        Ok(settings)
    }

    /// Load settings from a TOML string
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        let toml_settings: SettingsToml =
            toml::from_str(content).map_err(|e| SettingsError::TomlParse(e.to_string()))?;

        let mut settings = Self::new();

        if let Some(layout) = toml_settings.layout {
            settings.layout_path = layout.path;
            settings.keys = layout.keys;
            if let Some(hand) = layout.hand {
                let parsed = hand
                    .parse::<Hand>()
                    .map_err(|_| SettingsError::InvalidValue(format!("unknown hand '{}'", hand)))?;
                settings.hand = Some(parsed);
            }
        }

        if let Some(input) = toml_settings.input {
            settings.backend = input.backend;
            settings.devices = input.devices;
            settings.grab = input.grab;
            if let Some(name) = input.exit_key {
                let key = name.parse::<SpecialKey>().map_err(|_| {
                    SettingsError::InvalidValue(format!("unknown exit key '{}'", name))
                })?;
                settings.exit_key = Some(key);
            }
        }

        Ok(settings)
    }

    /// Get the default settings path
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("artsey").join("settings.toml"))
    }

    /// Load from the default location, or empty settings if there is no file
    pub fn load_default() -> Result<Self, SettingsError> {
        if let Some(path) = Self::default_path() {
            if path.exists() {
                log::debug!("Loading settings from {}", path.display());
                return Self::from_file(path);
            }
        }
        Ok(Self::new())
    }

    pub fn layout_path(&self) -> Option<&Path> {
        self.layout_path.as_deref()
    }

    pub fn hand(&self) -> Option<Hand> {
        self.hand
    }

    pub fn keys(&self) -> Option<&[String]> {
        self.keys.as_deref()
    }

    pub fn backend(&self) -> Option<Backend> {
        self.backend
    }

    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    pub fn grab(&self) -> Option<bool> {
        self.grab
    }

    pub fn exit_key(&self) -> Option<SpecialKey> {
        self.exit_key
    }

    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }
}

/// Create default settings content for a new installation
pub fn default_settings_content() -> &'static str {
    r#"# Artsey Settings
# Place this file at: ~/.config/artsey/settings.toml
# Command line options take precedence over everything here.

[layout]
path = "artsey.yaml"
hand = "right"
# Eight keys, top row left to right, then the bottom row
# keys = ["a", "s", "d", "f", "j", "k", "l", ";"]

[input]
# "terminal" or "evdev"
backend = "terminal"
# evdev only: device names or paths to read (all keyboards when empty)
devices = []
grab = false
exit_key = "ESC"
"#
}
