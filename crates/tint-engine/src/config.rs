//! Tint engine configuration as data.
//!
//! Captures the placeholder keys and the theme naming conventions in a single
//! [`TintConfig`] that can be loaded from TOML or JSON at startup.
//!
//! # Loading
//!
//! ```toml
//! # tint.toml
//! theme = "dark"
//!
//! [keys]
//! css = ["rgb(118, 207, 166)", "rgb(234, 245, 240)", "rgb(211, 239, 225)"]
//! graphic = ["#76CFA6", "#EAF5F0", "#D3EFE1", "#FFFFFF"]
//!
//! [conventions]
//! stylesheet_prefix = "/theme-"
//! ```
//!
//! ```rust,ignore
//! let config = TintConfig::from_toml_file("tint.toml")?;
//! let tinter = Tinter::with_config(document, &config)?;
//! ```
//!
//! # Defaults
//!
//! Every field defaults to the engine's built-in value, so
//! `TintConfig::default()` behaves exactly like [`Tinter::new`](crate::Tinter::new).

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tint_color::{Rgb, parse_color};

use crate::palette::{DEFAULT_CSS_KEYS, DEFAULT_GRAPHIC_KEYS, KeyColors};
use crate::theme::{ThemeConventions, ThemeId};

// ---------------------------------------------------------------------------
// Top-level TintConfig
// ---------------------------------------------------------------------------

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct TintConfig {
    /// Theme to activate when the engine is constructed.
    pub theme: Option<String>,

    /// Placeholder keys.
    pub keys: KeyConfig,

    /// Theme stylesheet and marker naming.
    pub conventions: ConventionsConfig,
}

impl TintConfig {
    /// Load from a TOML string.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(ConfigError::Toml)
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(s).map_err(ConfigError::Json)
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate every field.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (i, key) in self.keys.css.iter().enumerate() {
            if let Err(err) = parse_color(key) {
                errors.push(format!("keys.css[{i}]: {err}"));
            }
        }
        for (i, key) in self.keys.graphic.iter().enumerate() {
            if let Err(err) = parse_color(key) {
                errors.push(format!("keys.graphic[{i}]: {err}"));
            }
        }

        if self.theme.as_deref().is_some_and(|t| t.trim().is_empty()) {
            errors.push("theme must not be blank".into());
        }

        let c = &self.conventions;
        if c.stylesheet_suffix.is_empty() {
            errors.push("conventions.stylesheet_suffix must not be empty".into());
        }
        if c.definition_selector.is_empty() {
            errors.push("conventions.definition_selector must not be empty".into());
        }
        if c.accent_marker_id.is_empty() {
            errors.push("conventions.accent_marker_id must not be empty".into());
        }
        if c.secondary_accent_marker_id.is_empty() {
            errors.push("conventions.secondary_accent_marker_id must not be empty".into());
        }

        errors
    }

    /// Parse the configured keys.
    pub fn to_key_colors(&self) -> Result<KeyColors, ConfigError> {
        let parse = |field: &str, i: usize, s: &str| {
            parse_color(s)
                .map_err(|err| ConfigError::Validation(vec![format!("{field}[{i}]: {err}")]))
        };
        let mut css = DEFAULT_CSS_KEYS;
        for (i, (slot, s)) in css.iter_mut().zip(&self.keys.css).enumerate() {
            *slot = parse("keys.css", i, s.as_str())?;
        }
        let mut graphic = DEFAULT_GRAPHIC_KEYS;
        for (i, (slot, s)) in graphic.iter_mut().zip(&self.keys.graphic).enumerate() {
            *slot = parse("keys.graphic", i, s.as_str())?;
        }
        Ok(KeyColors::with_css_text(css, self.keys.css.clone(), graphic))
    }

    #[must_use]
    pub fn to_conventions(&self) -> ThemeConventions {
        let c = &self.conventions;
        ThemeConventions {
            stylesheet_prefix: c.stylesheet_prefix.clone(),
            stylesheet_suffix: c.stylesheet_suffix.clone(),
            definition_selector: c.definition_selector.clone(),
            accent_marker_id: c.accent_marker_id.clone(),
            secondary_accent_marker_id: c.secondary_accent_marker_id.clone(),
        }
    }

    #[must_use]
    pub fn initial_theme(&self) -> Option<ThemeId> {
        self.theme.as_deref().map(ThemeId::from)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// Placeholder keys, in slot order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct KeyConfig {
    /// Stylesheet keys (primary, secondary, tertiary). Hex or `rgb()`;
    /// declarations must hold the exact text to match.
    pub css: [String; 3],
    /// Graphic keys (primary, secondary, tertiary, highlight). Hex or `rgb()`.
    pub graphic: [String; 4],
}

impl Default for KeyConfig {
    fn default() -> Self {
        Self {
            css: DEFAULT_CSS_KEYS.map(Rgb::to_css_rgb),
            graphic: DEFAULT_GRAPHIC_KEYS.map(|key| key.to_hex().to_ascii_uppercase()),
        }
    }
}

/// Naming conventions. Mirrors [`ThemeConventions`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct ConventionsConfig {
    pub stylesheet_prefix: String,
    pub stylesheet_suffix: String,
    pub definition_selector: String,
    pub accent_marker_id: String,
    pub secondary_accent_marker_id: String,
}

impl Default for ConventionsConfig {
    fn default() -> Self {
        let defaults = ThemeConventions::default();
        Self {
            stylesheet_prefix: defaults.stylesheet_prefix,
            stylesheet_suffix: defaults.stylesheet_suffix,
            definition_selector: defaults.definition_selector,
            accent_marker_id: defaults.accent_marker_id,
            secondary_accent_marker_id: defaults.secondary_accent_marker_id,
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading a tint configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[source] std::io::Error),

    #[cfg(feature = "config")]
    #[error("TOML parse error: {0}")]
    Toml(#[source] toml::de::Error),

    #[cfg(feature = "config")]
    #[error("JSON parse error: {0}")]
    Json(#[source] serde_json::Error),

    #[error("validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette::Slot;

    #[test]
    fn default_matches_engine_defaults() {
        let config = TintConfig::default();
        assert_eq!(config.to_key_colors().unwrap(), KeyColors::default());
        assert_eq!(config.to_conventions(), ThemeConventions::default());
        assert_eq!(config.initial_theme(), None);
    }

    #[test]
    fn default_validates_clean() {
        let errors = TintConfig::default().validate();
        assert!(errors.is_empty(), "default should validate: {errors:?}");
    }

    #[test]
    fn validate_catches_bad_key() {
        let mut config = TintConfig::default();
        config.keys.graphic[3] = "#GGGGGG".into();
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("keys.graphic[3]")));
    }

    #[test]
    fn validate_catches_blank_theme() {
        let mut config = TintConfig::default();
        config.theme = Some("  ".into());
        let errors = config.validate();
        assert!(errors.iter().any(|e| e.contains("theme")));
    }

    #[test]
    fn validate_catches_empty_conventions() {
        let mut config = TintConfig::default();
        config.conventions.stylesheet_suffix.clear();
        config.conventions.accent_marker_id.clear();
        let errors = config.validate();
        assert!(errors.len() >= 2, "should catch multiple errors: {errors:?}");
    }

    #[test]
    fn css_keys_accept_hex() {
        let mut config = TintConfig::default();
        config.keys.css[0] = "#102030".into();
        let keys = config.to_key_colors().unwrap();
        assert_eq!(keys.css_keys()[0], Rgb::new(0x10, 0x20, 0x30));
        assert_eq!(keys.css_text(Slot::Primary), Some("#102030"));
    }

    #[test]
    fn to_key_colors_reports_field() {
        let mut config = TintConfig::default();
        config.keys.css[1] = "rgb(1, 2)".into();
        let err = config.to_key_colors().unwrap_err();
        assert!(err.to_string().contains("keys.css[1]"), "{err}");
    }

    #[cfg(feature = "config")]
    #[test]
    fn partial_toml_preserves_defaults() {
        let config = TintConfig::from_toml_str(
            r##"
theme = "dark"

[conventions]
stylesheet_prefix = "/skins/theme-"
"##,
        )
        .unwrap();
        assert_eq!(config.initial_theme(), Some(ThemeId::from("dark")));
        assert_eq!(config.conventions.stylesheet_prefix, "/skins/theme-");
        assert_eq!(config.conventions.stylesheet_suffix, ".css");
        assert_eq!(config.keys, KeyConfig::default());
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_keys_override() {
        let config = TintConfig::from_toml_str(
            r##"
[keys]
graphic = ["#000001", "#000002", "#000003", "#000004"]
"##,
        )
        .unwrap();
        let keys = config.to_key_colors().unwrap();
        assert_eq!(keys.graphic_keys()[3], Rgb::new(0, 0, 4));
        assert_eq!(keys.css_keys(), DEFAULT_CSS_KEYS);
    }

    #[cfg(feature = "config")]
    #[test]
    fn json_round_trip() {
        let mut config = TintConfig::default();
        config.theme = Some("light".into());
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(TintConfig::from_json_str(&json).unwrap(), config);
    }

    #[cfg(feature = "config")]
    #[test]
    fn malformed_toml_is_reported() {
        let err = TintConfig::from_toml_str("theme = ").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[cfg(feature = "config")]
    #[test]
    fn toml_file_loading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tint.toml");
        std::fs::write(&path, "theme = \"dark\"\n").unwrap();
        let config = TintConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.theme.as_deref(), Some("dark"));

        let missing = TintConfig::from_json_file(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io(_)));
    }
}
