//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ntree/ntree.toml`
//! 3. Environment variables: `NTREE_*` prefix (`NTREE_RENDER__FILL=.`)
//!
//! Command line flags are applied on top by the CLI layer.

use std::path::{Path, PathBuf};

use config::{Config, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::render::RenderStyle;

#[derive(Error, Debug)]
#[error("config error: {message}")]
pub struct SettingsError {
    pub message: String,
}

impl SettingsError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Raw render config for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawRenderConfig {
    pub fill: Option<char>,
}

/// Raw settings for intermediate parsing.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub render: RawRenderConfig,
}

/// Unified configuration for ntree.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Diagram rendering settings
    pub render: RenderStyle,
}

/// Get the XDG config directory for ntree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ntree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ntree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, SettingsError> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| SettingsError::new(format!("read {}: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| SettingsError::new(format!("parse {}: {}", path.display(), e)))
}

/// A fill glyph must be exactly one non-whitespace character.
pub fn parse_fill(value: &str) -> Result<char, SettingsError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() => Ok(c),
        _ => Err(SettingsError::new(format!(
            "fill must be a single visible character, got '{value}'"
        ))),
    }
}

impl Settings {
    /// Overlay wins where it specifies a value.
    fn apply(&self, overlay: &RawSettings) -> Result<Self, SettingsError> {
        let fill = match overlay.render.fill {
            Some(c) => parse_fill(&c.to_string())?,
            None => self.render.fill,
        };
        Ok(Self {
            render: RenderStyle { fill },
        })
    }

    /// Load settings from defaults, the global config file and `NTREE_*`.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Like [`Settings::load`] with an explicit config file location.
    #[instrument(level = "debug")]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, SettingsError> {
        let mut current = Self::default();

        if let Some(path) = config_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.apply(&raw)?;
                debug!(path = %path.display(), "applied config file");
            }
        }

        Self::apply_env_overrides(current)
    }

    /// Apply NTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, SettingsError> {
        let config = Config::builder()
            .add_source(Environment::with_prefix("NTREE").separator("__"))
            .build()
            .map_err(|e| SettingsError::new(e.to_string()))?;

        if let Ok(val) = config.get_string("render.fill") {
            settings.render.fill = parse_fill(&val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self)
            .map_err(|e| SettingsError::new(format!("serialize config: {e}")))
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# ntree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/ntree/ntree.toml
#   Env:    NTREE_* environment variables, e.g. NTREE_RENDER__FILL=.
#   CLI:    --fill

[render]
# Padding glyph used to center labels and fill shallow subtrees
# fill = "_"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_no_config_file_when_loading_then_uses_default_fill() {
        let dir = TempDir::new().unwrap();
        let settings = Settings::load_from(Some(dir.path().join("missing.toml").as_path())).unwrap();
        // NTREE_RENDER__FILL is not set by the test suite
        assert_eq!(settings.render.fill, '_');
    }

    #[test]
    fn given_config_file_with_fill_when_loading_then_fill_applied() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ntree.toml");
        fs::write(&path, "[render]\nfill = \"*\"\n").unwrap();
        let settings = Settings::load_from(Some(path.as_path())).unwrap();
        assert_eq!(settings.render.fill, '*');
    }

    #[test]
    fn given_malformed_config_file_when_loading_then_error_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("ntree.toml");
        fs::write(&path, "[render\nfill = ").unwrap();
        let err = Settings::load_from(Some(path.as_path())).unwrap_err();
        assert!(err.message.contains("ntree.toml"));
    }

    #[test]
    fn given_fill_candidates_when_parsing_then_only_single_visible_char_accepted() {
        assert_eq!(parse_fill("-").unwrap(), '-');
        assert!(parse_fill("").is_err());
        assert!(parse_fill("ab").is_err());
        assert!(parse_fill(" ").is_err());
    }

    #[test]
    fn given_settings_when_to_toml_then_contains_render_section() {
        let toml = Settings::default().to_toml().unwrap();
        assert!(toml.contains("[render]"));
        assert!(toml.contains("fill = \"_\""));
    }

    #[test]
    fn given_template_when_parsed_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).unwrap();
        assert!(raw.render.fill.is_none());
    }
}
