// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Runtime configuration.
//!
//! Every field has a default, so an absent or partial file is fine. The
//! file location comes from the `FRAMEBOX_CONFIG` environment variable and
//! its format (YAML or JSON) from the extension.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV_VAR: &str = "FRAMEBOX_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedFormat(Option<String>),
    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Thresholds and steps used by the pointer and keyboard handlers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Smallest rectangle (frame pixels, per side) a create-drag produces.
    pub min_create_size: f64,
    /// Smallest size (frame pixels, per side) a resize may leave.
    pub min_shape_size: f64,
    /// Side length of the square resize handles, in frame pixels.
    pub handle_size: f64,
    /// Arrow-key nudge distance in image pixels.
    pub nudge_step: f64,
    /// Multiplier applied per zoom-in step.
    pub zoom_step: f64,
    /// Scroll distance, in points, that zooms by one `zoom_step`.
    pub scroll_per_zoom_step: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_create_size: 10.0,
            min_shape_size: 5.0,
            handle_size: 8.0,
            nudge_step: 1.0,
            zoom_step: 1.25,
            scroll_per_zoom_step: 50.0,
            min_zoom: 0.1,
            max_zoom: 20.0,
        }
    }
}

/// Initial native window size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub interaction: InteractionConfig,
    pub window: WindowConfig,
}

impl Config {
    /// Load from the file named by `FRAMEBOX_CONFIG`, or defaults when unset.
    pub fn from_env() -> Result<Config, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Config::default()),
        }
    }

    /// Load and validate a YAML or JSON config file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let extension = path.extension().and_then(|s| s.to_str());
        let config: Config = match extension {
            Some("yaml") | Some("yml") => {
                serde_yaml::from_str(&text).map_err(|source| ConfigError::Yaml {
                    path: path.to_path_buf(),
                    source,
                })?
            }
            Some("json") => serde_json::from_str(&text).map_err(|source| ConfigError::Json {
                path: path.to_path_buf(),
                source,
            })?,
            other => return Err(ConfigError::UnsupportedFormat(other.map(str::to_string))),
        };

        config.validate()?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let i = &self.interaction;
        let positive = [
            ("min_create_size", i.min_create_size),
            ("min_shape_size", i.min_shape_size),
            ("handle_size", i.handle_size),
            ("nudge_step", i.nudge_step),
            ("scroll_per_zoom_step", i.scroll_per_zoom_step),
            ("min_zoom", i.min_zoom),
            ("max_zoom", i.max_zoom),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "interaction.{} must be positive, got {}",
                    name, value
                )));
            }
        }
        if !(i.zoom_step.is_finite() && i.zoom_step > 1.0) {
            return Err(ConfigError::Invalid(format!(
                "interaction.zoom_step must be greater than 1, got {}",
                i.zoom_step
            )));
        }
        if i.min_zoom > i.max_zoom {
            return Err(ConfigError::Invalid(format!(
                "interaction.min_zoom ({}) exceeds max_zoom ({})",
                i.min_zoom, i.max_zoom
            )));
        }
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(ConfigError::Invalid("window size must be positive".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.interaction.min_create_size, 10.0);
        assert_eq!(config.interaction.min_shape_size, 5.0);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let file = write_config(".yaml", "interaction:\n  nudge_step: 5\n");
        let config = Config::load(file.path()).unwrap();

        assert_eq!(config.interaction.nudge_step, 5.0);
        assert_eq!(config.interaction.min_create_size, 10.0);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn test_json_config() {
        let file = write_config(".json", r#"{"window": {"width": 800, "height": 600}}"#);
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.window.width, 800.0);
    }

    #[test]
    fn test_rejects_inverted_zoom_limits() {
        let file = write_config(".yml", "interaction:\n  min_zoom: 5\n  max_zoom: 2\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_zero_scroll_distance() {
        let file = write_config(".yaml", "interaction:\n  scroll_per_zoom_step: 0\n");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::Invalid(msg)) if msg.contains("scroll_per_zoom_step")
        ));
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let file = write_config(".toml", "");
        assert!(matches!(
            Config::load(file.path()),
            Err(ConfigError::UnsupportedFormat(Some(ext))) if ext == "toml"
        ));
    }
}
