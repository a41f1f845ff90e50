//! Configuration file support.
//!
//! Settings are read from `~/.config/gesso/config.toml` (or a path given on
//! the command line). Missing files and missing keys fall back to defaults.

pub mod enums;
pub mod keybindings;
pub mod types;

pub use enums::ColorSpec;
pub use keybindings::{Action, KeyBinding, KeybindingsConfig};
pub use types::{CanvasConfig, DrawingConfig, EraserConfig};

use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration deserialized from TOML.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "black"
/// default_tool = "circle"
///
/// [canvas]
/// width = 1600
/// height = 750
/// background = "white"
/// history_depth = 32
///
/// [eraser]
/// radius = 5.0
///
/// [keybindings]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Initial color and tool
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Canvas size, background, and undo depth
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Eraser stamp size
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Keyboard shortcuts
    #[serde(default)]
    pub keybindings: KeybindingsConfig,
}

impl Config {
    /// Clamps out-of-range values, logging a warning for each.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `canvas.history_depth`: 1 - 256
    /// - `eraser.radius`: 1.0 - 100.0
    pub fn validate_and_clamp(&mut self) {
        if !(1..=8192).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-8192 range",
                self.canvas.width
            );
            self.canvas.width = self.canvas.width.clamp(1, 8192);
        }

        if !(1..=8192).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-8192 range",
                self.canvas.height
            );
            self.canvas.height = self.canvas.height.clamp(1, 8192);
        }

        if !(1..=256).contains(&self.canvas.history_depth) {
            log::warn!(
                "Invalid history_depth {}, clamping to 1-256 range",
                self.canvas.history_depth
            );
            self.canvas.history_depth = self.canvas.history_depth.clamp(1, 256);
        }

        if !(1.0..=100.0).contains(&self.eraser.radius) {
            log::warn!(
                "Invalid eraser radius {:.1}, clamping to 1.0-100.0 range",
                self.eraser.radius
            );
            // NaN fails `contains` but survives `clamp`.
            self.eraser.radius = if self.eraser.radius.is_nan() {
                crate::input::tool::DEFAULT_ERASER_RADIUS
            } else {
                self.eraser.radius.clamp(1.0, 100.0)
            };
        }

        if self.canvas.background.try_to_color().is_none() {
            log::warn!(
                "Invalid canvas background {:?}, falling back to 'white'",
                self.canvas.background
            );
            self.canvas.background = ColorSpec::Name("white".to_string());
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("gesso");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the default config file, or defaults if it does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Loads and validates the config at `path`; defaults if it does not exist.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the documented example config to `path`.
    ///
    /// # Errors
    /// Fails if a file already exists there or it cannot be written.
    pub fn create_default_file(path: &Path) -> Result<()> {
        if path.exists() {
            return Err(anyhow::anyhow!(
                "Config file already exists at {}",
                path.display()
            ));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let default_config = include_str!("../../config.example.toml");
        fs::write(path, default_config)?;

        info!("Created default config at {}", path.display());
        Ok(())
    }

    /// JSON schema describing the config file.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::ShapeKind;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = Config::load_from(&temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.canvas.history_depth, 32);
        assert_eq!(config.drawing.default_tool, ShapeKind::Line);
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(
            &path,
            "[drawing]\ndefault_tool = \"rhombus\"\n\n[canvas]\nbackground = [10, 20, 30]\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_tool, ShapeKind::Rhombus);
        assert_eq!(config.canvas.background, ColorSpec::Rgb([10, 20, 30]));
        assert_eq!(config.canvas.width, 1600);
        assert_eq!(config.eraser.radius, 5.0);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let mut config = Config::default();
        config.canvas.width = 0;
        config.canvas.history_depth = 10_000;
        config.eraser.radius = f64::NAN;
        config.canvas.background = ColorSpec::Name("nope".into());
        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.history_depth, 256);
        assert_eq!(config.eraser.radius, 5.0);
        assert_eq!(config.canvas.background, ColorSpec::Name("white".into()));
    }

    #[test]
    fn invalid_toml_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = ").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn example_file_parses() {
        let config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        assert!(config.keybindings.build_action_map().is_ok());
    }

    #[test]
    fn create_default_file_refuses_to_overwrite() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        Config::create_default_file(&path).unwrap();
        assert!(Config::create_default_file(&path).is_err());
    }
}
