//! Configuration structs with sensible defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Window settings.
    pub window: WindowConfig,
    /// Starfield scene settings.
    pub scene: SceneConfig,
    /// Ship flight tuning.
    pub ship: ShipConfig,
    /// Rendering settings.
    pub render: RenderConfig,
    /// Input settings.
    pub input: InputConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    /// Window width in logical pixels.
    pub width: u32,
    /// Window height in logical pixels.
    pub height: u32,
    /// Enable vsync (PresentMode::Fifo).
    pub vsync: bool,
    /// Window title.
    pub title: String,
}

/// Starfield scene configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of stars generated at startup.
    pub star_count: u32,
    /// Starfield seed. `None` draws a fresh seed from entropy at startup;
    /// the drawn value is logged so a run can be reproduced with `--seed`.
    pub seed: Option<u64>,
}

/// Ship flight tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ShipConfig {
    /// Translation applied per simulation tick while a thrust key is held.
    pub speed: f32,
    /// Rotation in degrees applied per simulation tick while a turn key is held.
    pub turn_rate_deg: f32,
}

/// Rendering configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderConfig {
    /// Frame rate cap enforced by a blocking end-of-frame wait when vsync
    /// is off (0 = uncapped, rely on vsync alone).
    pub target_fps: u32,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (action name -> key name, e.g. "Quit" -> "KeyQ").
    pub keybindings: HashMap<String, String>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            vsync: true,
            title: "Stardrift".to_string(),
        }
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            star_count: 1500,
            seed: None,
        }
    }
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            speed: 0.1,
            turn_rate_deg: 2.0,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { target_fps: 60 }
    }
}

/// Default config directory: the platform config dir under `stardrift`,
/// or `./config` when the platform dir cannot be resolved.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("stardrift"))
        .unwrap_or_else(|| PathBuf::from("config"))
}

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::Read)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::Parse)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::Write)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_original_scene() {
        let config = Config::default();
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.window.height, 800);
        assert_eq!(config.scene.star_count, 1500);
        assert_eq!(config.scene.seed, None);
        assert!((config.ship.speed - 0.1).abs() < f32::EPSILON);
        assert!((config.ship.turn_rate_deg - 2.0).abs() < f32::EPSILON);
        assert_eq!(config.render.target_fps, 60);
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let mut config = Config::default();
        config.window.width = 1920;
        config.scene.star_count = 4000;
        config.scene.seed = Some(7);
        config.save(dir.path()).expect("save");

        let loaded = Config::load_or_create(dir.path()).expect("load");
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::load_or_create(dir.path()).expect("create");
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_malformed_ron_is_a_parse_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("config.ron"), "(window: (width: oops").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_fields_fall_back_to_defaults() {
        let config: Config = ron::from_str("(scene: (star_count: 2000))").expect("parse");
        assert_eq!(config.scene.star_count, 2000);
        assert_eq!(config.window.width, 1200);
    }
}
