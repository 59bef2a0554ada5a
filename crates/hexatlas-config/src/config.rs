//! Configuration structs with sensible defaults and RON persistence.

use std::path::{Path, PathBuf};

use hexatlas_blocks::{AlphaPolicy, AtlasLayout, AtlasOptions};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration.
pub const CONFIG_FILE: &str = "config.ron";

const APP_NAME: &str = "hexatlas";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Atlas source and construction settings.
    pub atlas: AtlasConfig,
    /// Alpha thresholds for drawing and retouch.
    pub alpha: AlphaPolicy,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Atlas configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AtlasConfig {
    /// Half-size B; block images are `4B × 4B`.
    pub half_size: u32,
    /// Directory holding `blocks-<B>.png` and/or `terrain.png`.
    pub image_dir: PathBuf,
    /// Write a freshly constructed atlas back to `image_dir`.
    pub save_generated: bool,
    /// Synthesis threads (0 = one per CPU).
    pub workers: usize,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

// --- Default implementations ---

impl Default for AtlasConfig {
    fn default() -> Self {
        Self {
            half_size: 6,
            image_dir: PathBuf::from("images"),
            save_generated: true,
            workers: 0,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// `<OS config dir>/hexatlas`, falling back to the working directory.
pub fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .map(|dir| dir.join(APP_NAME))
        .unwrap_or_else(|| PathBuf::from("."))
}

// --- Load / Save ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
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
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Checks the half-size and alpha bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        AtlasLayout::new(self.atlas.half_size).map_err(ConfigError::Invalid)?;
        self.alpha.validate().map_err(ConfigError::Invalid)?;
        Ok(())
    }

    /// Options for creating the atlas.
    pub fn atlas_options(&self) -> AtlasOptions {
        AtlasOptions {
            half_size: self.atlas.half_size,
            alpha: self.alpha,
            workers: self.atlas.workers,
            save_generated: self.atlas.save_generated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("half_size: 6"));
        assert!(ron_str.contains("low: 10"));
        assert!(ron_str.contains("high: 245"));
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let config: Config = ron::from_str("(atlas: (half_size: 3), alpha: (low: 4))").unwrap();
        assert_eq!(config.atlas.half_size, 3);
        assert!(config.atlas.save_generated);
        assert_eq!(config.alpha, AlphaPolicy { low: 4, high: 245 });
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.atlas.half_size = 10;
        config.atlas.image_dir = PathBuf::from("/srv/art");
        config.atlas.workers = 3;

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).is_file());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        assert!(matches!(
            Config::load_or_create(dir.path()),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validate() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());
        config.atlas.half_size = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
        config.atlas.half_size = 4;
        config.alpha = AlphaPolicy { low: 250, high: 10 };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_atlas_options_follow_config() {
        let mut config = Config::default();
        config.atlas.save_generated = false;
        config.atlas.workers = 2;
        let options = config.atlas_options();
        assert_eq!(options.half_size, 6);
        assert_eq!(options.workers, 2);
        assert!(!options.save_generated);
        assert_eq!(options.alpha, AlphaPolicy::default());
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// atlas settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
