use crate::animation::{MAX_FPS, MIN_FPS};
use crate::settings::FieldSettings;
use crate::theme::Palette;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_VERSION: u32 = 1;

/// Errors that can occur while loading or saving the config file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Reading, writing or creating the config location failed.
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file exists but is not a valid config.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Serialising the config failed.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),

    /// The platform has no per-user config directory.
    #[error("Could not determine config directory")]
    NoConfigDir,
}

/// Persisted application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Version field for future compatibility
    pub version: u32,
    /// Particle field tunables
    pub settings: FieldSettings,
    /// Last selected palette
    pub palette: Palette,
    /// Logical pixels per Braille dot
    pub pixel_scale: f32,
    /// Target frames per second
    pub fps: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            settings: FieldSettings::default(),
            palette: Palette::default(),
            pixel_scale: 4.0,
            fps: 60,
        }
    }
}

impl AppConfig {
    /// Default config path: `<config dir>/particle-field/config.json`
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|p| p.join("particle-field").join("config.json"))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Export config to a JSON file, creating parent directories as needed
    pub fn save_to_file(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(self).map_err(ConfigError::Serialize)?;
        fs::write(path, json).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Import config from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.sanitized())
    }

    /// Load from `path`, falling back to defaults when the file is missing or broken
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from_file(path) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("{}; using defaults", err);
                Self::default()
            }
        }
    }

    fn sanitized(mut self) -> Self {
        self.settings = self.settings.sanitized();
        self.pixel_scale = self.pixel_scale.clamp(0.5, 32.0);
        self.fps = self.fps.clamp(MIN_FPS, MAX_FPS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::MAX_PARTICLES;
    use crate::simulation::ParticleField;
    use crate::surface::RecordingSurface;
    use tempfile::{tempdir, NamedTempFile};

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = AppConfig {
            version: 1,
            settings: FieldSettings {
                interaction_radius: 120.0,
                push_strength: 4.5,
                relaxation: 0.1,
                ..Default::default()
            },
            palette: Palette::Urban,
            pixel_scale: 6.0,
            fps: 30,
        };

        let json = serde_json::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, config);
        assert!(json.contains("\"palette\": \"urban\""));
    }

    #[test]
    fn test_config_file_save_and_load() {
        let config = AppConfig {
            palette: Palette::Urban,
            ..Default::default()
        };

        let temp_file = NamedTempFile::new().unwrap();
        let path = temp_file.path().to_path_buf();

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path).unwrap();

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        AppConfig::default().save_to_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), r#"{"palette": "urban", "fps": 1000}"#).unwrap();

        let loaded = AppConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.palette, Palette::Urban);
        assert_eq!(loaded.fps, 240);
        assert_eq!(loaded.settings, FieldSettings::default());
        assert_eq!(loaded.pixel_scale, 4.0);
    }

    #[test]
    fn test_oversized_particle_count_is_clamped() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(
            temp_file.path(),
            r#"{"settings": {"large_count": 18446744073709551615}}"#,
        )
        .unwrap();

        let loaded = AppConfig::load_or_default(temp_file.path());
        assert_eq!(loaded.settings.large_count, MAX_PARTICLES);

        let surface = RecordingSurface::new(1000.0, 500.0);
        let field = ParticleField::new(loaded.settings, &surface);
        assert_eq!(field.particles().len(), MAX_PARTICLES);
    }

    #[test]
    fn test_invalid_config_file() {
        let temp_file = NamedTempFile::new().unwrap();
        std::fs::write(temp_file.path(), "not valid json").unwrap();

        let result = AppConfig::load_from_file(temp_file.path());
        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        assert_eq!(AppConfig::load_or_default(temp_file.path()), AppConfig::default());
    }

    #[test]
    fn test_missing_config_file() {
        let path = Path::new("/nonexistent/path/config.json");
        let result = AppConfig::load_from_file(path);
        assert!(matches!(result, Err(ConfigError::Io { .. })));
        assert_eq!(AppConfig::load_or_default(path), AppConfig::default());
    }
}
