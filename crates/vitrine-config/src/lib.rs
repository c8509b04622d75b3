//! Configuration for vitrine.
//!
//! Settings live in `config.toml` under the platform configuration directory.
//! A missing file is not an error; every field has a default.

use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use vitrine_core::{LayoutProfile, Theme};

const CONFIG_FILE: &str = "config.toml";

/// Bounds for `particle_count` overrides.
pub const PARTICLE_COUNT_RANGE: std::ops::RangeInclusive<usize> = 1..=500;

/// Bounds for `frame_rate`.
pub const FRAME_RATE_RANGE: std::ops::RangeInclusive<u32> = 10..=120;

/// Errors raised while reading or writing the configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not determine a configuration directory for this platform")]
    NoConfigDir,
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How the scene layout is chosen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Pick from the terminal width on every resize.
    #[default]
    Auto,
    Desktop,
    Compact,
}

impl LayoutMode {
    /// Resolve to a concrete profile for a terminal `columns` wide.
    pub fn resolve(self, columns: u16) -> LayoutProfile {
        match self {
            LayoutMode::Auto => LayoutProfile::from_width(columns),
            LayoutMode::Desktop => LayoutProfile::Desktop,
            LayoutMode::Compact => LayoutProfile::Compact,
        }
    }
}

/// User settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Theme at startup.
    pub theme: Theme,
    /// Seed for particle placement and blink timing; time-derived when absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Override for the layout's particle count.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub particle_count: Option<usize>,
    pub layout: LayoutMode,
    /// Target frames per second for the render loop.
    pub frame_rate: u32,
    /// Default tracing filter when `RUST_LOG` is unset.
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            seed: None,
            particle_count: None,
            layout: LayoutMode::default(),
            frame_rate: 30,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Platform path of the configuration file.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Platform directory for the log file.
    pub fn log_dir() -> Result<PathBuf, ConfigError> {
        project_dirs().map(|dirs| dirs.data_local_dir().to_path_buf())
    }

    /// Load from the platform path, falling back to defaults if absent.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_path()?)
    }

    /// Load from `path`, falling back to defaults if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let text = toml::to_string_pretty(self)?;
        fs::write(path, text).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(count) = self.particle_count
            && !PARTICLE_COUNT_RANGE.contains(&count)
        {
            return Err(ConfigError::Invalid {
                field: "particle_count",
                reason: format!(
                    "{count} is outside {}..={}",
                    PARTICLE_COUNT_RANGE.start(),
                    PARTICLE_COUNT_RANGE.end()
                ),
            });
        }
        if !FRAME_RATE_RANGE.contains(&self.frame_rate) {
            return Err(ConfigError::Invalid {
                field: "frame_rate",
                reason: format!(
                    "{} is outside {}..={}",
                    self.frame_rate,
                    FRAME_RATE_RANGE.start(),
                    FRAME_RATE_RANGE.end()
                ),
            });
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Invalid {
                field: "log_level",
                reason: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

fn project_dirs() -> Result<ProjectDirs, ConfigError> {
    ProjectDirs::from("dev", "vitrine", "vitrine").ok_or(ConfigError::NoConfigDir)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "theme = \"light\"\nseed = 7\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.theme, Theme::Light);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.frame_rate, 30);
        assert_eq!(config.layout, LayoutMode::Auto);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(CONFIG_FILE);
        let config = Config {
            theme: Theme::Light,
            particle_count: Some(42),
            layout: LayoutMode::Compact,
            ..Default::default()
        };
        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_rejects_out_of_range_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "frame_rate = 1000\n").unwrap();
        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Invalid {
                field: "frame_rate",
                ..
            })
        ));

        let config = Config {
            particle_count: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_error_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "theme = \"sepia\"\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_layout_mode_resolution() {
        assert_eq!(LayoutMode::Auto.resolve(60), LayoutProfile::Compact);
        assert_eq!(LayoutMode::Auto.resolve(160), LayoutProfile::Desktop);
        assert_eq!(LayoutMode::Compact.resolve(160), LayoutProfile::Compact);
    }
}
