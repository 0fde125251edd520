use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// User-level settings for the command-line front end.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// YAML style sheet applied before every document's own front matter.
    pub stylesheet: Option<PathBuf>,
    /// Whether to append a generated references section.
    pub references_list: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            stylesheet: None,
            references_list: true,
        }
    }
}

impl Settings {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut settings: Settings =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        settings.stylesheet = settings
            .stylesheet
            .map(|path| Self::expand_path(&path).unwrap_or(path));

        Ok(Some(settings))
    }

    /// Loads the settings file from its default location, falling back to
    /// defaults when it does not exist.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path();
        Ok(Self::load_from_path(&config_path)?.unwrap_or_default())
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/papermark");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}
