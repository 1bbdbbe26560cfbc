use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const CONFIG_DIR: &str = "~/.config/thought-memo";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    Read {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    Parse {
        config_path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to write config file at {config_path}: {source}")]
    Write {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// State tokens written into new markers. Both styles are always readable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarkerStyle {
    /// `normal` / `complete`
    #[default]
    Long,
    /// `r` / `c`
    Short,
}

/// Contents of `~/.config/thought-memo/config.toml`.
///
/// ```toml
/// data_path = "~/memo"
/// marker_style = "short"   # optional, defaults to "long"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the notebook data file. `~` and `$VARS` are expanded
    /// on load.
    pub data_path: PathBuf,
    #[serde(default)]
    pub marker_style: MarkerStyle,
}

impl Config {
    pub fn new(data_path: PathBuf) -> Self {
        Self {
            data_path,
            marker_style: MarkerStyle::default(),
        }
    }

    pub fn with_marker_style(mut self, marker_style: MarkerStyle) -> Self {
        self.marker_style = marker_style;
        self
    }

    /// Reads the config at the default location. `Ok(None)` if there is none.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        Self::load_from_path(Self::config_path())
    }

    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        let content = match fs::read_to_string(config_path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    config_path: config_path.to_path_buf(),
                    source,
                });
            }
        };

        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            config_path: config_path.to_path_buf(),
            source,
        })?;
        if let Some(expanded) = expand_path(&config.data_path) {
            config.data_path = expanded;
        }

        log::debug!("loaded config from {}", config_path.display());
        Ok(Some(config))
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to_path(Self::config_path())
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> Result<(), ConfigError> {
        let config_path = config_path.as_ref();
        let write_error = |source| ConfigError::Write {
            config_path: config_path.to_path_buf(),
            source,
        };

        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(config_path, content).map_err(write_error)
    }

    pub fn config_path() -> PathBuf {
        PathBuf::from(shellexpand::tilde(CONFIG_DIR).as_ref()).join(CONFIG_FILE)
    }
}

/// Expands `~` and environment variables. `None` if a variable is unset.
fn expand_path(path: &Path) -> Option<PathBuf> {
    let raw = path.to_string_lossy();
    shellexpand::full(&raw)
        .ok()
        .map(|expanded| PathBuf::from(expanded.as_ref()))
}
