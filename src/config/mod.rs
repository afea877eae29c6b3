use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::media::{Format, Language};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Values used when a flag is not given
    pub defaults: DefaultsConfig,

    /// HTTP client settings
    pub http: HttpConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Format requested when `--format` is omitted
    pub format: String,

    /// Language requested when `--lang` is omitted
    pub language: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Whole-request timeout. Unset means wait indefinitely.
    pub timeout_secs: Option<u64>,

    /// User-Agent header. Unset sends the client's default.
    pub user_agent: Option<String>,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            format: "mp4".to_string(),
            language: "auto".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an explicit path, the usual locations, or
    /// fall back to built-in defaults. Never writes a file.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover(),
        };

        match path {
            Some(path) => Self::from_file(&path),
            None => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Read and validate a YAML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading config from: {}", path.display());

        let content = fs_err::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// First existing config file among the default locations
    fn discover() -> Option<PathBuf> {
        // Current directory first for easy testing
        let local_config = PathBuf::from("cccdl.yaml");
        if local_config.exists() {
            return Some(local_config);
        }

        dirs::config_dir()
            .map(|dir| dir.join("cccdl").join("config.yaml"))
            .filter(|path| path.exists())
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        self.defaults
            .format
            .parse::<Format>()
            .context("Invalid default format")?;
        self.defaults
            .language
            .parse::<Language>()
            .context("Invalid default language")?;

        if self.http.timeout_secs == Some(0) {
            anyhow::bail!("http.timeout_secs must be greater than zero");
        }

        Ok(())
    }
}
