//! Configuration loading
//!
//! Settings live in `~/.postboard/config.yaml`. Every key is optional, and
//! `POSTBOARD_API_URL` overrides the API origin.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{
    API_URL_ENV, CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_API_BASE_URL, DEFAULT_LOG_FILE,
};

/// Runtime configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Origin of the Post API, without a trailing slash
    pub api_base_url: String,
    /// Client-wide request timeout. None leaves the transport default.
    pub request_timeout_secs: Option<u64>,
    /// Also show list, edit and delete failures in the list view
    pub show_list_errors: bool,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            api_base_url: String::from(DEFAULT_API_BASE_URL),
            request_timeout_secs: None,
            show_list_errors: false,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Config {
    /// Default config file location
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Load from the default location and apply the environment override
    pub fn load() -> Result<Self> {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::load_from(&Self::default_path(), env_url.as_deref())
    }

    /// Load from `path` (missing file means defaults), then apply `api_url_override`
    pub fn load_from(path: &Path, api_url_override: Option<&str>) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("reading config file {}", path.display()))?;
            if content.trim().is_empty() {
                Config::default()
            } else {
                serde_yaml::from_str::<Config>(&content)
                    .with_context(|| format!("parsing config file {}", path.display()))?
            }
        } else {
            Config::default()
        };

        if let Some(url) = api_url_override {
            config.api_base_url = url.to_string();
        }

        config.normalize()?;
        Ok(config)
    }

    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.api_base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("api_base_url must not be empty");
        }
        self.api_base_url = trimmed.to_string();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.yaml"), None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: http://localhost:8000/\nshow_list_errors: true\n").unwrap();

        let config = Config::load_from(&path, None).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert!(config.show_list_errors);
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(config.log_file, PathBuf::from(DEFAULT_LOG_FILE));
    }

    #[test]
    fn test_env_override_wins() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "api_base_url: http://localhost:8000\n").unwrap();

        let config = Config::load_from(&path, Some("https://staging.example.com/")).unwrap();
        assert_eq!(config.api_base_url, "https://staging.example.com");
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "request_timeout_secs: [not, a, number]\n").unwrap();

        let err = Config::load_from(&path, None).unwrap_err();
        assert!(format!("{err:#}").contains("parsing config file"));
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let dir = tempdir().unwrap();
        let err = Config::load_from(&dir.path().join("none.yaml"), Some("  ")).unwrap_err();
        assert!(err.to_string().contains("api_base_url"));
    }
}
