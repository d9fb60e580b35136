//! API credentials and endpoint configuration
//!
//! The access key comes from the `UNSPLASH_ACCESS_KEY` environment
//! variable, or from a JSON config file in the user's config directory:
//! - Linux: ~/.config/unsplash-wall/config.json
//! - macOS: ~/Library/Application Support/unsplash-wall/config.json
//! - Windows: %APPDATA%\unsplash-wall\config.json

use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

const ENV_ACCESS_KEY: &str = "UNSPLASH_ACCESS_KEY";

fn default_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Static Unsplash Client-ID token.
    pub access_key: String,
    /// Search API root, overridable for testing against a stub server.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("no UNSPLASH_ACCESS_KEY set and no config file at {0}")]
    Missing(PathBuf),
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl Config {
    /// Load the configuration, preferring the environment variable.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(access_key) = std::env::var(ENV_ACCESS_KEY) {
            return Ok(Config {
                access_key,
                base_url: default_base_url(),
            });
        }

        let path = Self::config_path();
        let text = std::fs::read_to_string(&path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                ConfigError::Missing(path.clone())
            } else {
                ConfigError::Io {
                    path: path.clone(),
                    source,
                }
            }
        })?;

        let config: Config = serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;

        println!("📁 Config loaded from {}", path.display());
        Ok(config)
    }

    /// Where the config file is expected to live.
    fn config_path() -> PathBuf {
        let mut path = dirs::config_dir()
            .or_else(dirs::home_dir)
            .expect("Could not determine user config directory");

        path.push("unsplash-wall");
        path.push("config.json");
        path
    }
}
