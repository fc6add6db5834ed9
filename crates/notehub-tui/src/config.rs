// ABOUTME: Configuration file handling.
// ABOUTME: TOML config under the user config dir, overridden by env vars, .env, and CLI flags.

use crate::error::{AppError, Result};
use notehub_client::{ApiConfig, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
}

#[derive(Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ApiSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

impl Default for ApiSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            token: None,
        }
    }
}

impl fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSection")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Values from the command line. clap also fills these from `NOTEHUB_BASE_URL`
/// and `NOTEHUB_TOKEN`, which is where `.env` entries land.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub base_url: Option<String>,
    pub token: Option<String>,
}

impl Config {
    /// Load config with precedence: CLI > env > .env > file > defaults
    pub fn load(overrides: &Overrides) -> Result<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        config.apply(overrides);
        tracing::debug!(?config, "Loaded configuration");
        Ok(config)
    }

    /// Read a config file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::Config(format!("Failed to read config: {}", e)))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn apply(&mut self, overrides: &Overrides) {
        if let Some(url) = overrides.base_url.as_deref().filter(|u| !u.trim().is_empty()) {
            self.api.base_url = url.trim().to_string();
        }
        if let Some(token) = overrides.token.as_deref().filter(|t| !t.trim().is_empty()) {
            self.api.token = Some(token.trim().to_string());
        }
    }

    /// Validated client configuration; fails when no token is set anywhere
    pub fn api_config(&self) -> Result<ApiConfig> {
        let token = self
            .api
            .token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(AppError::MissingToken)?;
        Ok(ApiConfig::new(&self.api.base_url, token)?)
    }

    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| AppError::Config(format!("Failed to create config dir: {}", e)))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| AppError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| AppError::Config(format!("Failed to write config: {}", e)))?;

        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AppError::Config("Could not find config directory".to_string()))?;
        Ok(config_dir.join("notehub").join("config.toml"))
    }
}
