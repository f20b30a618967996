//! CLI configuration management
//!
//! Handles loading and saving CLI-specific configuration.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default fleet API endpoint
pub const DEFAULT_API_URL: &str = "https://api.balena-cloud.com";

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CliConfig {
    /// Fleet API base URL
    pub api_url: String,

    /// API token sent as bearer credential
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout: 30,
        }
    }
}

impl CliConfig {
    /// Load configuration from `path`, or defaults if the file doesn't exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read CLI config file {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse CLI config file {}", path.display()))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize CLI config")?;

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write CLI config file {}", path.display()))?;

        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// `~/.config/fleetctl/config.toml` on Linux.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir =
            dirs::config_dir().ok_or_else(|| anyhow::anyhow!("Cannot determine config directory"))?;

        Ok(config_dir.join("fleetctl").join("config.toml"))
    }

    /// Token with all but its first four characters hidden
    pub fn masked_token(&self) -> Option<String> {
        self.token.as_ref().map(|token| {
            let visible: String = token.chars().take(4).collect();
            if token.chars().count() > 8 {
                format!("{}********", visible)
            } else {
                "********".to_string()
            }
        })
    }

    /// Create a new builder for constructing configuration
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }
}

/// Builder for CLI configuration with validation and priority chain support
///
/// Priority chain (lowest to highest):
/// 1. Defaults
/// 2. Config file
/// 3. Environment variables (`FLEET_API_URL`, `FLEET_TOKEN`, `FLEET_TIMEOUT`)
/// 4. CLI arguments
///
/// Apply sources from highest to lowest priority: a value already set is
/// never overwritten by a later source.
#[derive(Debug, Default)]
pub struct ConfigBuilder {
    api_url: Option<String>,
    token: Option<String>,
    timeout: Option<u64>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set API URL (with validation)
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        Self::validate_url(&url)?;
        self.api_url = Some(url);
        Ok(self)
    }

    /// Set API token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set timeout (with validation)
    pub fn with_timeout(mut self, timeout: u64) -> Result<Self> {
        Self::validate_timeout(timeout)?;
        self.timeout = Some(timeout);
        Ok(self)
    }

    /// Fill unset values from the config file at `path`
    pub fn with_config_file(self, path: &Path) -> Result<Self> {
        let config = CliConfig::load_from(path)?;

        Ok(Self {
            api_url: self.api_url.or(Some(config.api_url)),
            token: self.token.or(config.token),
            timeout: self.timeout.or(Some(config.timeout)),
        })
    }

    /// Fill unset values from environment variables
    ///
    /// Invalid values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if self.api_url.is_none() {
            if let Ok(api_url) = std::env::var("FLEET_API_URL") {
                if Self::validate_url(&api_url).is_ok() {
                    self.api_url = Some(api_url);
                }
            }
        }

        if self.token.is_none() {
            if let Ok(token) = std::env::var("FLEET_TOKEN") {
                if !token.trim().is_empty() {
                    self.token = Some(token.trim().to_string());
                }
            }
        }

        if self.timeout.is_none() {
            if let Ok(timeout) = std::env::var("FLEET_TIMEOUT") {
                if let Ok(timeout) = timeout.parse() {
                    if Self::validate_timeout(timeout).is_ok() {
                        self.timeout = Some(timeout);
                    }
                }
            }
        }

        self
    }

    /// Build the final configuration with validation
    pub fn build(self) -> Result<CliConfig> {
        let defaults = CliConfig::default();

        let api_url = self.api_url.unwrap_or(defaults.api_url);
        let timeout = self.timeout.unwrap_or(defaults.timeout);

        // Values from the config file bypass the setters
        Self::validate_url(&api_url)?;
        Self::validate_timeout(timeout)?;

        Ok(CliConfig {
            api_url,
            token: self.token.or(defaults.token),
            timeout,
        })
    }

    /// Validate URL format
    fn validate_url(url: &str) -> Result<()> {
        if url.is_empty() {
            return Err(anyhow::anyhow!("API URL cannot be empty"));
        }

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "API URL must start with http:// or https://"
            ));
        }

        Ok(())
    }

    /// Validate timeout value
    fn validate_timeout(timeout: u64) -> Result<()> {
        if timeout == 0 {
            return Err(anyhow::anyhow!("Timeout must be greater than 0"));
        }

        if timeout > 300 {
            return Err(anyhow::anyhow!(
                "Timeout must be less than or equal to 300 seconds"
            ));
        }

        Ok(())
    }
}
