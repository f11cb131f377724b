//! Connection settings for the REST backend and the media CDN.

use std::time::Duration;

use serde::Deserialize;

use crate::error::{ViewError, ViewResult};

fn default_timeout_ms() -> u64 {
    10_000
}

/// Where the REST backend lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BackendConfig {
    /// Base URL, e.g. `https://api.example.com/v1`.
    pub base_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api".to_string(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl BackendConfig {
    /// Parse from JSON, e.g. `{"base_url": "https://api.example.com"}`, and validate.
    pub fn from_json_str(input: &str) -> ViewResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ViewResult<()> {
        validate_url("base_url", &self.base_url)?;
        validate_timeout(self.timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// `base_url` joined with `path` by exactly one slash.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Upload endpoint of the media CDN.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CdnConfig {
    pub upload_url: String,
    /// Unsigned upload preset sent with every file, if the CDN needs one.
    #[serde(default)]
    pub upload_preset: Option<String>,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl CdnConfig {
    pub fn from_json_str(input: &str) -> ViewResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ViewResult<()> {
        validate_url("upload_url", &self.upload_url)?;
        validate_timeout(self.timeout_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

fn validate_url(name: &str, url: &str) -> ViewResult<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(ViewError::InvalidOption {
            message: format!("{name} must be an http(s) URL, got '{url}'"),
        })
    }
}

fn validate_timeout(timeout_ms: u64) -> ViewResult<()> {
    if timeout_ms == 0 {
        return Err(ViewError::InvalidOption {
            message: "timeout_ms must be > 0".to_string(),
        });
    }
    Ok(())
}
