//! Client configuration resolved from the environment

use std::env;

use crate::error::{Error, Result};

/// Production API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.mymoodai.app/rest/api";

/// Environment variable holding the base URL
pub const BASE_URL_ENV: &str = "MYMOOD_BASE_URL";

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "MYMOOD_API_KEY";

/// MyMood client configuration
#[derive(Clone)]
pub struct Config {
    pub base_url: String,
    pub api_key: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url)
            .field("api_key", &self.redacted_api_key())
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: None,
        }
    }
}

impl Config {
    /// Load and validate configuration from `MYMOOD_BASE_URL` and `MYMOOD_API_KEY`
    pub fn from_env() -> Result<Self> {
        let config = Self::read_env();
        config.validate()?;
        Ok(config)
    }

    /// Read the environment without validating
    ///
    /// Callers layering overrides on top validate once they are applied.
    pub fn read_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset. Nothing is validated here.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            base_url: non_empty(BASE_URL_ENV).unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            api_key: non_empty(API_KEY_ENV),
        }
    }

    /// Override the base URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Override the API key; an empty key clears it
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        let key = key.into();
        self.api_key = (!key.trim().is_empty()).then_some(key);
        self
    }

    /// API key with everything but the last four characters hidden
    pub fn redacted_api_key(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| {
            let chars: Vec<char> = key.chars().collect();
            if chars.len() <= 4 {
                "***".to_string()
            } else {
                let suffix: String = chars[chars.len() - 4..].iter().collect();
                format!("***{}", suffix)
            }
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        let base = self.base_url.trim();
        if base.is_empty() {
            return Err(Error::ConfigError("base URL must not be empty".to_string()));
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(Error::ConfigError(format!(
                "base URL '{}' must start with http:// or https://",
                base
            )));
        }
        Ok(())
    }
}
