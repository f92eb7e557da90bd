// SPDX-License-Identifier: MIT
// Copyright 2026 Trenvus Contributors

//! Client configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local development.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const DEFAULT_STORAGE_PATH: &str = "trenvus-storage.json";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Client configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the wallet REST API (no trailing slash)
    pub api_base_url: String,
    /// File backing durable client storage
    pub storage_path: PathBuf,
    /// Per-request HTTP timeout
    pub http_timeout: Duration,
    /// System language hint used to pick the initial locale (e.g. "pt_BR.UTF-8")
    pub system_language: Option<String>,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            storage_path: env::temp_dir().join(DEFAULT_STORAGE_PATH),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
            system_language: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let api_base_url = env::var("TRENVUS_API_BASE_URL")
            .map(|v| v.trim().to_string())
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());
        if !api_base_url.starts_with("http://") && !api_base_url.starts_with("https://") {
            return Err(ConfigError::Invalid {
                name: "TRENVUS_API_BASE_URL",
                reason: "must be an absolute http(s) URL".to_string(),
            });
        }

        let http_timeout_secs = match env::var("TRENVUS_HTTP_TIMEOUT_SECS") {
            Ok(v) => v.trim().parse::<u64>().map_err(|e| ConfigError::Invalid {
                name: "TRENVUS_HTTP_TIMEOUT_SECS",
                reason: e.to_string(),
            })?,
            Err(_) => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        Ok(Self {
            api_base_url: normalize_base_url(&api_base_url),
            storage_path: env::var("TRENVUS_STORAGE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORAGE_PATH)),
            http_timeout: Duration::from_secs(http_timeout_secs),
            system_language: env::var("TRENVUS_LANG").or_else(|_| env::var("LANG")).ok(),
        })
    }

    /// Test configuration pointing at a specific API base URL.
    pub fn with_base_url(api_base_url: &str) -> Self {
        Self {
            api_base_url: normalize_base_url(api_base_url),
            ..Self::default()
        }
    }
}

/// Strip a single trailing slash so paths can be appended verbatim.
fn normalize_base_url(url: &str) -> String {
    url.strip_suffix('/').unwrap_or(url).to_string()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}
