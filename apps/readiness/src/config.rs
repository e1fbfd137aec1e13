//! # Configuration
//!
//! Layered settings for the Readiness binary, lowest precedence first:
//!
//! 1. Built-in defaults
//! 2. TOML file (`--config <path>`, or `readiness.toml` in the working directory)
//! 3. Environment variables
//! 4. CLI flags (applied by the command layer)
//!
//! ## Environment Variables
//!
//! - `READINESS_DATA`: Path to the work package document
//! - `READINESS_HOST` / `READINESS_PORT`: Server bind address
//! - `READINESS_RATE_LIMIT`: Requests per second (0 disables)
//! - `READINESS_CORS_ORIGINS`: Comma-separated allowed origins, or "*"
//!
//! ## Example
//!
//! ```toml
//! [data]
//! path = "sample_data/sample_work_packages.json"
//!
//! [server]
//! host = "0.0.0.0"
//! port = 8080
//! rate_limit = 50
//! cors_origins = ["https://site.example.com"]
//! ```

use readiness_core::ReadinessError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "readiness.toml";

/// Default work package document.
pub const DEFAULT_DATA_PATH: &str = "sample_data/sample_work_packages.json";

/// Default rate limit: 100 requests per second.
pub const DEFAULT_RATE_LIMIT: u32 = 100;

// =============================================================================
// SETTINGS
// =============================================================================

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub data: DataConfig,
    pub server: ServerConfig,
}

/// Where the work packages come from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DataConfig {
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATA_PATH),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Requests per second; 0 disables rate limiting.
    pub rate_limit: u32,
    /// Allowed CORS origins. Empty means localhost only; `["*"]` allows all.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            rate_limit: DEFAULT_RATE_LIMIT,
            cors_origins: Vec::new(),
        }
    }
}

// =============================================================================
// LOADING
// =============================================================================

impl Config {
    /// Load configuration from an explicit file, the default file if it
    /// exists, or defaults; then apply environment overrides.
    pub async fn load(explicit: Option<&Path>) -> Result<Self, ReadinessError> {
        let mut config = match explicit {
            Some(path) => Self::from_file(path).await?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                let present = tokio::fs::metadata(default_path)
                    .await
                    .is_ok_and(|m| m.is_file());
                if present {
                    Self::from_file(default_path).await?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub async fn from_file(path: &Path) -> Result<Self, ReadinessError> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            ReadinessError::ConfigError(format!("Cannot read '{}': {}", path.display(), e))
        })?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Parse TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ReadinessError> {
        toml::from_str(text).map_err(|e| ReadinessError::ConfigError(e.to_string()))
    }

    /// Apply `READINESS_*` overrides through `lookup`.
    ///
    /// Unparseable numbers are logged and ignored.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let lookup = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(path) = lookup("READINESS_DATA") {
            self.data.path = PathBuf::from(path);
        }
        if let Some(host) = lookup("READINESS_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("READINESS_PORT") {
            match port.trim().parse() {
                Ok(p) => self.server.port = p,
                Err(e) => tracing::warn!("Ignoring READINESS_PORT '{}': {}", port, e),
            }
        }
        if let Some(limit) = lookup("READINESS_RATE_LIMIT") {
            match limit.trim().parse() {
                Ok(l) => self.server.rate_limit = l,
                Err(e) => tracing::warn!("Ignoring READINESS_RATE_LIMIT '{}': {}", limit, e),
            }
        }
        if let Some(origins) = lookup("READINESS_CORS_ORIGINS") {
            self.server.cors_origins = origins
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
