// src/server/config.rs
//! Configuration file parsing for the recipe service
//!
//! Supports TOML configuration files with the following sections:
//! - [server] - Bind address
//! - [storage] - Database location
//! - [services] - Base URLs of the user and ingredient services, call timeout,
//!   lookup worker count

use crate::recipes::lines::LOOKUP_THREADS;
use crate::server::ServerConfig;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// TOML configuration file structure
#[derive(Debug, Default, Deserialize)]
pub struct RecipesConfig {
    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub storage: StorageSection,

    #[serde(default)]
    pub services: ServicesSection,
}

/// Server configuration section
#[derive(Debug, Deserialize)]
pub struct ServerSection {
    /// Public API bind address
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

/// Storage configuration section
#[derive(Debug, Deserialize)]
pub struct StorageSection {
    /// SQLite database holding recipe skeletons
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
        }
    }
}

fn default_db_path() -> PathBuf {
    PathBuf::from("/var/lib/chomp/recipes.db")
}

/// Owning services
#[derive(Debug, Deserialize)]
pub struct ServicesSection {
    #[serde(default = "default_user_url")]
    pub user_url: String,

    #[serde(default = "default_ingredient_url")]
    pub ingredient_url: String,

    /// Per-call timeout for lookups (e.g. "10s", "1m")
    #[serde(default = "default_request_timeout")]
    pub request_timeout: String,

    /// Threads available to concurrent ingredient lookups
    #[serde(default = "default_lookup_threads")]
    pub lookup_threads: usize,
}

impl Default for ServicesSection {
    fn default() -> Self {
        Self {
            user_url: default_user_url(),
            ingredient_url: default_ingredient_url(),
            request_timeout: default_request_timeout(),
            lookup_threads: default_lookup_threads(),
        }
    }
}

fn default_user_url() -> String {
    "http://localhost:8081".to_string()
}

fn default_ingredient_url() -> String {
    "http://localhost:8082".to_string()
}

fn default_request_timeout() -> String {
    "10s".to_string()
}

fn default_lookup_threads() -> usize {
    LOOKUP_THREADS
}

impl RecipesConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: RecipesConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind
            .parse::<SocketAddr>()
            .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?;

        validate_service_url("services.user_url", &self.services.user_url)?;
        validate_service_url("services.ingredient_url", &self.services.ingredient_url)?;

        let timeout = parse_duration(&self.services.request_timeout)?;
        if timeout.is_zero() {
            anyhow::bail!("services.request_timeout must be greater than zero");
        }

        if self.services.lookup_threads == 0 {
            anyhow::bail!("services.lookup_threads must be greater than zero");
        }

        if self.storage.db_path.as_os_str().is_empty() {
            anyhow::bail!("storage.db_path must not be empty");
        }

        Ok(())
    }

    /// Convert to the runtime server configuration
    pub fn to_server_config(&self) -> Result<ServerConfig> {
        Ok(ServerConfig {
            bind_addr: self
                .server
                .bind
                .parse()
                .with_context(|| format!("Invalid server.bind address: {}", self.server.bind))?,
            db_path: self.storage.db_path.clone(),
            user_url: self.services.user_url.clone(),
            ingredient_url: self.services.ingredient_url.clone(),
            request_timeout: parse_duration(&self.services.request_timeout)?,
            lookup_threads: self.services.lookup_threads,
        })
    }
}

fn validate_service_url(field: &str, value: &str) -> Result<()> {
    let url = Url::parse(value).with_context(|| format!("Invalid {}: {}", field, value))?;
    if !matches!(url.scheme(), "http" | "https") {
        anyhow::bail!("{} must be an http(s) URL, got {}", field, value);
    }
    Ok(())
}

/// Parse a human-readable duration string (e.g., "500ms", "15m", "30s")
pub fn parse_duration(s: &str) -> Result<Duration> {
    let s = s.trim().to_lowercase();

    if let Some(num_str) = s.strip_suffix("ms") {
        let num: u64 = num_str
            .trim()
            .parse()
            .with_context(|| format!("Invalid duration number: {}", num_str))?;
        return Ok(Duration::from_millis(num));
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('h') {
        (n, 60 * 60)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else {
        // Assume seconds
        (s.as_str(), 1)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration number: {}", num_str))?;

    let secs = num
        .checked_mul(multiplier)
        .with_context(|| format!("Duration too large: {}", s))?;

    Ok(Duration::from_secs(secs))
}
