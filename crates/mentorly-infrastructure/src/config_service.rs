//! Client configuration.
//!
//! This module provides a ConfigService that loads the client configuration
//! from the configuration file (~/.config/mentorly/config.toml).

use crate::paths::MentorlyPaths;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const BASE_URL_ENV: &str = "MENTORLY_BASE_URL";
pub const SESSION_COOKIE_ENV: &str = "MENTORLY_SESSION_COOKIE";

/// Connection settings of the mentoring server client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Server origin, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout. A request running longer fails as a transport
    /// error.
    pub request_timeout_secs: u64,
    /// Value of the `Cookie` header carrying the logged-in mentor session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_cookie: Option<String>,
}

impl ClientConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Applies environment overrides, looked up through `lookup`.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
            self.base_url = url;
        }
        if let Some(cookie) = lookup(SESSION_COOKIE_ENV).filter(|v| !v.trim().is_empty()) {
            self.session_cookie = Some(cookie);
        }
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            session_cookie: None,
        }
    }
}

/// Configuration service that loads and caches the client configuration.
///
/// A missing file yields the defaults; the cache is filled on first access.
#[derive(Debug, Clone)]
pub struct ConfigService {
    paths: MentorlyPaths,
    config: Arc<RwLock<Option<ClientConfig>>>,
}

impl ConfigService {
    pub fn new(paths: MentorlyPaths) -> Self {
        Self {
            paths,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration with environment overrides applied, loading it
    /// from file if not cached.
    pub fn get_config(&self) -> Result<ClientConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let loaded = self
            .load_file()?
            .with_overrides(|key| std::env::var(key).ok());

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Reads the config file as stored, without environment overrides.
    pub fn load_file(&self) -> Result<ClientConfig> {
        let path = self.config_path()?;
        if !path.exists() {
            tracing::debug!("[ConfigService] {} not found, using defaults", path.display());
            return Ok(ClientConfig::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: ClientConfig =
            toml::from_str(&raw).with_context(|| format!("Failed to parse {}", path.display()))?;
        tracing::debug!("[ConfigService] Loaded config from {}", path.display());
        Ok(config)
    }

    /// Writes `config` to the config file and drops the cached copy.
    pub fn save(&self, config: &ClientConfig) -> Result<PathBuf> {
        let path = self.config_path()?;
        if let Some(parent) = path.parent() {
            MentorlyPaths::ensure_dir(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let raw = toml::to_string_pretty(config).context("Failed to serialize config")?;
        std::fs::write(&path, raw).with_context(|| format!("Failed to write {}", path.display()))?;
        self.invalidate_cache();
        tracing::info!("[ConfigService] Saved config to {}", path.display());
        Ok(path)
    }

    /// Writes the default config unless a file already exists.
    ///
    /// Returns the path and whether a file was created.
    pub fn init(&self) -> Result<(PathBuf, bool)> {
        let path = self.config_path()?;
        if path.exists() {
            return Ok((path, false));
        }
        let path = self.save(&ClientConfig::default())?;
        Ok((path, true))
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        Ok(self.paths.config_file()?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new(MentorlyPaths::default())
    }
}
