//! Configuration Management
//!
//! Handles persistent defaults for vchs-samples. Credentials are never
//! written to disk.

use crate::vchs::media::{DEFAULT_HOSTNAME, DEFAULT_VERSION};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// User configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    /// Default API host (with or without scheme)
    #[serde(default)]
    pub hostname: Option<String>,
    /// Default API version
    #[serde(default)]
    pub version: Option<String>,
    /// Skip TLS certificate verification unless overridden
    #[serde(default)]
    pub accept_invalid_certs: bool,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("vchs-samples").join("config.json"))
    }

    /// Load configuration from disk
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring unreadable config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_path().context("No configuration directory on this platform")?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get effective host URL (CLI > config > default)
    pub fn effective_host(&self, cli: Option<&str>) -> Result<String> {
        let host = cli
            .or(self.hostname.as_deref())
            .unwrap_or(DEFAULT_HOSTNAME);
        normalize_host(host)
    }

    /// Get effective API version (CLI > config > default)
    pub fn effective_version(&self, cli: Option<&str>) -> String {
        cli.or(self.version.as_deref())
            .unwrap_or(DEFAULT_VERSION)
            .to_string()
    }

    /// A CLI `--insecure` can only turn verification off, never back on
    pub fn effective_accept_invalid_certs(&self, cli: bool) -> bool {
        cli || self.accept_invalid_certs
    }
}

/// Turn a bare hostname into an https base URL without trailing slash
pub fn normalize_host(host: &str) -> Result<String> {
    let host = host.trim();
    let with_scheme = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };
    let url = Url::parse(&with_scheme).with_context(|| format!("Invalid hostname: {}", host))?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}
