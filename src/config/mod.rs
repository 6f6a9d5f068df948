//
//  bitbucket-provider
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Provider-level settings: where the API lives and how to authenticate.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/bbtf/config.toml`
//! - **macOS**: `~/Library/Application Support/bbtf/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\bbtf\config.toml`
//!
//! A missing file is not an error; every field has a default.
//!
//! ## Example Configuration File
//!
//! ```toml
//! username = "jdoe"
//! password = "app-password"
//! base_url = "https://api.bitbucket.org/"
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Field |
//! |----------|-------|
//! | `BITBUCKET_USERNAME` | `username` |
//! | `BITBUCKET_PASSWORD` | `password` |
//! | `BITBUCKET_TOKEN` | `token` |
//! | `BITBUCKET_BASE_URL` | `base_url` |

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_BASE_URL;
use crate::auth::AuthCredential;

/// Provider configuration.
///
/// # Examples
///
/// ```rust
/// use bitbucket_provider::config::ProviderConfig;
///
/// let config = ProviderConfig::default();
/// assert_eq!(config.base_url, "https://api.bitbucket.org/");
/// assert!(config.credential().is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Bitbucket username for app password authentication.
    #[serde(default)]
    pub username: Option<String>,

    /// App password paired with `username`.
    #[serde(default)]
    pub password: Option<String>,

    /// Access token; takes precedence over username/password when set.
    #[serde(default)]
    pub token: Option<String>,

    /// API root the `2.0/...` paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            username: None,
            password: None,
            token: None,
            base_url: default_base_url(),
        }
    }
}

impl ProviderConfig {
    /// Loads configuration from the default location, then applies
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let mut config = Self::load_from(&path)?;
        config.apply_env(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Loads configuration from a specific file.
    ///
    /// Returns the defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config file at {}", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Overrides fields from environment variables.
    ///
    /// `lookup` is `std::env::var` in production; tests pass a closure over a map.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(username) = lookup("BITBUCKET_USERNAME") {
            self.username = Some(username);
        }
        if let Some(password) = lookup("BITBUCKET_PASSWORD") {
            self.password = Some(password);
        }
        if let Some(token) = lookup("BITBUCKET_TOKEN") {
            self.token = Some(token);
        }
        if let Some(base_url) = lookup("BITBUCKET_BASE_URL") {
            self.base_url = base_url;
        }
    }

    /// Resolves the configured credential, if any.
    ///
    /// A non-empty token wins; otherwise both username and password must be
    /// set. Anything else means anonymous access.
    pub fn credential(&self) -> Option<AuthCredential> {
        if let Some(token) = self.token.as_deref().filter(|t| !t.is_empty()) {
            return Some(AuthCredential::bearer(token));
        }

        match (self.username.as_deref(), self.password.as_deref()) {
            (Some(username), Some(password)) if !username.is_empty() => {
                Some(AuthCredential::app_password(username, password))
            }
            _ => None,
        }
    }

    /// Returns the path to the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "bbtf")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}
