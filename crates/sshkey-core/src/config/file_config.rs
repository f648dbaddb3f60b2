//! File-based configuration implementation.
//!
//! Reads hosts.yml in the GH config directory.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use super::{AuthConfig, Config, config_dir, default_host_for};
use crate::errors::ConfigError;
use crate::{instance, keyring_store};

/// File-based configuration backed by YAML files.
#[derive(Debug, Default)]
pub struct FileConfig {
    hosts: HashMap<String, HostConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct HostConfig {
    #[serde(default)]
    oauth_token: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default)]
    users: HashMap<String, UserEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct UserEntry {
    #[serde(default)]
    oauth_token: Option<String>,
}

impl FileConfig {
    /// Load configuration from the default config directory.
    ///
    /// # Errors
    ///
    /// Returns an error if config files cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_dir())
    }

    /// Load configuration from a specific directory.
    ///
    /// A missing or empty hosts.yml yields an empty configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if hosts.yml exists but cannot be read or parsed.
    pub fn load_from(dir: &Path) -> Result<Self, ConfigError> {
        let hosts_path = dir.join("hosts.yml");

        let hosts = if hosts_path.exists() {
            let content = fs::read_to_string(&hosts_path).map_err(|e| ConfigError::ReadFile {
                path: hosts_path.display().to_string(),
                source: e,
            })?;
            if content.trim().is_empty() {
                HashMap::new()
            } else {
                serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
                    path: hosts_path.display().to_string(),
                    message: e.to_string(),
                })?
            }
        } else {
            HashMap::new()
        };

        debug!(path = %hosts_path.display(), hosts = hosts.len(), "loaded hosts config");

        Ok(Self { hosts })
    }

    fn config_token(&self, hostname: &str) -> Option<String> {
        let host = self.hosts.get(hostname)?;
        if let Some(token) = host.oauth_token.as_ref().filter(|t| !t.is_empty()) {
            return Some(token.clone());
        }
        let user = host.user.as_ref()?;
        host.users
            .get(user)?
            .oauth_token
            .clone()
            .filter(|t| !t.is_empty())
    }
}

impl Config for FileConfig {
    fn hosts(&self) -> Vec<String> {
        let mut hosts: Vec<String> = self.hosts.keys().cloned().collect();
        hosts.sort();
        hosts
    }

    fn default_host(&self) -> anyhow::Result<String> {
        if let Ok(host) = std::env::var("GH_HOST")
            && !host.is_empty()
        {
            return Ok(instance::normalize_hostname(&host));
        }
        Ok(default_host_for(&Config::hosts(self)))
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for FileConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        if let Some(found) = super::token_from_env(hostname) {
            return Some(found);
        }

        if let Some(token) = self.config_token(hostname) {
            return Some((token, "oauth_token".to_string()));
        }

        let user = self.active_user(hostname).unwrap_or_default();
        match keyring_store::get_token(hostname, &user) {
            Ok(Some(token)) => Some((token, "keyring".to_string())),
            Ok(None) => None,
            Err(e) => {
                debug!(hostname, error = %e, "keyring lookup failed");
                None
            }
        }
    }

    fn active_user(&self, hostname: &str) -> Option<String> {
        self.hosts.get(hostname)?.user.clone()
    }
}
