//! Configuration system.
//!
//! Reads the same `hosts.yml` that `gh auth login` maintains, so the
//! extension sees the user's existing login state.

mod file_config;
mod memory_config;

pub use file_config::FileConfig;
pub use memory_config::MemoryConfig;

use crate::instance::{self, GITHUB_COM};

/// Configuration directory path (usually ~/.config/gh).
pub fn config_dir() -> std::path::PathBuf {
    if let Ok(dir) = std::env::var("GH_CONFIG_DIR") {
        return std::path::PathBuf::from(dir);
    }
    dirs::config_dir().map_or_else(
        || {
            dirs::home_dir()
                .unwrap_or_else(|| std::path::PathBuf::from("."))
                .join(".config")
                .join("gh")
        },
        |d| d.join("gh"),
    )
}

/// Configuration trait for accessing settings.
pub trait Config: Send + Sync + std::fmt::Debug {
    /// Get the list of configured hosts.
    fn hosts(&self) -> Vec<String>;

    /// Get the host commands should talk to when none is given.
    ///
    /// # Errors
    ///
    /// Returns an error if the default host cannot be determined.
    fn default_host(&self) -> anyhow::Result<String> {
        Ok(default_host_for(&self.hosts()))
    }

    /// Get authentication configuration.
    fn authentication(&self) -> &dyn AuthConfig;
}

/// Authentication configuration trait.
pub trait AuthConfig: Send + Sync + std::fmt::Debug {
    /// Get the active token for a hostname. Returns (token, source).
    fn active_token(&self, hostname: &str) -> Option<(String, String)>;

    /// Get the active username for a hostname.
    fn active_user(&self, hostname: &str) -> Option<String>;
}

/// Pick the default host from the configured hosts.
///
/// A single configured host wins; otherwise github.com.
pub fn default_host_for(hosts: &[String]) -> String {
    match hosts {
        [only] => only.clone(),
        _ => GITHUB_COM.to_string(),
    }
}

/// Look up an auth token for a hostname in the environment.
///
/// Enterprise servers read `GH_ENTERPRISE_TOKEN`/`GITHUB_ENTERPRISE_TOKEN`;
/// github.com and GHE.com tenants read `GH_TOKEN`/`GITHUB_TOKEN`.
/// Returns (token, variable name).
pub fn token_from_env(hostname: &str) -> Option<(String, String)> {
    let keys: &[&str] = if instance::is_enterprise(hostname) {
        &["GH_ENTERPRISE_TOKEN", "GITHUB_ENTERPRISE_TOKEN"]
    } else {
        &["GH_TOKEN", "GITHUB_TOKEN"]
    };
    keys.iter().find_map(|key| {
        std::env::var(key)
            .ok()
            .filter(|v| !v.is_empty())
            .map(|v| (v, (*key).to_string()))
    })
}
