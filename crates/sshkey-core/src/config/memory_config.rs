//! In-memory configuration for testing.
//!
//! Provides a [`MemoryConfig`] that implements [`Config`] and [`AuthConfig`]
//! without touching the filesystem or the environment, making it suitable
//! for tests that need deterministic configuration.

use std::collections::BTreeMap;

use super::{AuthConfig, Config};

/// In-memory configuration for testing.
///
/// # Examples
///
/// ```
/// use sshkey_core::config::{Config, MemoryConfig};
///
/// let config = MemoryConfig::new()
///     .with_host("github.com", "testuser", "ghp_token123");
///
/// let auth = config.authentication();
/// let (token, source) = auth.active_token("github.com").unwrap();
/// assert_eq!(token, "ghp_token123");
/// assert_eq!(source, "oauth_token");
/// assert_eq!(config.default_host().unwrap(), "github.com");
/// ```
#[derive(Debug, Default)]
pub struct MemoryConfig {
    /// hostname -> (user, token)
    auth: BTreeMap<String, (String, String)>,
}

impl MemoryConfig {
    /// Create a new empty in-memory configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an authenticated host with the given username and token.
    #[must_use]
    pub fn with_host(mut self, hostname: &str, username: &str, token: &str) -> Self {
        self.auth.insert(
            hostname.to_string(),
            (username.to_string(), token.to_string()),
        );
        self
    }
}

impl Config for MemoryConfig {
    fn hosts(&self) -> Vec<String> {
        self.auth.keys().cloned().collect()
    }

    fn authentication(&self) -> &dyn AuthConfig {
        self
    }
}

impl AuthConfig for MemoryConfig {
    fn active_token(&self, hostname: &str) -> Option<(String, String)> {
        let (_, token) = self.auth.get(hostname)?;
        Some((token.clone(), "oauth_token".to_string()))
    }

    fn active_user(&self, hostname: &str) -> Option<String> {
        let (user, _) = self.auth.get(hostname)?;
        Some(user.clone())
    }
}
