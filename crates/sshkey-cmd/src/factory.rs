//! Factory for shared command dependencies.
//!
//! Provides I/O streams plus lazy initialization of configuration and the
//! API client. Supports test mode with dependency injection for isolated
//! testing.

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use sshkey_api::client::Client;
use sshkey_core::config::{Config, FileConfig};
use sshkey_core::iostreams::{IOStreams, TestOutput};

/// Shared factory providing lazily-initialized dependencies to commands.
///
/// In production mode, dependencies are created from the real system.
/// In test mode, dependencies can be injected for isolated testing.
pub struct Factory {
    /// Application version.
    pub app_version: String,
    /// I/O streams.
    pub io: IOStreams,
    /// Configuration (lazily loaded).
    config: OnceLock<Arc<dyn Config>>,

    // Test overrides
    config_dir_override: Option<PathBuf>,
    http_override: Option<reqwest::Client>,
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Factory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Factory")
            .field("app_version", &self.app_version)
            .field("io", &self.io)
            .finish_non_exhaustive()
    }
}

impl Factory {
    /// Create a new factory with the given version.
    pub fn new(app_version: String) -> Self {
        Self::with_io(app_version, IOStreams::system())
    }

    /// Create a test factory with captured I/O.
    ///
    /// Returns the factory and a `TestOutput` for reading captured stderr.
    pub fn test() -> (Self, TestOutput) {
        let (io, output) = IOStreams::test_with_output();
        (Self::with_io("test".to_string(), io), output)
    }

    fn with_io(app_version: String, io: IOStreams) -> Self {
        Self {
            app_version,
            io,
            config: OnceLock::new(),
            config_dir_override: None,
            http_override: None,
            api_url_override: None,
        }
    }

    /// Set a custom reqwest HTTP client (e.g., backed by wiremock).
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http_override = Some(client);
        self
    }

    /// Set an API URL override (wiremock server URI with trailing slash).
    ///
    /// When set, all API requests will be sent to this base URL instead of
    /// the real GitHub API.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url_override = Some(url.into());
        self
    }

    /// Set a config override for testing.
    #[must_use]
    pub fn with_config(self, config: Arc<dyn Config>) -> Self {
        let _ = self.config.set(config);
        self
    }

    /// Load the file config from this directory instead of the default one.
    #[must_use]
    pub fn with_config_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config_dir_override = Some(dir.into());
        self
    }

    /// Get the configuration, loading it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if config cannot be loaded.
    pub fn config(&self) -> anyhow::Result<Arc<dyn Config>> {
        if let Some(cfg) = self.config.get() {
            return Ok(cfg.clone());
        }
        let cfg = match self.config_dir_override {
            Some(ref dir) => FileConfig::load_from(dir)?,
            None => FileConfig::load()?,
        };
        // Ignore set error - another thread may have set it first
        let _ = self.config.set(Arc::new(cfg));
        self.config
            .get()
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("failed to initialize config"))
    }

    /// Build an API client.
    ///
    /// The client resolves tokens per request host from the configuration.
    /// In test mode, uses the injected HTTP client and URL override.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be loaded or the client cannot
    /// be built.
    pub fn http_client(&self) -> anyhow::Result<Client> {
        let config = self.config()?;

        let http = if let Some(ref client) = self.http_override {
            client.clone()
        } else {
            let opts = sshkey_api::http::HttpClientOptions {
                app_version: self.app_version.clone(),
                log_verbose: std::env::var("GH_DEBUG").is_ok(),
            };
            sshkey_api::http::build_client(&opts)?
        };

        let mut client = Client::new(http).with_auth(config);
        if let Some(ref url) = self.api_url_override {
            client = client.with_url_override(url.clone());
        }
        Ok(client)
    }
}
