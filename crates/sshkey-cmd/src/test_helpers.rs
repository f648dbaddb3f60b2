//! Shared test utilities for command testing.
//!
//! Provides a factory builder backed by a wiremock server and helpers for
//! mounting the REST mocks commands talk to.

use std::sync::Arc;

use sshkey_core::config::MemoryConfig;
use sshkey_core::iostreams::TestOutput;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use crate::factory::Factory;

/// Token the default harness config holds for github.com.
pub const TEST_TOKEN: &str = "ghp_test_token_123";

/// A fully-configured test harness with factory, output capture, and mock server.
#[derive(Debug)]
pub struct TestHarness {
    /// The factory configured for testing.
    pub factory: Factory,
    /// Captured stderr output.
    pub output: TestOutput,
    /// Wiremock mock server for API requests.
    pub server: MockServer,
}

impl TestHarness {
    /// Create a new test harness with a wiremock server and default config.
    ///
    /// The factory routes all API requests to the mock server and is logged
    /// in to github.com with [`TEST_TOKEN`].
    pub async fn new() -> Self {
        Self::with_config(MemoryConfig::new().with_host("github.com", "testuser", TEST_TOKEN))
            .await
    }

    /// Create a test harness with a custom `MemoryConfig`.
    pub async fn with_config(config: MemoryConfig) -> Self {
        let server = MockServer::start().await;
        let (factory, output) = Factory::test();
        let factory = factory
            .with_http_client(reqwest::Client::new())
            .with_api_url(format!("{}/", server.uri()))
            .with_config(Arc::new(config));

        Self {
            factory,
            output,
            server,
        }
    }

    /// Get captured stderr as a string.
    pub fn stderr(&self) -> String {
        self.output.stderr()
    }
}

// --- Wiremock helpers ---

/// Mount a REST POST response mock for a specific path.
///
/// The mock must be hit exactly `times` times before the server is dropped.
pub async fn mock_rest_post(
    server: &MockServer,
    url_path: &str,
    status: u16,
    response_body: serde_json::Value,
    times: u64,
) {
    Mock::given(method("POST"))
        .and(path(url_path))
        .and(header("Authorization", format!("token {TEST_TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(status).set_body_json(response_body))
        .expect(times)
        .mount(server)
        .await;
}

/// Build a created-key response fixture.
pub fn ssh_key_fixture(id: u64, title: &str, key: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "key": key,
        "url": format!("https://api.github.com/user/keys/{id}"),
        "title": title,
        "verified": true,
        "created_at": "2024-01-15T10:00:00Z",
        "read_only": false
    })
}
