//! Authenticated GitHub REST client.
//!
//! The client is not tied to one host: the target hostname is passed per
//! request, and the `Authorization` header is resolved for that host at
//! send time from the configured credentials.

use std::collections::HashSet;
use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::ApiError;
use crate::http::auth_header_value;
use sshkey_core::config::Config;
use sshkey_core::instance;

/// GitHub API client wrapping reqwest with auth and error handling.
///
/// Tokens are held as [`SecretString`] from lookup to header, so they never
/// reach logs or `Debug` output.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    /// Credentials looked up per request hostname.
    auth: Option<Arc<dyn Config>>,
    /// Optional base URL override for testing (e.g., `"http://127.0.0.1:PORT/"`).
    api_url_override: Option<String>,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("auth", &self.auth.as_ref().map(|_| "[REDACTED]"))
            .field("api_url_override", &self.api_url_override)
            .finish_non_exhaustive()
    }
}

/// Error body returned by the GitHub REST API.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
    #[serde(default)]
    errors: Vec<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(default)]
    message: Option<String>,
}

impl Client {
    /// Create a client with no credentials.
    pub fn new(http: reqwest::Client) -> Self {
        Self {
            http,
            auth: None,
            api_url_override: None,
        }
    }

    /// Resolve request tokens from the given configuration.
    #[must_use]
    pub fn with_auth(mut self, config: Arc<dyn Config>) -> Self {
        self.auth = Some(config);
        self
    }

    /// Set a base URL override for testing.
    ///
    /// When set, all REST requests are routed to this base URL instead of
    /// the host's API. The URL should include the trailing slash, e.g.,
    /// `"http://127.0.0.1:8080/"`.
    #[must_use]
    pub fn with_url_override(mut self, url: String) -> Self {
        self.api_url_override = Some(url);
        self
    }

    fn token_for(&self, hostname: &str) -> Option<SecretString> {
        let config = self.auth.as_ref()?;
        let (token, source) = config.authentication().active_token(hostname)?;
        debug!(hostname, source, "resolved auth token");
        Some(SecretString::from(token))
    }

    /// Build a request with authentication headers applied.
    fn authed_request(
        &self,
        method: reqwest::Method,
        hostname: &str,
        url: &str,
    ) -> reqwest::RequestBuilder {
        let mut req = self.http.request(method, url);
        if let Some(token) = self.token_for(hostname) {
            req = req.header(
                reqwest::header::AUTHORIZATION,
                auth_header_value(token.expose_secret()),
            );
        }
        req
    }

    /// Send a REST request without inspecting the response status.
    ///
    /// Callers that give special meaning to some statuses check them first
    /// and hand the rest to [`check_response`](Self::check_response).
    ///
    /// # Errors
    ///
    /// Returns an error on network failure.
    pub async fn send<B: Serialize + ?Sized>(
        &self,
        method: reqwest::Method,
        hostname: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.resolve_rest_url(hostname, path);
        debug!(%method, url, "sending REST request");
        let mut req = self.authed_request(method, hostname, &url);
        if let Some(body) = body {
            req = req.json(body);
        }
        Ok(req.send().await?)
    }

    /// Check a response for errors and return an `ApiError::Http` if the
    /// status is not successful.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` for any non-2xx status.
    pub async fn check_response(
        resp: reqwest::Response,
        hostname: &str,
    ) -> Result<reqwest::Response, ApiError> {
        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }

        let headers = resp.headers().clone();
        let text = resp.text().await.unwrap_or_default();
        let suggestion = generate_scopes_suggestion(
            status.as_u16(),
            hostname,
            headers
                .get("x-accepted-oauth-scopes")
                .and_then(|v| v.to_str().ok()),
            headers.get("x-oauth-scopes").and_then(|v| v.to_str().ok()),
        );
        Err(ApiError::Http {
            status: status.as_u16(),
            message: error_message(&text),
            scopes_suggestion: suggestion,
        })
    }

    fn resolve_rest_url(&self, hostname: &str, path: &str) -> String {
        let base = match self.api_url_override {
            Some(ref url) => url.clone(),
            None => instance::rest_url(hostname),
        };
        format!("{base}{}", path.trim_start_matches('/'))
    }
}

/// Turn an error response body into a readable message.
///
/// JSON bodies contribute their `message` and any detail messages; anything
/// else is returned as-is.
fn error_message(body: &str) -> String {
    let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) else {
        return body.trim().to_string();
    };
    let details: Vec<String> = parsed
        .errors
        .into_iter()
        .filter_map(|e| e.message)
        .collect();
    if details.is_empty() {
        parsed.message
    } else {
        format!("{} ({})", parsed.message, details.join(", "))
    }
}

/// Generate an OAuth scopes suggestion when a request fails with a 4xx error.
///
/// Compares the scopes the endpoint needs (`X-Accepted-OAuth-Scopes`) against
/// the scopes the token has (`X-OAuth-Scopes`).
pub fn generate_scopes_suggestion(
    status_code: u16,
    hostname: &str,
    endpoint_needs_scopes: Option<&str>,
    token_has_scopes: Option<&str>,
) -> Option<String> {
    if !(400..=499).contains(&status_code) || status_code == 422 {
        return None;
    }

    let token_scopes_str = token_has_scopes.unwrap_or("");
    if token_scopes_str.is_empty() {
        return None;
    }

    let mut got_scopes: HashSet<String> = HashSet::new();
    for s in token_scopes_str.split(',') {
        let s = s.trim().to_string();
        // Grouped scopes imply their narrower members
        if s == "user" {
            for implied in &["read:user", "user:email", "user:follow"] {
                got_scopes.insert((*implied).to_string());
            }
        } else if let Some(rest) = s.strip_prefix("admin:") {
            got_scopes.insert(format!("read:{rest}"));
            got_scopes.insert(format!("write:{rest}"));
        } else if let Some(rest) = s.strip_prefix("write:") {
            got_scopes.insert(format!("read:{rest}"));
        }
        got_scopes.insert(s);
    }

    let needs = endpoint_needs_scopes.unwrap_or("");
    for s in needs.split(',') {
        let s = s.trim();
        if s.is_empty() || got_scopes.contains(s) {
            continue;
        }
        return Some(format!(
            "This API operation needs the \"{s}\" scope. To request it, run:  gh auth refresh -h {} -s {s}",
            instance::normalize_hostname(hostname),
        ));
    }

    None
}
