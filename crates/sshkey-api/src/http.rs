//! HTTP client construction.
//!
//! Provides default headers, User-Agent, Accept, and verbose-logging
//! configuration.

use reqwest::header::{self, HeaderMap, HeaderValue};
use tracing::debug;

/// Options for constructing an HTTP client.
#[derive(Debug)]
pub struct HttpClientOptions {
    /// Application version for User-Agent.
    pub app_version: String,
    /// Enable verbose HTTP logging.
    pub log_verbose: bool,
}

/// Build a reqwest client with default configuration.
///
/// # Errors
///
/// Returns an error if the client cannot be constructed.
pub fn build_client(opts: &HttpClientOptions) -> anyhow::Result<reqwest::Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::USER_AGENT,
        HeaderValue::from_str(&format!("gh-ssh-key {}", opts.app_version))?,
    );
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/vnd.github+json"),
    );

    if opts.log_verbose {
        debug!("Building HTTP client with verbose logging");
    }

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .connection_verbose(opts.log_verbose)
        .build()?;

    Ok(client)
}

/// Format an authorization header value from a token.
pub fn auth_header_value(token: &str) -> String {
    format!("token {token}")
}
