//! Keyring-based token lookup.
//!
//! `gh auth login` stores tokens in the OS-native credential store
//! (Keychain on macOS, etc.) under the service `gh:<hostname>`.

use anyhow::{Context, Result};

/// Keyring service name for a hostname.
pub fn service_name(hostname: &str) -> String {
    format!("gh:{hostname}")
}

/// Retrieve a token from the OS keyring.
///
/// `username` is the account the token was stored under; older logins use
/// an empty username.
///
/// # Errors
///
/// Returns an error if the keyring operation fails.
pub fn get_token(hostname: &str, username: &str) -> Result<Option<String>> {
    let entry = keyring::Entry::new(&service_name(hostname), username)
        .context("failed to create keyring entry")?;

    match entry.get_password() {
        Ok(token) => Ok(Some(token)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(anyhow::anyhow!("keyring error: {e}")),
    }
}
