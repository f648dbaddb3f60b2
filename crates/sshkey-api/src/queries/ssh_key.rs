//! SSH key API operations.

use std::io::Read;

use serde::Serialize;
use tracing::debug;

use crate::client::Client;
use crate::errors::ApiError;

/// REST path for the authenticated user's public keys.
pub const USER_KEYS_PATH: &str = "user/keys";

/// Errors from uploading a public key.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum UploadKeyError {
    /// The token lacks the `write:public_key` scope.
    ///
    /// GitHub hides `user/keys` behind a 404 for such tokens.
    #[error("insufficient OAuth scopes")]
    InsufficientScopes,

    /// The key could not be read from its source.
    #[error(transparent)]
    Read(#[from] std::io::Error),

    /// Any other API failure.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Request body for `POST user/keys`.
#[derive(Debug, Serialize)]
pub struct KeyUploadRequest<'a> {
    /// Human-readable label; may be empty.
    pub title: &'a str,
    /// The public key exactly as read from its source.
    pub key: &'a str,
}

/// Upload a public SSH key to the authenticated user's account on `hostname`.
///
/// The reader is consumed to the end and its bytes are sent unmodified.
/// Exactly one request is made.
///
/// # Errors
///
/// Returns [`UploadKeyError::InsufficientScopes`] when the server answers
/// 404, [`UploadKeyError::Read`] if the key cannot be read, and
/// [`UploadKeyError::Api`] for transport failures and other error statuses.
pub async fn upload_key(
    client: &Client,
    hostname: &str,
    key: &mut dyn Read,
    title: &str,
) -> Result<(), UploadKeyError> {
    let mut key_bytes = Vec::new();
    key.read_to_end(&mut key_bytes)?;
    let key_text = String::from_utf8_lossy(&key_bytes);

    debug!(hostname, bytes = key_bytes.len(), "uploading SSH public key");

    let body = KeyUploadRequest {
        title,
        key: &key_text,
    };
    let resp = client
        .send(reqwest::Method::POST, hostname, USER_KEYS_PATH, Some(&body))
        .await?;

    if resp.status() == reqwest::StatusCode::NOT_FOUND {
        return Err(UploadKeyError::InsufficientScopes);
    }

    let resp = Client::check_response(resp, hostname).await?;
    resp.bytes().await.map_err(ApiError::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io;

    use std::sync::Arc;

    use pretty_assertions::assert_eq;
    use sshkey_core::config::MemoryConfig;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const KEY: &str = "ssh-ed25519 AAAAC3NzaC1lZDI1NTE5AAAAIKeyMaterial monalisa@laptop\n";

    fn test_client(server: &MockServer) -> Client {
        let config = MemoryConfig::new().with_host("github.com", "monalisa", "ghp_test");
        Client::new(reqwest::Client::new())
            .with_auth(Arc::new(config))
            .with_url_override(format!("{}/", server.uri()))
    }

    #[tokio::test]
    async fn test_should_post_key_and_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/keys"))
            .and(header("Authorization", "token ghp_test"))
            .and(body_json(serde_json::json!({"title": "laptop", "key": KEY})))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"id": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut reader = io::Cursor::new(KEY.as_bytes().to_vec());
        upload_key(&client, "github.com", &mut reader, "laptop")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_should_send_empty_title() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/keys"))
            .and(body_json(serde_json::json!({"title": "", "key": "ssh-rsa AAAA"})))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut reader = io::Cursor::new(b"ssh-rsa AAAA".to_vec());
        upload_key(&client, "github.com", &mut reader, "")
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_should_map_not_found_to_insufficient_scopes() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/keys"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "Not Found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut reader = io::Cursor::new(KEY.as_bytes().to_vec());
        let err = upload_key(&client, "github.com", &mut reader, "")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadKeyError::InsufficientScopes));
    }

    #[tokio::test]
    async fn test_should_return_api_error_for_other_failures() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/user/keys"))
            .respond_with(ResponseTemplate::new(422).set_body_json(serde_json::json!({
                "message": "Validation Failed",
                "errors": [{"message": "key is already in use"}]
            })))
            .mount(&server)
            .await;

        let client = test_client(&server);
        let mut reader = io::Cursor::new(KEY.as_bytes().to_vec());
        let err = upload_key(&client, "github.com", &mut reader, "")
            .await
            .unwrap_err();

        let UploadKeyError::Api(api) = err else {
            panic!("expected Api error, got {err:?}");
        };
        assert!(matches!(api, ApiError::Http { status: 422, .. }));
        assert_eq!(
            api.to_string(),
            "HTTP 422: Validation Failed (key is already in use)"
        );
    }

    #[tokio::test]
    async fn test_should_not_send_request_when_read_fails() {
        struct Broken;
        impl Read for Broken {
            fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
                Err(io::Error::other("device gone"))
            }
        }

        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let client = test_client(&server);
        let err = upload_key(&client, "github.com", &mut Broken, "")
            .await
            .unwrap_err();
        assert!(matches!(err, UploadKeyError::Read(_)));
        assert_eq!(err.to_string(), "device gone");
    }

    #[test]
    fn test_should_serialize_request_body() {
        let body = KeyUploadRequest {
            title: "laptop",
            key: "ssh-ed25519 AAAA",
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({"title": "laptop", "key": "ssh-ed25519 AAAA"}),
        );
    }
}
