//! API error types.

/// HTTP API error with status code and message.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// HTTP error response.
    #[error("HTTP {status}: {message}{}", suggestion_suffix(.scopes_suggestion.as_deref()))]
    Http {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
        /// Suggested OAuth scopes to fix the error.
        scopes_suggestion: Option<String>,
    },

    /// Network/transport error.
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

fn suggestion_suffix(suggestion: Option<&str>) -> String {
    suggestion.map(|s| format!("\n{s}")).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http_error(status: u16, message: &str) -> ApiError {
        ApiError::Http {
            status,
            message: message.to_string(),
            scopes_suggestion: None,
        }
    }

    #[test]
    fn test_should_display_http_error() {
        let err = http_error(422, "Validation Failed");
        assert_eq!(err.to_string(), "HTTP 422: Validation Failed");
    }

    #[test]
    fn test_should_append_scopes_suggestion_to_display() {
        let err = ApiError::Http {
            status: 403,
            message: "Forbidden".to_string(),
            scopes_suggestion: Some("needs admin:public_key".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 403: Forbidden\nneeds admin:public_key");
    }
}
