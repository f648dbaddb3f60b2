//! Command utility types shared between commands and the binary.
//!
//! Commands return these as `anyhow::Error` values; the top-level handler
//! finds them with `downcast_ref` to pick the exit behavior.

/// Error indicating a usage problem, detected before any I/O.
#[derive(Debug, thiserror::Error)]
#[error("{0}")]
pub struct FlagError(pub String);

/// Silent error - triggers exit 1 without message.
#[derive(Debug, thiserror::Error)]
#[error("")]
pub struct SilentError;

/// Check if an error is the silent-failure signal.
pub fn is_silent(err: &anyhow::Error) -> bool {
    err.downcast_ref::<SilentError>().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_should_display_flag_error() {
        let err = FlagError("public key file missing".to_string());
        assert_eq!(err.to_string(), "public key file missing");
    }

    #[test]
    fn test_should_display_silent_error() {
        let err = SilentError;
        assert_eq!(err.to_string(), "");
    }

    #[test]
    fn test_should_detect_silent_error() {
        let err: anyhow::Error = SilentError.into();
        assert!(is_silent(&err));
    }

    #[test]
    fn test_should_not_detect_flag_error_as_silent() {
        let err: anyhow::Error = FlagError("bad".to_string()).into();
        assert!(!is_silent(&err));
        assert!(err.downcast_ref::<FlagError>().is_some());
    }
}
