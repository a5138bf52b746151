//! Error types for external lookups

use thiserror::Error;

/// Errors from translation, speech and browser collaborators
#[derive(Debug, Error)]
pub enum ServiceError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP or service status code
        status: u16,
        /// Message from the service
        message: String,
    },

    /// Response did not have the expected shape
    #[error("Unexpected response: {0}")]
    Parse(String),

    /// Local file or process I/O failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio player missing or exited with failure
    #[error("Audio playback failed: {0}")]
    Player(String),

    /// Browser could not be launched
    #[error("Could not open browser: {0}")]
    Browser(String),

    /// URL could not be built from the token
    #[error("Invalid URL: {0}")]
    Url(String),
}

impl ServiceError {
    /// Check if retrying the same request might succeed
    pub fn is_transient(&self) -> bool {
        match self {
            ServiceError::Request(e) => e.is_timeout() || e.is_connect(),
            ServiceError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message_includes_status() {
        let err = ServiceError::Api { status: 403, message: "quota exceeded".into() };
        assert_eq!(err.to_string(), "API error (403): quota exceeded");
    }

    #[test]
    fn server_errors_are_transient() {
        assert!(ServiceError::Api { status: 503, message: String::new() }.is_transient());
        assert!(ServiceError::Api { status: 429, message: String::new() }.is_transient());
        assert!(!ServiceError::Api { status: 400, message: String::new() }.is_transient());
        assert!(!ServiceError::Parse("x".into()).is_transient());
    }
}
