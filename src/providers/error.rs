use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Authentication failed: {message}")]
    Authentication {
        message: String,
        hint: Option<String>,
    },

    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Server error ({status}): {message}")]
    Server { status: u16, message: String },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Stream error: {0}")]
    StreamError(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl ProviderError {
    #[must_use]
    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::Server {
            status,
            message: message.into(),
        }
    }

    /// Maps a non-success response to a typed error, pulling `error.message`
    /// out of an OpenAI-style error body when there is one.
    #[must_use]
    pub fn from_status(status: u16, body: &str, api_key_env_var: &str) -> Self {
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|v| v.get("error")?.get("message")?.as_str().map(String::from))
            .unwrap_or_else(|| format!("HTTP {status}"));

        match status {
            401 | 403 => Self::Authentication {
                message,
                hint: Some(format!("Check your {api_key_env_var} environment variable")),
            },
            429 => Self::RateLimit(message),
            500..=599 => Self::Server { status, message },
            _ => Self::InvalidRequest(message),
        }
    }

    pub(crate) fn from_reqwest(err: &reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            Self::Timeout(timeout)
        } else {
            Self::Connection(err.to_string())
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Authentication { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_status_401_carries_hint() {
        let body = r#"{"error": {"message": "Incorrect API key provided"}}"#;
        let err = ProviderError::from_status(401, body, "OPENAI_API_KEY");

        match &err {
            ProviderError::Authentication { message, .. } => {
                assert_eq!(message, "Incorrect API key provided");
            }
            other => panic!("Expected Authentication error, got {other:?}"),
        }
        assert!(err.hint().unwrap().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_from_status_429() {
        let err = ProviderError::from_status(429, "", "OPENAI_API_KEY");
        assert!(matches!(err, ProviderError::RateLimit(ref m) if m == "HTTP 429"));
    }

    #[test]
    fn test_from_status_500() {
        let body = r#"{"error": {"message": "The server had an error"}}"#;
        let err = ProviderError::from_status(500, body, "OPENAI_API_KEY");

        match err {
            ProviderError::Server { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "The server had an error");
            }
            other => panic!("Expected Server error, got {other:?}"),
        }
    }

    #[test]
    fn test_from_status_other_client_error() {
        let err = ProviderError::from_status(404, "not json", "OPENAI_API_KEY");
        assert!(matches!(err, ProviderError::InvalidRequest(ref m) if m == "HTTP 404"));
    }

    #[test]
    fn test_error_display() {
        let err = ProviderError::server(502, "bad gateway");
        assert_eq!(err.to_string(), "Server error (502): bad gateway");

        let err = ProviderError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Request timed out after 30s");
    }
}
