use thiserror::Error;

use crate::chat::ChatError;
use crate::providers::error::ProviderError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Chat(#[from] ChatError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AppError>;

impl AppError {
    /// Follow-up advice for the user, when the underlying failure has one.
    #[must_use]
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Provider(e) | Self::Chat(ChatError::Provider(e)) => e.hint(),
            _ => None,
        }
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chat::SubmitError;

    #[test]
    fn test_provider_errors_display_transparently() {
        let err: AppError = ProviderError::Connection("refused".into()).into();
        assert_eq!(err.to_string(), "Connection failed: refused");
    }

    #[test]
    fn test_chat_errors_convert() {
        let err: AppError = ChatError::from(SubmitError::Responding).into();
        assert!(matches!(err, AppError::Chat(ChatError::Submit(SubmitError::Responding))));
    }

    #[test]
    fn test_hint_reaches_through_chat_errors() {
        let provider = ProviderError::from_status(401, "", "OPENAI_API_KEY");
        let err: AppError = ChatError::from(provider).into();

        assert_eq!(
            err.hint(),
            Some("Check your OPENAI_API_KEY environment variable")
        );
        assert_eq!(AppError::Config("x".into()).hint(), None);
    }

    #[test]
    fn test_io_errors_convert() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io_err.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
