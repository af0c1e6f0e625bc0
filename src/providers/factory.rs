use crate::config::AppConfig;
use crate::providers::completions::CompletionsClient;
use crate::providers::error::ProviderError;
use crate::providers::http::{AuthStrategy, HttpConfig};
use crate::providers::types::ApiKey;

/// Builds the streaming client described by `config`. An empty
/// `api_key_env` means the endpoint takes no credential.
pub fn create_client(config: &AppConfig) -> Result<CompletionsClient, ProviderError> {
    let auth = if config.api_key_env.is_empty() {
        AuthStrategy::None
    } else {
        AuthStrategy::bearer(ApiKey::from_env(&config.api_key_env)?)
    };

    let http_config = HttpConfig::new().with_connect_timeout(config.connect_timeout());

    let client = CompletionsClient::with_http_config(auth, http_config)?
        .with_model(config.model.clone())
        .with_base_url(config.base_url.clone())
        .with_api_key_env(config.api_key_env.clone())
        .with_strict_status(config.strict_status);

    tracing::debug!(?client, "created completions client");
    Ok(client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::CompletionSource;

    #[test]
    fn test_missing_key_is_a_configuration_error() {
        let config = AppConfig {
            api_key_env: "PARLEY_TEST_DEFINITELY_UNSET".into(),
            ..AppConfig::default()
        };

        let err = create_client(&config).unwrap_err();
        assert!(matches!(err, ProviderError::Configuration(ref m) if m.contains("PARLEY_TEST_DEFINITELY_UNSET")));
    }

    #[test]
    fn test_empty_key_env_needs_no_credential() {
        let config = AppConfig {
            api_key_env: String::new(),
            base_url: "http://127.0.0.1:9".into(),
            model: "local-model".into(),
            ..AppConfig::default()
        };

        let client = create_client(&config).unwrap();
        assert_eq!(client.model(), "local-model");
        assert_eq!(client.base_url().as_str(), "http://127.0.0.1:9");
    }
}
