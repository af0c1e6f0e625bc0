use crate::providers::types::ApiKey;
use reqwest::RequestBuilder;

#[derive(Clone)]
pub enum AuthStrategy {
    Bearer(ApiKey),
    /// Local OpenAI-compatible servers that take no credential.
    None,
}

impl AuthStrategy {
    #[must_use]
    pub const fn bearer(key: ApiKey) -> Self {
        Self::Bearer(key)
    }

    #[must_use]
    pub fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        match self {
            Self::Bearer(key) => {
                request.header("Authorization", format!("Bearer {}", key.as_str()))
            }
            Self::None => request,
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self {
            Self::Bearer(key) => !key.is_empty(),
            Self::None => true,
        }
    }
}

impl std::fmt::Debug for AuthStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(key) => f.debug_tuple("Bearer").field(key).finish(),
            Self::None => write!(f, "None"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_debug_hides_key() {
        let auth = AuthStrategy::bearer(ApiKey::new("sk-test-0123456789"));
        assert!(auth.is_configured());
        let debug = format!("{auth:?}");
        assert!(debug.contains("Bearer"));
        assert!(!debug.contains("0123456789"));
    }

    #[test]
    fn test_empty_bearer_is_not_configured() {
        assert!(!AuthStrategy::bearer(ApiKey::new("")).is_configured());
        assert!(AuthStrategy::None.is_configured());
    }

    #[test]
    fn test_bearer_sets_authorization_header() {
        let client = reqwest::Client::new();
        let request = AuthStrategy::bearer(ApiKey::new("secret"))
            .apply(client.post("http://localhost/v1/chat/completions"))
            .build()
            .unwrap();

        assert_eq!(
            request.headers().get("authorization").unwrap(),
            "Bearer secret"
        );
    }

    #[test]
    fn test_none_leaves_request_untouched() {
        let client = reqwest::Client::new();
        let request = AuthStrategy::None
            .apply(client.post("http://localhost/v1/chat/completions"))
            .build()
            .unwrap();

        assert!(request.headers().get("authorization").is_none());
    }
}
