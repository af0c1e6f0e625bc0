use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

use super::error::ProviderError;

/// Static bearer credential. Never printed in full.
#[derive(Clone)]
pub struct ApiKey(Cow<'static, str>);

impl ApiKey {
    #[must_use]
    pub fn new(key: impl Into<Cow<'static, str>>) -> Self {
        Self(key.into())
    }

    pub fn from_env(var_name: &str) -> Result<Self, ProviderError> {
        match std::env::var(var_name) {
            Ok(value) if !value.trim().is_empty() => Ok(Self(Cow::Owned(value.trim().to_owned()))),
            _ => Err(ProviderError::Configuration(format!(
                "Environment variable {var_name} not set"
            ))),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let len = self.0.len();
        if len > 8 && self.0.is_char_boundary(4) && self.0.is_char_boundary(len - 3) {
            write!(f, "ApiKey({}...{})", &self.0[..4], &self.0[len - 3..])
        } else if len > 0 {
            write!(f, "ApiKey(***)")
        } else {
            write!(f, "ApiKey(<empty>)")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(Cow<'static, str>);

impl ModelId {
    #[must_use]
    pub fn new(id: impl Into<Cow<'static, str>>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for ModelId {
    fn from(id: &'static str) -> Self {
        Self::new(id)
    }
}

impl From<String> for ModelId {
    fn from(id: String) -> Self {
        Self::new(id)
    }
}

/// Service root without a trailing slash; endpoint paths are appended with [`BaseUrl::join`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(Cow<'static, str>);

impl BaseUrl {
    #[must_use]
    pub fn new(url: impl Into<Cow<'static, str>>) -> Self {
        let url = url.into();
        let url = if url.ends_with('/') {
            Cow::Owned(url.trim_end_matches('/').to_string())
        } else {
            url
        };
        Self(url)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn join(&self, path: &str) -> String {
        format!("{}{}", self.0, path)
    }

    /// Host portion for display, e.g. `api.openai.com`.
    #[must_use]
    pub fn host(&self) -> &str {
        let rest = self
            .0
            .split_once("://")
            .map_or(self.0.as_ref(), |(_, rest)| rest);
        rest.split('/').next().unwrap_or(rest)
    }
}

impl fmt::Display for BaseUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for BaseUrl {
    fn from(url: &'static str) -> Self {
        Self::new(url)
    }
}

impl From<String> for BaseUrl {
    fn from(url: String) -> Self {
        Self::new(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-proj-abcdefghijklmnop");
        let debug = format!("{key:?}");
        assert!(debug.contains("sk-p"));
        assert!(debug.contains("nop"));
        assert!(!debug.contains("abcdefghijklmnop"));

        assert_eq!(format!("{:?}", ApiKey::new("short")), "ApiKey(***)");
        assert_eq!(format!("{:?}", ApiKey::new("")), "ApiKey(<empty>)");
    }

    #[test]
    fn test_api_key_from_missing_env() {
        let result = ApiKey::from_env("PARLEY_TEST_UNSET_KEY_VAR");
        assert!(matches!(result, Err(ProviderError::Configuration(_))));
    }

    #[test]
    fn test_model_id_serializes_as_plain_string() {
        let model = ModelId::new("gpt-3.5-turbo");
        assert_eq!(serde_json::to_string(&model).unwrap(), "\"gpt-3.5-turbo\"");
        assert_eq!(model.to_string(), "gpt-3.5-turbo");
    }

    #[test]
    fn test_base_url_join_strips_trailing_slashes() {
        let url = BaseUrl::new("https://api.openai.com///");
        assert_eq!(url.as_str(), "https://api.openai.com");
        assert_eq!(
            url.join("/v1/chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_base_url_host() {
        assert_eq!(BaseUrl::new("https://api.openai.com/v1").host(), "api.openai.com");
        assert_eq!(BaseUrl::new("http://127.0.0.1:8080").host(), "127.0.0.1:8080");
        assert_eq!(BaseUrl::new("localhost").host(), "localhost");
    }
}
