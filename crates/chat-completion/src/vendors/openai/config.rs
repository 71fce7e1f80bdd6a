use std::time::Duration;

use crate::errors::CompletionError;

pub(crate) const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// Configuration for the OpenAI chat-completions transport.
#[derive(Clone, Debug)]
pub struct OpenAiClientConfig {
    /// API key used for bearer auth.
    pub api_key: String,
    /// Base URL for the OpenAI-compatible endpoint.
    ///
    /// Useful for proxies or local test servers.
    pub base_url: String,
    /// Default HTTP timeout for requests.
    pub timeout: Duration,
    /// Model used when a request does not name one.
    pub default_model: String,
}

impl OpenAiClientConfig {
    /// Creates a config with sensible defaults and a provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: "https://api.openai.com".to_string(),
            timeout: Duration::from_secs(120),
            default_model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Builds a config from `OPENAI_API_KEY`, honoring optional
    /// `OPENAI_BASE_URL` and `OPENAI_MODEL` overrides.
    pub fn from_env() -> Result<Self, CompletionError> {
        let api_key = std::env::var("OPENAI_API_KEY").unwrap_or_default();
        if api_key.trim().is_empty() {
            return Err(CompletionError::Config(
                "missing OPENAI_API_KEY for OpenAI transport".into(),
            ));
        }
        let mut config = Self::new(api_key);
        if let Some(base_url) = non_empty_env("OPENAI_BASE_URL") {
            config = config.base_url(base_url);
        }
        if let Some(model) = non_empty_env("OPENAI_MODEL") {
            config = config.default_model(model);
        }
        Ok(config)
    }

    /// Overrides the API base URL (for proxies or test servers).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the default HTTP timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Overrides the fallback model.
    pub fn default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }

    pub(crate) fn chat_completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_completions_url_trims_trailing_slash() {
        let config = OpenAiClientConfig::new("k").base_url("http://localhost:8080/");
        assert_eq!(
            config.chat_completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn defaults_target_public_endpoint() {
        let config = OpenAiClientConfig::new("k");
        assert_eq!(config.default_model, "gpt-3.5-turbo");
        assert_eq!(config.timeout, Duration::from_secs(120));
        assert_eq!(
            config.chat_completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
