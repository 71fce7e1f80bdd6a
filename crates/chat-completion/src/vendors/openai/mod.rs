//! OpenAI transport and client configuration.
//!
//! Vendor-specific wiring lives here so the normalizer stays transport-agnostic.
mod adapter;
mod config;
mod wire;

pub use adapter::OpenAiTransport;
pub use config::OpenAiClientConfig;

use std::sync::Arc;

use crate::client::CompletionClient;
use crate::errors::CompletionError;

impl CompletionClient {
    /// Builds a client backed by OpenAI with default settings for `api_key`.
    pub fn openai(api_key: impl Into<String>) -> Result<Self, CompletionError> {
        let transport = OpenAiTransport::new(OpenAiClientConfig::new(api_key))?;
        Ok(Self::new(Arc::new(transport)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn openai_client_uses_openai_provider() {
        let client = CompletionClient::openai("fake-key").expect("client");
        assert_eq!(client.provider().as_str(), "openai");
    }

    #[test]
    fn openai_client_rejects_empty_key() {
        assert!(matches!(
            CompletionClient::openai(""),
            Err(CompletionError::Config(_))
        ));
    }
}
