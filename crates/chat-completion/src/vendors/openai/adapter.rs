use tracing::debug;

use crate::errors::{CompletionError, TransportError};
use crate::model::{GenerationRequest, ProviderId};
use crate::transport::{CompletionTransport, RawCompletionResult};

use super::config::OpenAiClientConfig;
use super::wire::{build_request_body, error_message, parse_chat_completion};

const OPENAI_PROVIDER: &str = "openai";

/// Transport for OpenAI's Chat Completions API (non-streaming).
pub struct OpenAiTransport {
    client: reqwest::Client,
    config: OpenAiClientConfig,
}

impl OpenAiTransport {
    /// Creates a transport from explicit client configuration.
    pub fn new(config: OpenAiClientConfig) -> Result<Self, CompletionError> {
        if config.api_key.trim().is_empty() {
            return Err(CompletionError::Config(
                "OpenAI client config api_key must not be empty".into(),
            ));
        }
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CompletionError::Config(format!("failed to build OpenAI client: {e}")))?;
        Ok(Self { client, config })
    }

    /// Creates a transport using `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self, CompletionError> {
        Self::new(OpenAiClientConfig::from_env()?)
    }

    /// Returns the configuration this transport was built with.
    pub fn config(&self) -> &OpenAiClientConfig {
        &self.config
    }
}

#[async_trait::async_trait]
impl CompletionTransport for OpenAiTransport {
    fn id(&self) -> ProviderId {
        ProviderId::new(OPENAI_PROVIDER)
    }

    async fn create_completion(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawCompletionResult, TransportError> {
        let provider_id = self.id();
        let body = build_request_body(request, &self.config.default_model);
        debug!(
            event = "completion.http_request",
            domain = "completion",
            provider = %provider_id,
            model = body["model"].as_str().unwrap_or_default(),
            "sending OpenAI chat completion request"
        );

        let response = self
            .client
            .post(self.config.chat_completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                TransportError::transport(
                    provider_id.clone(),
                    format!("OpenAI request failed: {e}"),
                )
            })?;
        let status = response.status();
        let text = response.text().await.map_err(|e| {
            TransportError::transport(
                provider_id.clone(),
                format!("OpenAI response read failed: {e}"),
            )
        })?;
        if !status.is_success() {
            return Err(TransportError::provider(
                provider_id,
                format!(
                    "OpenAI chat completion failed with status {status}: {}",
                    error_message(&text)
                ),
                Some(status.as_u16()),
            ));
        }
        parse_chat_completion(&provider_id, &text)
    }
}
