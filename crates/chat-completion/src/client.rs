use std::sync::Arc;

use tracing::debug;

use crate::errors::CompletionError;
use crate::message::Message;
use crate::model::{Conversation, GenerationRequest, ProviderId};
use crate::transport::{CompletionTransport, FinishReason, RawCompletionResult};

/// Entry point for requesting one normalized chat completion.
///
/// Holds nothing but the injected transport, so clones are cheap and can be
/// shared across tasks.
#[derive(Clone)]
pub struct CompletionClient {
    transport: Arc<dyn CompletionTransport>,
}

impl CompletionClient {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    /// Returns the id of the underlying transport.
    pub fn provider(&self) -> ProviderId {
        self.transport.id()
    }

    /// Calls the transport once and normalizes its response.
    ///
    /// Transport failures are returned unchanged inside
    /// `CompletionError::Transport`; an empty candidate list becomes
    /// `CompletionError::NoOutput`.
    pub async fn normalize(&self, request: GenerationRequest) -> Result<Message, CompletionError> {
        let request_id = uuid::Uuid::new_v4();
        let provider = self.transport.id();
        debug!(
            event = "completion.requested",
            domain = "completion",
            request_id = %request_id,
            provider = %provider,
            model = ?request.params.model,
            messages = request.conversation.len() as u64,
            max_tokens = request.max_tokens.get()
        );

        let raw = self.transport.create_completion(&request).await?;
        debug!(
            event = "completion.received",
            domain = "completion",
            request_id = %request_id,
            provider = %provider,
            model = raw.model.as_str(),
            candidates = raw.candidates.len() as u64
        );

        let message = normalize_result(&provider, raw)?;
        debug!(
            event = "completion.normalized",
            domain = "completion",
            request_id = %request_id,
            content_len = message.content.len() as u64,
            was_cut_short = message.was_cut_short
        );
        Ok(message)
    }

    /// Sends `conversation` with the given token budget and default parameters.
    pub async fn get_chat_completion(
        &self,
        conversation: Conversation,
        max_tokens: u32,
    ) -> Result<Message, CompletionError> {
        let request = GenerationRequest::try_new(conversation, max_tokens)?;
        self.normalize(request).await
    }
}

/// Turns a raw transport result into a `Message`.
///
/// The first returned candidate is always the one used; later candidates are
/// ignored regardless of their finish reasons.
pub fn normalize_result(
    provider: &ProviderId,
    raw: RawCompletionResult,
) -> Result<Message, CompletionError> {
    let Some(first) = raw.candidates.into_iter().next() else {
        return Err(CompletionError::NoOutput {
            provider: provider.clone(),
            model: raw.model,
        });
    };
    let was_cut_short = first
        .finish_reason
        .as_ref()
        .is_some_and(FinishReason::is_length);
    Ok(Message {
        content: first.text,
        was_cut_short,
    })
}
