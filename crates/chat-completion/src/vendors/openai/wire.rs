use serde::Deserialize;

use crate::errors::TransportError;
use crate::model::{GenerationRequest, ProviderId};
use crate::transport::{Candidate, FinishReason, RawCompletionResult, Usage};

pub(crate) fn build_request_body(
    request: &GenerationRequest,
    default_model: &str,
) -> serde_json::Value {
    let model = request
        .params
        .model
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .unwrap_or(default_model);
    let messages: Vec<serde_json::Value> = request
        .conversation
        .iter()
        .map(|m| {
            serde_json::json!({
                "role": m.role.as_str(),
                "content": m.content,
            })
        })
        .collect();

    let mut body = serde_json::json!({
        "model": model,
        "messages": messages,
        "max_tokens": request.max_tokens.get(),
    });
    if let Some(temperature) = request.params.temperature {
        body["temperature"] = serde_json::json!(temperature);
    }
    body
}

#[derive(Deserialize)]
struct ChatCompletionBody {
    #[serde(default)]
    id: String,
    #[serde(default)]
    model: String,
    #[serde(default)]
    created: u64,
    #[serde(default)]
    choices: Vec<ChoiceBody>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Deserialize)]
struct ChoiceBody {
    #[serde(default)]
    index: u32,
    #[serde(default)]
    message: Option<ChoiceMessageBody>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct ChoiceMessageBody {
    #[serde(default)]
    content: Option<String>,
}

pub(crate) fn parse_chat_completion(
    provider: &ProviderId,
    body: &str,
) -> Result<RawCompletionResult, TransportError> {
    let parsed: ChatCompletionBody = serde_json::from_str(body).map_err(|e| {
        TransportError::protocol(
            provider.clone(),
            format!("invalid chat completion JSON: {e}"),
        )
    })?;
    let candidates = parsed
        .choices
        .into_iter()
        .map(|choice| Candidate {
            index: choice.index,
            text: choice.message.and_then(|m| m.content).unwrap_or_default(),
            finish_reason: choice.finish_reason.map(FinishReason::from),
        })
        .collect();
    Ok(RawCompletionResult {
        id: parsed.id,
        model: parsed.model,
        created: parsed.created,
        candidates,
        usage: parsed.usage,
    })
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|e| e.get("message"))
                .and_then(|v| v.as_str())
                .map(ToOwned::to_owned)
        })
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChatMessage, Conversation, GenerationParams};

    fn request() -> GenerationRequest {
        let conversation = Conversation::from(vec![
            ChatMessage::system("sys"),
            ChatMessage::user("Yeah do you have one in mind?"),
        ]);
        GenerationRequest::try_new(conversation, 70).expect("request")
    }

    #[test]
    fn request_body_uses_default_model_and_budget() {
        let body = build_request_body(&request(), "gpt-3.5-turbo");
        assert_eq!(body["model"], "gpt-3.5-turbo");
        assert_eq!(body["max_tokens"], 70);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "Yeah do you have one in mind?");
        assert!(body.get("temperature").is_none());
    }

    #[test]
    fn request_body_applies_passthrough_params() {
        let req = request().params(GenerationParams::default().model("gpt-4o").temperature(0.5));
        let body = build_request_body(&req, "gpt-3.5-turbo");
        assert_eq!(body["model"], "gpt-4o");
        assert_eq!(body["temperature"].as_f64(), Some(0.5));
    }

    #[test]
    fn parses_choices_in_order() {
        let body = serde_json::json!({
            "id": "chatcmpl-12345",
            "object": "chat.completion",
            "created": 0,
            "model": "gpt-3.5-turbo",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "Hello there! How are you?"}, "finish_reason": "length"},
                {"index": 1, "message": {"role": "assistant", "content": null}, "finish_reason": "tool_calls"}
            ],
            "usage": {"prompt_tokens": 3, "completion_tokens": 7, "total_tokens": 10}
        })
        .to_string();
        let raw = parse_chat_completion(&ProviderId::new("openai"), &body).expect("parse");
        assert_eq!(raw.id, "chatcmpl-12345");
        assert_eq!(raw.candidates.len(), 2);
        assert_eq!(raw.candidates[0].text, "Hello there! How are you?");
        assert_eq!(raw.candidates[0].finish_reason, Some(FinishReason::Length));
        assert_eq!(raw.candidates[1].text, "");
        assert_eq!(raw.usage.map(|u| u.total_tokens), Some(10));
    }

    #[test]
    fn empty_choices_is_a_valid_response() {
        let body = r#"{"id":"x","model":"m","created":1,"choices":[]}"#;
        let raw = parse_chat_completion(&ProviderId::new("openai"), body).expect("parse");
        assert!(raw.candidates.is_empty());
        assert!(raw.usage.is_none());
    }

    #[test]
    fn malformed_body_is_protocol_error() {
        let err = parse_chat_completion(&ProviderId::new("openai"), "<html>").unwrap_err();
        assert!(matches!(err, TransportError::Protocol { .. }));
    }

    #[test]
    fn error_message_prefers_structured_field() {
        let body = r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#;
        assert_eq!(error_message(body), "Incorrect API key provided");
        assert_eq!(error_message("bad gateway"), "bad gateway");
    }
}
