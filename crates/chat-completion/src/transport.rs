use std::fmt;

use crate::errors::TransportError;
use crate::model::{GenerationRequest, ProviderId};

/// Why the service stopped generating a candidate.
///
/// Values outside the documented set are kept verbatim in `Other`.
#[derive(Clone, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FinishReason {
    /// Natural end of output or a stop sequence.
    Stop,
    /// Token budget exhausted.
    Length,
    ContentFilter,
    ToolCalls,
    FunctionCall,
    Other(String),
}

impl FinishReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Stop => "stop",
            Self::Length => "length",
            Self::ContentFilter => "content_filter",
            Self::ToolCalls => "tool_calls",
            Self::FunctionCall => "function_call",
            Self::Other(value) => value,
        }
    }

    /// True when the wire value is exactly `length`, including `Other("length")`.
    pub fn is_length(&self) -> bool {
        self.as_str() == "length"
    }
}

impl From<&str> for FinishReason {
    fn from(value: &str) -> Self {
        match value {
            "stop" => Self::Stop,
            "length" => Self::Length,
            "content_filter" => Self::ContentFilter,
            "tool_calls" => Self::ToolCalls,
            "function_call" => Self::FunctionCall,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for FinishReason {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl From<FinishReason> for String {
    fn from(value: FinishReason) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FinishReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alternative completion returned for a request.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Candidate {
    /// Position reported by the service.
    pub index: u32,
    pub text: String,
    #[serde(default)]
    pub finish_reason: Option<FinishReason>,
}

impl Candidate {
    pub fn new(index: u32, text: impl Into<String>, finish_reason: Option<FinishReason>) -> Self {
        Self {
            index,
            text: text.into(),
            finish_reason,
        }
    }
}

/// Token accounting reported by the service.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}

/// Unprocessed transport response: candidates plus passthrough metadata.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RawCompletionResult {
    pub id: String,
    pub model: String,
    pub created: u64,
    /// Candidates in the order the service returned them.
    pub candidates: Vec<Candidate>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

/// Capability that performs one round-trip to a completion service.
///
/// An empty `candidates` list is a valid response at this level; deciding
/// that it is a failure is the caller's job.
#[async_trait::async_trait]
pub trait CompletionTransport: Send + Sync {
    /// Identifier used in logs and errors.
    fn id(&self) -> ProviderId;

    /// Sends the conversation and token budget once and returns the raw result.
    async fn create_completion(
        &self,
        request: &GenerationRequest,
    ) -> Result<RawCompletionResult, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finish_reason_maps_known_and_unknown_values() {
        assert_eq!(FinishReason::from("length"), FinishReason::Length);
        assert_eq!(FinishReason::from("tool_calls"), FinishReason::ToolCalls);
        assert_eq!(
            FinishReason::from("end_turn"),
            FinishReason::Other("end_turn".into())
        );
        assert_eq!(FinishReason::Other("end_turn".into()).as_str(), "end_turn");
    }

    #[test]
    fn is_length_follows_wire_value() {
        assert!(FinishReason::Length.is_length());
        assert!(FinishReason::Other("length".into()).is_length());
        assert!(!FinishReason::Other("Length".into()).is_length());
        assert!(!FinishReason::Stop.is_length());
    }

    #[test]
    fn candidate_deserializes_missing_finish_reason_as_none() {
        let candidate: Candidate =
            serde_json::from_value(serde_json::json!({"index": 0, "text": "hi"})).unwrap();
        assert_eq!(candidate.finish_reason, None);
    }

    #[test]
    fn finish_reason_serializes_as_wire_string() {
        let candidate = Candidate::new(1, "x", Some(FinishReason::ContentFilter));
        let value = serde_json::to_value(candidate).unwrap();
        assert_eq!(value["finish_reason"], "content_filter");
    }
}
