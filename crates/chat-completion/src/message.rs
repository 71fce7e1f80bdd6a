use crate::model::ChatMessage;

/// Normalized reply handed back to the application.
#[derive(Clone, Debug, Default, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Message {
    /// Text of the selected candidate.
    pub content: String,
    /// `true` only when generation stopped because the token budget ran out.
    pub was_cut_short: bool,
}

impl Message {
    pub fn new(content: impl Into<String>, was_cut_short: bool) -> Self {
        Self {
            content: content.into(),
            was_cut_short,
        }
    }

    /// Converts the reply into an assistant turn for appending to a conversation.
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::assistant(self.content.clone())
    }
}
