//! Common imports for typical usage.
pub use crate::{
    ChatMessage, CompletionClient, CompletionError, CompletionTransport, Conversation,
    GenerationParams, GenerationRequest, Message, Role, TransportError,
};
