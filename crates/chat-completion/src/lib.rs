//! Single-shot chat completions normalized into one message.
//!
//! A `CompletionClient` sends a conversation and token budget through a
//! `CompletionTransport` exactly once, keeps the first returned candidate, and
//! flags the reply as cut short when generation hit the token limit. An empty
//! candidate list is reported as `CompletionError::NoOutput`; transport
//! failures are passed through unchanged.
//!
//! # Usage (OpenAI)
//!
//! ```no_run
//! use chat_completion::prelude::*;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), CompletionError> {
//! let client = CompletionClient::openai(std::env::var("OPENAI_API_KEY").unwrap_or_default())?;
//!
//! let mut conversation = Conversation::with_system("Answer briefly.");
//! conversation.push(ChatMessage::user("Yeah do you have one in mind?"));
//!
//! let reply = client.get_chat_completion(conversation, 70).await?;
//! if reply.was_cut_short {
//!     eprintln!("reply truncated at the token limit");
//! }
//! println!("{}", reply.content);
//! # Ok(())
//! # }
//! ```

/// Client entry point and response normalization.
pub mod client;
/// Public error types.
pub mod errors;
/// Normalized output message.
pub mod message;
/// Conversation and request types.
pub mod model;
/// Process-wide logging setup.
pub mod observability;
/// Common imports for typical usage.
pub mod prelude;
/// Transport contract and raw response types.
pub mod transport;
/// Vendor-specific transports.
pub mod vendors;

pub use client::{CompletionClient, normalize_result};
pub use errors::{CompletionError, TransportError};
pub use message::Message;
pub use model::{ChatMessage, Conversation, GenerationParams, GenerationRequest, ProviderId, Role};
pub use transport::{Candidate, CompletionTransport, FinishReason, RawCompletionResult, Usage};
