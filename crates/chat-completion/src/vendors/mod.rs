/// OpenAI chat-completions transport.
pub mod openai;
