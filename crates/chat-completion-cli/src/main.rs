//! Send one prompt to a chat-completion endpoint and print the normalized reply.

use std::path::Path;
use std::sync::Arc;

use chat_completion::observability::init_observability;
use chat_completion::prelude::*;
use chat_completion::vendors::openai::OpenAiTransport;
use clap::Parser;
use tracing::{info, warn};

#[derive(Debug, Parser)]
#[command(name = "chat-completion", about = "Request a single chat completion")]
struct Args {
    /// User prompt to send.
    prompt: String,
    /// Maximum number of tokens to generate.
    #[arg(long, default_value_t = 70, value_parser = clap::value_parser!(u32).range(1..))]
    max_tokens: u32,
    /// Model override (defaults to OPENAI_MODEL or gpt-3.5-turbo).
    #[arg(long)]
    model: Option<String>,
    /// Sampling temperature.
    #[arg(long)]
    temperature: Option<f32>,
    /// Optional system instruction placed before the prompt.
    #[arg(long)]
    system: Option<String>,
}

fn load_env() {
    let _ = dotenvy::from_path(Path::new(
        format!("{}/.env", env!("CARGO_MANIFEST_DIR")).as_str(),
    ));
    dotenvy::dotenv().ok();
}

fn build_request(args: &Args) -> Result<GenerationRequest, CompletionError> {
    let mut conversation = match args.system.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(system) => Conversation::with_system(system),
        None => Conversation::new(),
    };
    conversation.push(ChatMessage::user(args.prompt.clone()));

    let mut params = GenerationParams::default();
    if let Some(model) = &args.model {
        params = params.model(model.clone());
    }
    if let Some(temperature) = args.temperature {
        params = params.temperature(temperature);
    }
    Ok(GenerationRequest::try_new(conversation, args.max_tokens)?.params(params))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    load_env();
    init_observability()?;
    let args = Args::parse();

    let client = CompletionClient::new(Arc::new(OpenAiTransport::from_env()?));
    let request = build_request(&args)?;
    info!(
        event = "cli.request",
        provider = %client.provider(),
        max_tokens = args.max_tokens
    );

    let reply = client.normalize(request).await?;
    if reply.was_cut_short {
        warn!(
            event = "cli.reply_cut_short",
            max_tokens = args.max_tokens,
            "reply was truncated at the token limit"
        );
    }
    println!("{}", reply.content);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_request_orders_system_before_prompt() {
        let args = Args::parse_from([
            "chat-completion",
            "--system",
            "Answer briefly.",
            "--model",
            "gpt-4o-mini",
            "--max-tokens",
            "12",
            "hello",
        ]);
        let request = build_request(&args).expect("request");
        let roles: Vec<Role> = request.conversation.iter().map(|m| m.role).collect();
        assert_eq!(roles, [Role::System, Role::User]);
        assert_eq!(request.max_tokens.get(), 12);
        assert_eq!(request.params.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn max_tokens_defaults_to_seventy() {
        let args = Args::parse_from(["chat-completion", "hi"]);
        assert_eq!(args.max_tokens, 70);
        let request = build_request(&args).expect("request");
        assert_eq!(request.conversation.len(), 1);
    }

    #[test]
    fn zero_max_tokens_is_rejected_by_parser() {
        assert!(Args::try_parse_from(["chat-completion", "--max-tokens", "0", "hi"]).is_err());
    }
}
