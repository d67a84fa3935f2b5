use anyhow::{Context, Result};
use clap::Parser;
use climatechat::{config::API_URL_ENV, ChatClient, ClientConfig, Conversation};
use tracing::info;

#[derive(Parser, Debug)]
pub struct AskArgs {
    /// The question to send to the chat backend
    #[arg(required = true)]
    query: String,
    /// Base URL of the chat backend
    #[arg(long, env = API_URL_ENV)]
    api_url: Option<String>,
    /// Request timeout in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,
}

pub async fn handle_ask(args: &AskArgs) -> Result<()> {
    let mut config = match &args.api_url {
        Some(url) => ClientConfig::new(url.as_str()),
        None => ClientConfig::from_env()?,
    };
    if let Some(timeout_secs) = args.timeout_secs {
        config = config.with_timeout_secs(timeout_secs);
    }
    info!("Asking {}: {:?}", config.api_url, args.query);

    let client = ChatClient::new(&config)?;
    let mut conversation = Conversation::new();
    conversation.push_user(args.query.as_str());
    conversation.begin_assistant();

    let final_result = client
        .stream_query(&args.query, |update| {
            eprintln!("… {} challenge(s) so far", update.challenge_count());
            conversation.apply(update.clone());
        })
        .await?;
    conversation.apply(final_result);

    let message = conversation
        .finish()
        .context("No answer was in progress")?;
    println!("{}", serde_json::to_string_pretty(message)?);
    Ok(())
}
