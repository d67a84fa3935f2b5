//! # climatechat-cli: A CLI for `climatechat`
//!
//! This is the main entry point for the `climatechat` command-line interface.

mod ask;
mod parse;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

// --- CLI Definition ---

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interpret a complete response buffer read from a file or stdin
    Parse(parse::ParseArgs),
    /// Feed a saved response through the interpreter chunk by chunk
    Replay(parse::ReplayArgs),
    /// Stream an answer to a question from the chat backend
    Ask(ask::AskArgs),
}

// --- Main Application Entry ---

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays machine-readable.
    let subscriber = fmt::Subscriber::builder()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    let (name, outcome) = match &cli.command {
        Commands::Parse(args) => ("Parse", parse::handle_parse(args)),
        Commands::Replay(args) => ("Replay", parse::handle_replay(args)),
        Commands::Ask(args) => ("Ask", ask::handle_ask(args).await),
    };

    if let Err(e) = outcome {
        eprintln!("{name} failed: {e:#}");
        std::process::exit(1);
    }

    Ok(())
}
