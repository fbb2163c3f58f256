//! # CardBot Main Entry Point
//!
//! File: cli/src/main.rs
//!
//! ## Overview
//!
//! Parses the command line, sets up logging from the verbosity flags, and
//! routes to a command handler. Every error comes back up to `main`, which
//! prints it once and exits with status 1.
//!
//! ## Examples
//!
//! ```bash
//! # Run the webhook server on all interfaces
//! cardbot serve --host 0.0.0.0 --port 8080
//!
//! # Try the AI prompts from a terminal
//! cardbot -v ai classify "The build is broken again"
//! cardbot ai ask "When is the release?" --history chat.json
//! ```
//!
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "cardbot",
    about = "CardBot: chat-app webhooks for a contact-form dialog and an AI assistant",
    long_about = "Serves the contact dialog and assistant webhooks for a chat platform,\n\
                  and exposes the assistant's AI operations from the command line.",
    propagate_version = true,
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG wins.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Run the webhook HTTP server.
    #[command(alias = "s")]
    Serve(commands::serve::ServeArgs),
    /// Call the AI service directly.
    Ai(commands::ai::AiArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    tracing::debug!("Parsed CLI arguments: {:?}", cli);

    let command_result = match cli.command {
        Commands::Serve(args) => commands::serve::handle_serve(args).await,
        Commands::Ai(args) => commands::ai::handle_ai(args).await,
    };

    if let Err(e) = command_result {
        tracing::error!("Command execution failed: {:?}", e);
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}
