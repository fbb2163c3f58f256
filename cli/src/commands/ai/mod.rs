//! # AI Command Group
//!
//! File: cli/src/commands/ai/mod.rs
//!
//! ## Overview
//!
//! Runs the assistant's AI operations from a terminal, against the same
//! configuration and prompt templates the server uses. Useful for tuning
//! prompt overrides without a chat client.
//!
//! ```bash
//! cardbot ai classify "Thanks, that fixed it!"
//! cardbot ai reply "Is the office open on Monday?"
//! cardbot ai ask "Who owns the release?" --history chat.json
//! ```
//!
use cardbot::ai::{AiService, MessageCategory, OpenAiClient};
use cardbot::core::config;
use cardbot::core::error::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::info;

/// `ask` answers questions from a conversation history file.
pub mod ask;

#[derive(Parser, Debug)]
pub struct AiArgs {
    /// Read this file instead of searching for `.cardbot.toml`.
    #[arg(long, global = true, env = "CARDBOT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: AiCommand,
}

#[derive(Subcommand, Debug)]
pub enum AiCommand {
    /// Print the category of a message.
    Classify(TextArgs),
    /// Classify a message, then print the reply the assistant would send.
    Reply(TextArgs),
    /// Answer a question from a JSON history file.
    Ask(ask::AskArgs),
}

#[derive(Args, Debug)]
pub struct TextArgs {
    /// The chat message.
    pub text: String,
}

pub async fn handle_ai(args: AiArgs) -> Result<()> {
    let config = config::load_config(args.config.as_deref())?;
    let client = OpenAiClient::from_settings(&config.ai)?;
    info!("Using model {} at {}", config.ai.model, config.ai.base_url);

    match args.command {
        AiCommand::Classify(text) => {
            let category = client.classify_message(&text.text).await?;
            println!("{}", category);
        }
        AiCommand::Reply(text) => {
            let (category, reply) = classify_and_reply(&client, &text.text).await?;
            match reply {
                Some(reply) => println!("{}", reply),
                None => println!("(no reply for a message classified as {})", category),
            }
        }
        AiCommand::Ask(ask_args) => ask::handle_ask(&client, ask_args).await?,
    }
    Ok(())
}

/// The assistant's two-call flow for one message.
async fn classify_and_reply(
    ai: &dyn AiService,
    text: &str,
) -> Result<(MessageCategory, Option<String>)> {
    let category = ai.classify_message(text).await?;
    let reply = ai.generate_reply(category, text).await?;
    Ok((category, reply))
}
