//! # `cardbot ai ask`
//!
//! File: cli/src/commands/ai/ask.rs
//!
//! Answers a question from an exported conversation. The history file is a JSON
//! array of `{ "text": ... }` objects, oldest first. Text that is not a
//! question is reported without asking the model for an answer.
//!
use anyhow::Context;
use cardbot::ai::{AiService, HistoryEntry};
use cardbot::core::error::Result;
use clap::Args;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const NOT_A_QUESTION: &str = "That doesn't look like a question.";

#[derive(Args, Debug)]
pub struct AskArgs {
    /// The question to answer.
    pub question: String,

    /// JSON file with the conversation history.
    #[arg(long)]
    pub history: PathBuf,
}

pub async fn handle_ask(ai: &dyn AiService, args: AskArgs) -> Result<()> {
    let history = load_history(&args.history)?;
    info!(
        "Loaded {} history entries from {}",
        history.len(),
        args.history.display()
    );
    match answer(ai, &args.question, &history).await? {
        Some(answer) => println!("{}", answer),
        None => println!("{}", NOT_A_QUESTION),
    }
    Ok(())
}

pub fn load_history(path: &Path) -> Result<Vec<HistoryEntry>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read history file: {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| {
        format!(
            "History file is not a JSON array of {{\"text\"}} objects: {}",
            path.display()
        )
    })
}

/// `None` when the model says `question` is not a question.
pub async fn answer(
    ai: &dyn AiService,
    question: &str,
    history: &[HistoryEntry],
) -> Result<Option<String>> {
    if !ai.detects_question(question).await? {
        debug!("Not a question: {:?}", question);
        return Ok(None);
    }
    ai.answer_from_history(question, history).await.map(Some)
}
