//! # AI Service Collaborator
//!
//! File: cli/src/ai/mod.rs
//!
//! ## Overview
//!
//! The assistant's view of the hosted language model: four single-shot
//! operations, each one HTTP round trip, with no retry, backoff, caching, or
//! conversation state. Failures are returned to the caller untouched.
//!
//! The controllers only see the `AiService` trait. The concrete client is built
//! once at startup and shared as `Arc<dyn AiService>`, which is also how tests
//! swap in a scripted fake.
//!
//! ## Architecture
//!
//! - `AiService`: the collaborator contract
//! - `MessageCategory`: the closed set of intents `classify_message` returns
//! - `HistoryEntry`: one prior message handed to `answer_from_history`
//! - `openai`: `OpenAiClient`, the OpenAI-compatible implementation
//!
use crate::core::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod openai;

pub use openai::OpenAiClient;

#[async_trait]
pub trait AiService: Send + Sync {
    /// Classifies the intent of a chat message.
    async fn classify_message(&self, text: &str) -> Result<MessageCategory>;

    /// Writes a reply for a message of the given category. `None` when the
    /// model has nothing to say.
    async fn generate_reply(&self, category: MessageCategory, text: &str)
        -> Result<Option<String>>;

    /// Whether the text asks a question.
    async fn detects_question(&self, text: &str) -> Result<bool>;

    /// Answers `question` from the given messages, oldest first.
    async fn answer_from_history(&self, question: &str, history: &[HistoryEntry])
        -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MessageCategory {
    Greeting,
    Question,
    Feedback,
    Complaint,
    Other,
}

impl MessageCategory {
    pub const ALL: [MessageCategory; 5] = [
        MessageCategory::Greeting,
        MessageCategory::Question,
        MessageCategory::Feedback,
        MessageCategory::Complaint,
        MessageCategory::Other,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            MessageCategory::Greeting => "Greeting",
            MessageCategory::Question => "Question",
            MessageCategory::Feedback => "Feedback",
            MessageCategory::Complaint => "Complaint",
            MessageCategory::Other => "Other",
        }
    }

    /// Reads a category out of free-form model output.
    ///
    /// Models pad the answer with quotes, punctuation, or a lead-in ("Category:
    /// Question."), so the first word naming a category wins. Anything else is
    /// `Other`.
    pub fn from_model_output(output: &str) -> Self {
        output
            .split(|c: char| !c.is_alphanumeric())
            .filter(|word| !word.is_empty())
            .find_map(|word| {
                MessageCategory::ALL
                    .into_iter()
                    .find(|category| category.as_str().eq_ignore_ascii_case(word))
            })
            .unwrap_or(MessageCategory::Other)
    }
}

impl fmt::Display for MessageCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One earlier message of a conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
}

impl HistoryEntry {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_from_bare_answer() {
        assert_eq!(
            MessageCategory::from_model_output("Complaint"),
            MessageCategory::Complaint
        );
        assert_eq!(
            MessageCategory::from_model_output("  greeting\n"),
            MessageCategory::Greeting
        );
    }

    #[test]
    fn test_category_from_padded_answer() {
        assert_eq!(
            MessageCategory::from_model_output("Category: \"Question\"."),
            MessageCategory::Question
        );
    }

    #[test]
    fn test_unrecognised_answer_is_other() {
        assert_eq!(
            MessageCategory::from_model_output("I cannot decide"),
            MessageCategory::Other
        );
        assert_eq!(MessageCategory::from_model_output(""), MessageCategory::Other);
    }

    #[test]
    fn test_history_entry_json_shape() {
        let entries: Vec<HistoryEntry> =
            serde_json::from_str(r#"[{"text":"first"},{"text":"second"}]"#).unwrap();
        assert_eq!(entries, vec![HistoryEntry::new("first"), HistoryEntry::new("second")]);
    }
}
