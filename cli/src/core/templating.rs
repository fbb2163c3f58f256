//! # CardBot Prompt Templates
//!
//! File: cli/src/core/templating.rs
//!
//! ## Overview
//!
//! This module renders the prompt text sent to the language model. The prompt
//! wording is configuration, not logic: every prompt is a Tera template with a
//! built-in default that a deployment can replace by dropping a `<name>.tera`
//! file into the configured `prompts_dir`.
//!
//! ## Architecture
//!
//! | name       | variables                   | used by                  |
//! |------------|-----------------------------|--------------------------|
//! | `system`   | none                        | every completion request |
//! | `classify` | `text`, `categories`        | `classify_message`       |
//! | `reply`    | `text`, `category`          | `generate_reply`         |
//! | `question` | `text`                      | `detects_question`       |
//! | `history`  | `question`, `history[].text`| `answer_from_history`    |
//!
//! ## Examples
//!
//! ```rust,ignore
//! let prompts = PromptTemplates::load(config.ai.prompts_dir.as_deref())?;
//! let mut context = tera::Context::new();
//! context.insert("text", "Where is the office?");
//! let prompt = prompts.render("question", &context)?;
//! ```
//!
use crate::core::error::{CardbotError, Result};
use anyhow::Context as _;
use std::fs;
use std::path::Path;
use tera::{Context, Tera};
use tracing::{debug, info};

/// Names of every prompt template the AI client renders.
pub const PROMPT_NAMES: [&str; 5] = ["system", "classify", "reply", "question", "history"];

/// Extension of override files inside `prompts_dir`.
const TEMPLATE_EXTENSION: &str = "tera";

const DEFAULT_SYSTEM: &str = "You are a concise, friendly assistant living inside a team chat app. \
Keep answers short and plain; the chat client renders only basic formatting.";

const DEFAULT_CLASSIFY: &str = r#"Classify the chat message below into exactly one of these categories:
{% for category in categories %}- {{ category }}
{% endfor %}
Answer with the category name only.

Message: {{ text }}"#;

const DEFAULT_REPLY: &str = r#"A user sent the chat message below. It was classified as {{ category }}.
Write a short, friendly reply that fits that category.

Message: {{ text }}"#;

const DEFAULT_QUESTION: &str = r#"Does the chat message below ask a question? Answer "yes" or "no" only.

Message: {{ text }}"#;

const DEFAULT_HISTORY: &str = r#"Answer the question using only the conversation history below.
If the history does not contain the answer, say that you could not find it.

History:
{% for entry in history %}{{ loop.index }}. {{ entry.text }}
{% endfor %}
Question: {{ question }}"#;

/// The compiled set of prompt templates.
#[derive(Debug, Clone)]
pub struct PromptTemplates {
    tera: Tera,
}

impl PromptTemplates {
    /// Compiles the built-in prompts only.
    pub fn builtin() -> Result<Self> {
        let mut tera = Tera::default();
        tera.add_raw_templates(vec![
            ("system", DEFAULT_SYSTEM),
            ("classify", DEFAULT_CLASSIFY),
            ("reply", DEFAULT_REPLY),
            ("question", DEFAULT_QUESTION),
            ("history", DEFAULT_HISTORY),
        ])
        .map_err(CardbotError::from)?;
        Ok(Self { tera })
    }

    /// Compiles the built-in prompts, then replaces each one for which
    /// `<dir>/<name>.tera` exists.
    ///
    /// A missing directory is not an error (config validation already warned).
    pub fn load(dir: Option<&Path>) -> Result<Self> {
        let mut templates = Self::builtin()?;
        let Some(dir) = dir.filter(|d| d.is_dir()) else {
            debug!("Using built-in prompt templates.");
            return Ok(templates);
        };

        for name in PROMPT_NAMES {
            let path = dir.join(format!("{}.{}", name, TEMPLATE_EXTENSION));
            if !path.is_file() {
                continue;
            }
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read prompt template: {}", path.display()))?;
            templates
                .tera
                .add_raw_template(name, &content)
                .map_err(CardbotError::from)
                .with_context(|| format!("Invalid prompt template: {}", path.display()))?;
            info!("Loaded prompt override '{}' from {}", name, path.display());
        }
        Ok(templates)
    }

    /// Renders the named template.
    pub fn render(&self, name: &str, context: &Context) -> Result<String> {
        let rendered = self
            .tera
            .render(name, context)
            .map_err(CardbotError::from)?;
        Ok(rendered)
    }
}
