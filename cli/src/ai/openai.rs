//! # OpenAI-Compatible Chat Completion Client
//!
//! File: cli/src/ai/openai.rs
//!
//! ## Overview
//!
//! Implements `AiService` on top of `POST {base_url}/chat/completions`. Every
//! operation renders one prompt template, sends it with the shared system
//! prompt, and interprets the first choice's text. One request per call: no
//! retries and no client-side timeout.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let client = OpenAiClient::from_settings(&config.ai)?;
//! let category = client.classify_message("Hi team!").await?;
//! ```
//!
use super::{AiService, HistoryEntry, MessageCategory};
use crate::core::config::AiSettings;
use crate::core::error::{CardbotError, Result};
use crate::core::templating::PromptTemplates;
use anyhow::anyhow;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::fmt;
use tera::Context;
use tracing::debug;

pub struct OpenAiClient {
    http: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    prompts: PromptTemplates,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiClient {
    pub fn new(
        base_url: &str,
        model: impl Into<String>,
        api_key: impl Into<String>,
        temperature: f32,
        prompts: PromptTemplates,
    ) -> Self {
        Self {
            http: Client::new(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            model: model.into(),
            api_key: api_key.into(),
            temperature,
            prompts,
        }
    }

    /// Builds the client from configuration, reading the API key from the
    /// environment variable named by `api_key_env`.
    ///
    /// ## Errors
    ///
    /// `CardbotError::AiUnavailable` when the variable is unset or blank; a
    /// template error when a prompt override does not compile.
    pub fn from_settings(settings: &AiSettings) -> Result<Self> {
        let api_key = std::env::var(&settings.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                anyhow!(CardbotError::AiUnavailable(format!(
                    "environment variable {} is not set",
                    settings.api_key_env
                )))
            })?;
        let prompts = PromptTemplates::load(settings.prompts_dir.as_deref())?;
        Ok(Self::new(
            &settings.base_url,
            settings.model.clone(),
            api_key,
            settings.temperature,
            prompts,
        ))
    }

    /// Renders `template` and returns the model's answer, trimmed.
    async fn ask(&self, template: &str, context: &Context) -> Result<String> {
        let prompt = self.prompts.render(template, context)?;
        self.complete(&prompt).await
    }

    async fn complete(&self, user_prompt: &str) -> Result<String> {
        let system_prompt = self.prompts.render("system", &Context::new())?;
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature: self.temperature,
        };

        debug!("POST {} (model {})", self.endpoint, self.model);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(CardbotError::from)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!(CardbotError::UpstreamStatus {
                status: status.as_u16(),
                body,
            }));
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(CardbotError::from)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();
        debug!("Completion returned {} characters", content.len());
        Ok(content.trim().to_string())
    }
}

impl fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("endpoint", &self.endpoint)
            .field("model", &self.model)
            .field("api_key", &"<redacted>")
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[async_trait]
impl AiService for OpenAiClient {
    async fn classify_message(&self, text: &str) -> Result<MessageCategory> {
        let mut context = Context::new();
        context.insert("text", text);
        context.insert("categories", &MessageCategory::ALL.map(MessageCategory::as_str));
        let answer = self.ask("classify", &context).await?;
        Ok(MessageCategory::from_model_output(&answer))
    }

    async fn generate_reply(
        &self,
        category: MessageCategory,
        text: &str,
    ) -> Result<Option<String>> {
        if category == MessageCategory::Other {
            return Ok(None);
        }
        let mut context = Context::new();
        context.insert("text", text);
        context.insert("category", category.as_str());
        let reply = self.ask("reply", &context).await?;
        Ok(Some(reply).filter(|reply| !reply.is_empty()))
    }

    async fn detects_question(&self, text: &str) -> Result<bool> {
        let mut context = Context::new();
        context.insert("text", text);
        let answer = self.ask("question", &context).await?;
        Ok(answer
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_ascii_lowercase()
            .starts_with("yes"))
    }

    async fn answer_from_history(
        &self,
        question: &str,
        history: &[HistoryEntry],
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("question", question);
        context.insert("history", history);
        self.ask("history", &context).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_without_double_slash() {
        let client = OpenAiClient::new(
            "http://localhost:1234/v1/",
            "m",
            "k",
            0.0,
            PromptTemplates::builtin().unwrap(),
        );
        assert_eq!(client.endpoint, "http://localhost:1234/v1/chat/completions");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let client = OpenAiClient::new(
            "http://localhost",
            "m",
            "sk-secret",
            0.0,
            PromptTemplates::builtin().unwrap(),
        );
        let rendered = format!("{:?}", client);
        assert!(!rendered.contains("sk-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_missing_api_key_is_unavailable() {
        let settings = AiSettings {
            api_key_env: "CARDBOT_TEST_KEY_THAT_IS_NEVER_SET".to_string(),
            ..AiSettings::default()
        };
        let err = OpenAiClient::from_settings(&settings).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CardbotError>(),
            Some(CardbotError::AiUnavailable(_))
        ));
    }
}
