//! # Assistant Controller
//!
//! File: cli/src/assistant/mod.rs
//!
//! ## Overview
//!
//! The chat-bot webhook. A message is classified by the AI service, answered
//! with a generated reply, and the reply carries an "Add contact" button that
//! opens the contact dialog. Clicks on that button (and on everything inside
//! the dialog it opens) arrive on this same endpoint, so card clicks are
//! handed to the `DialogController`.
//!
//! AI failures are not caught here. They propagate to the HTTP layer, which
//! turns them into a 502.
//!
use crate::ai::AiService;
use crate::chat::cards::{Action, Button, Widget};
use crate::chat::event::{EventKind, InteractionEvent};
use crate::chat::response::ChatResponse;
use crate::core::error::{CardbotError, Result};
use crate::dialog::{DialogController, DialogStep};
use anyhow::anyhow;
use std::sync::Arc;
use tracing::{debug, info};

pub const ADD_CONTACT_BUTTON_TEXT: &str = "Add contact";

/// Sent when the AI service has no reply for the message.
pub const FALLBACK_REPLY: &str =
    "Thanks for your message! I don't have an answer for that, but I can help you add a contact.";

/// Sent for a message with no text, without calling the AI service.
pub const EMPTY_MESSAGE_PROMPT: &str = "Type a message and I'll do my best to help.";

pub const GREETING: &str =
    "Hi! Send me a message and I'll answer it, or use the button below a reply to add a contact.";

#[derive(Clone)]
pub struct AssistantController {
    ai: Arc<dyn AiService>,
    dialog: DialogController,
}

impl AssistantController {
    pub fn new(ai: Arc<dyn AiService>, dialog: DialogController) -> Self {
        Self { ai, dialog }
    }

    pub async fn handle(&self, event: &InteractionEvent) -> Result<ChatResponse> {
        match event.kind {
            EventKind::Message => self.on_message(event).await,
            EventKind::CardClicked => {
                debug!("Delegating card click to the contact dialog");
                Ok(self.dialog.respond(event)?)
            }
            EventKind::AddedToSpace => {
                info!("Assistant added to a space");
                Ok(ChatResponse::text_with_accessories(GREETING, Vec::new()))
            }
            EventKind::RemovedFromSpace | EventKind::Other => {
                debug!("Ignoring {:?} event", event.kind);
                Ok(ChatResponse::empty())
            }
        }
    }

    async fn on_message(&self, event: &InteractionEvent) -> Result<ChatResponse> {
        if event.message.is_none() {
            return Err(anyhow!(CardbotError::MalformedEvent(
                "MESSAGE event without `message`".into()
            )));
        }
        let text = match event.user_text() {
            Some(text) if !text.is_empty() => text,
            _ => {
                debug!("Empty message; prompting for text");
                return Ok(ChatResponse::text_with_accessories(
                    EMPTY_MESSAGE_PROMPT,
                    Vec::new(),
                ));
            }
        };

        let category = self.ai.classify_message(text).await?;
        info!("Message classified as {}", category);

        let reply = self
            .ai
            .generate_reply(category, text)
            .await?
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        Ok(ChatResponse::text_with_accessories(
            reply,
            vec![add_contact_button()],
        ))
    }
}

/// Button list opening the contact dialog at its first step.
pub fn add_contact_button() -> Widget {
    Widget::buttons(vec![Button::new(
        ADD_CONTACT_BUTTON_TEXT,
        Action::new(DialogStep::Initial.function_name()).opening_dialog(),
    )])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{HistoryEntry, MessageCategory};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct ScriptedAi {
        reply: Option<String>,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl AiService for ScriptedAi {
        async fn classify_message(&self, _text: &str) -> Result<MessageCategory> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(MessageCategory::Question)
        }

        async fn generate_reply(
            &self,
            _category: MessageCategory,
            _text: &str,
        ) -> Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.reply.clone())
        }

        async fn detects_question(&self, _text: &str) -> Result<bool> {
            Ok(true)
        }

        async fn answer_from_history(
            &self,
            _question: &str,
            _history: &[HistoryEntry],
        ) -> Result<String> {
            Ok(String::new())
        }
    }

    fn controller(ai: Arc<ScriptedAi>) -> AssistantController {
        AssistantController::new(ai, DialogController::default())
    }

    fn event(value: serde_json::Value) -> InteractionEvent {
        serde_json::from_value(value).unwrap()
    }

    #[tokio::test]
    async fn test_reply_carries_add_contact_button() {
        let ai = Arc::new(ScriptedAi {
            reply: Some("Sure, happy to help.".into()),
            ..ScriptedAi::default()
        });
        let response = controller(ai)
            .handle(&event(json!({ "type": "MESSAGE", "message": { "text": "Can you help?" } })))
            .await
            .unwrap();

        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["text"], "Sure, happy to help.");
        let button = &body["accessoryWidgets"][0]["buttonList"]["buttons"][0];
        assert_eq!(button["text"], ADD_CONTACT_BUTTON_TEXT);
        assert_eq!(button["onClick"]["action"]["function"], "openInitialDialog");
        assert_eq!(button["onClick"]["action"]["interaction"], "OPEN_DIALOG");
    }

    #[tokio::test]
    async fn test_missing_reply_uses_fallback() {
        let response = controller(Arc::new(ScriptedAi::default()))
            .handle(&event(json!({ "type": "MESSAGE", "message": { "text": "hmm" } })))
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some(FALLBACK_REPLY));
    }

    #[tokio::test]
    async fn test_empty_text_skips_ai() {
        let ai = Arc::new(ScriptedAi::default());
        let response = controller(ai.clone())
            .handle(&event(json!({ "type": "MESSAGE", "message": { "text": "   " } })))
            .await
            .unwrap();
        assert_eq!(response.text.as_deref(), Some(EMPTY_MESSAGE_PROMPT));
        assert_eq!(ai.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_card_click_opens_contact_dialog() {
        let response = controller(Arc::new(ScriptedAi::default()))
            .handle(&event(json!({
                "type": "CARD_CLICKED",
                "common": { "invokedFunction": "openInitialDialog" }
            })))
            .await
            .unwrap();
        let body = serde_json::to_value(response).unwrap();
        assert_eq!(body["actionResponse"]["type"], "DIALOG");
    }

    #[tokio::test]
    async fn test_message_without_body_is_malformed() {
        let err = controller(Arc::new(ScriptedAi::default()))
            .handle(&event(json!({ "type": "MESSAGE" })))
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CardbotError>(),
            Some(CardbotError::MalformedEvent(_))
        ));
    }
}
