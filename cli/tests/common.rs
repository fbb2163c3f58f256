//! # CardBot Integration Test Common Helpers
//!
//! File: cli/tests/common.rs
//!
//! ## Overview
//!
//! Shared helpers for the integration tests in `cli/tests/`: a handle on the
//! compiled binary, builders for the interaction events the chat platform
//! sends, and a scripted `AiService` for driving the assistant without a
//! network.
//!

// Different test files use different helpers.
#![allow(dead_code)]

pub use assert_cmd::Command;

use async_trait::async_trait;
use cardbot::ai::{AiService, HistoryEntry, MessageCategory};
use cardbot::core::error::{CardbotError, Result};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};

/// The compiled `cardbot` binary.
pub fn cardbot_cmd() -> Command {
    Command::cargo_bin("cardbot").expect("Failed to find cardbot binary for testing")
}

pub fn user() -> Value {
    json!({ "name": "users/123", "displayName": "Ada Lovelace", "type": "HUMAN" })
}

/// A plain `MESSAGE` event.
pub fn message_event(text: &str) -> Value {
    json!({ "type": "MESSAGE", "user": user(), "message": { "text": text } })
}

/// A `MESSAGE` event carrying a slash command.
pub fn slash_command_event(command_id: i64, text: &str) -> Value {
    json!({
        "type": "MESSAGE",
        "user": user(),
        "message": {
            "text": text,
            "slashCommand": { "commandId": command_id.to_string() }
        }
    })
}

/// "Review and submit" clicked inside the dialog with the given form state.
pub fn confirmation_event(name: &str, birthdate_millis: Option<i64>, contact_type: &str) -> Value {
    let mut inputs = json!({
        "contactName": { "stringInputs": { "value": [name] } },
        "contactType": { "stringInputs": { "value": [contact_type] } }
    });
    if let Some(millis) = birthdate_millis {
        inputs["contactBirthdate"] = json!({ "dateInput": { "msSinceEpoch": millis.to_string() } });
    }
    json!({
        "type": "CARD_CLICKED",
        "user": user(),
        "isDialogEvent": true,
        "dialogEventType": "SUBMIT_DIALOG",
        "common": { "invokedFunction": "openConfirmation", "formInputs": inputs }
    })
}

/// "Submit" clicked with the parameters the Confirmation step attached.
pub fn submission_event(name: &str, dialog_event_type: Option<&str>) -> Value {
    let mut event = json!({
        "type": "CARD_CLICKED",
        "user": user(),
        "common": {
            "invokedFunction": "submitForm",
            "parameters": {
                "contactName": name,
                "contactBirthdate": "631152000000",
                "contactType": "Work"
            }
        }
    });
    if let Some(kind) = dialog_event_type {
        event["isDialogEvent"] = json!(true);
        event["dialogEventType"] = json!(kind);
    }
    event
}

/// Canned answers for each `AiService` operation, with a call counter.
#[derive(Default)]
pub struct FakeAi {
    pub category: Option<MessageCategory>,
    pub reply: Option<String>,
    pub is_question: bool,
    pub answer: String,
    /// Every call fails with an upstream error when set.
    pub fail_with_status: Option<u16>,
    pub calls: AtomicUsize,
}

impl FakeAi {
    pub fn replying(reply: &str) -> Self {
        Self {
            category: Some(MessageCategory::Question),
            reply: Some(reply.to_string()),
            ..Self::default()
        }
    }

    pub fn failing(status: u16) -> Self {
        Self {
            fail_with_status: Some(status),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn record(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.fail_with_status {
            Some(status) => Err(CardbotError::UpstreamStatus {
                status,
                body: "scripted failure".to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AiService for FakeAi {
    async fn classify_message(&self, _text: &str) -> Result<MessageCategory> {
        self.record()?;
        Ok(self.category.unwrap_or(MessageCategory::Other))
    }

    async fn generate_reply(&self, _category: MessageCategory, _text: &str) -> Result<Option<String>> {
        self.record()?;
        Ok(self.reply.clone())
    }

    async fn detects_question(&self, _text: &str) -> Result<bool> {
        self.record()?;
        Ok(self.is_question)
    }

    async fn answer_from_history(&self, _question: &str, _history: &[HistoryEntry]) -> Result<String> {
        self.record()?;
        Ok(self.answer.clone())
    }
}
