//! # Inbound Interaction Events
//!
//! File: cli/src/chat/event.rs
//!
//! ## Overview
//!
//! The JSON payload the chat platform POSTs for every user action. Only the
//! fields the webhooks read are modelled; everything else in the payload is
//! ignored by serde.
//!
//! Form inputs arrive as a one-key object naming the input kind
//! (`{"stringInputs": {...}}` or `{"dateInput": {...}}`), which maps onto the
//! externally tagged `FormInput` enum. Google-style int64 fields
//! (`msSinceEpoch`, `commandId`) may be encoded as JSON strings or numbers.
//!
use crate::core::error::CardbotError;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// One user action delivered to a webhook.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionEvent {
    #[serde(rename = "type")]
    pub kind: EventKind,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub common: Option<CommonEventObject>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub is_dialog_event: bool,
    #[serde(default)]
    pub dialog_event_type: DialogEventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Message,
    CardClicked,
    AddedToSpace,
    RemovedFromSpace,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DialogEventType {
    RequestDialog,
    SubmitDialog,
    CancelDialog,
    /// Also covers `TYPE_UNSPECIFIED` and values this service does not know.
    #[default]
    #[serde(other)]
    None,
}

/// The message that triggered a `MESSAGE` event.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default)]
    pub text: Option<String>,
    /// The text with the bot mention or slash command stripped.
    #[serde(default)]
    pub argument_text: Option<String>,
    #[serde(default)]
    pub slash_command: Option<SlashCommand>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlashCommand {
    #[serde(deserialize_with = "int_or_string")]
    pub command_id: i64,
}

/// The acting user. Echoed back as `privateMessageViewer`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// Client-side state attached to card clicks and dialog submissions.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommonEventObject {
    #[serde(default)]
    pub invoked_function: Option<String>,
    #[serde(default)]
    pub form_inputs: Option<BTreeMap<String, FormInput>>,
    #[serde(default)]
    pub parameters: BTreeMap<String, String>,
}

/// The value of one form widget.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FormInput {
    StringInputs {
        #[serde(default)]
        value: Vec<String>,
    },
    DateInput {
        #[serde(
            rename = "msSinceEpoch",
            default,
            deserialize_with = "opt_int_or_string"
        )]
        ms_since_epoch: Option<i64>,
    },
}

impl InteractionEvent {
    /// The `common` block, which every card click must carry.
    pub fn common(&self) -> Result<&CommonEventObject, CardbotError> {
        self.common
            .as_ref()
            .ok_or_else(|| CardbotError::MalformedEvent("event has no `common` block".into()))
    }

    /// The name of the function bound to the clicked control.
    pub fn invoked_function(&self) -> Result<&str, CardbotError> {
        self.common()?.invoked_function.as_deref().ok_or_else(|| {
            CardbotError::MalformedEvent("card click without `invokedFunction`".into())
        })
    }

    /// The submitted widget values.
    pub fn form_inputs(&self) -> Result<&BTreeMap<String, FormInput>, CardbotError> {
        self.common()?
            .form_inputs
            .as_ref()
            .ok_or_else(|| CardbotError::MalformedEvent("event has no `formInputs` map".into()))
    }

    /// An action parameter of the clicked control, if present.
    pub fn parameter(&self, key: &str) -> Option<&str> {
        self.common
            .as_ref()
            .and_then(|common| common.parameters.get(key))
            .map(String::as_str)
    }

    /// The text the user typed, preferring `argumentText` over `text`.
    pub fn user_text(&self) -> Option<&str> {
        let message = self.message.as_ref()?;
        message
            .argument_text
            .as_deref()
            .or(message.text.as_deref())
            .map(str::trim)
    }

    pub fn is_dialog_submission(&self) -> bool {
        self.dialog_event_type == DialogEventType::SubmitDialog
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(i64),
    Str(String),
}

fn int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    match IntOrString::deserialize(deserializer)? {
        IntOrString::Int(value) => Ok(value),
        IntOrString::Str(text) => text.trim().parse().map_err(de::Error::custom),
    }
}

fn opt_int_or_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    match Option::<IntOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(IntOrString::Int(value)) => Ok(Some(value)),
        Some(IntOrString::Str(text)) if text.trim().is_empty() => Ok(None),
        Some(IntOrString::Str(text)) => text.trim().parse().map(Some).map_err(de::Error::custom),
    }
}
