//! # Outbound Webhook Responses
//!
//! File: cli/src/chat/response.rs
//!
//! ## Overview
//!
//! `ChatResponse` is the single JSON body both webhooks return. All fields are
//! optional and omitted when unset, so each constructor produces exactly one of
//! the response shapes the chat platform accepts:
//!
//! - `{ text, accessoryWidgets }`
//! - `{ actionResponse: { type: "DIALOG", dialogAction: { dialog } } }`
//! - `{ actionResponse: { type: "DIALOG", dialogAction: { actionStatus } } }`
//! - `{ actionResponse: { type: "UPDATE_MESSAGE" | "NEW_MESSAGE" }, privateMessageViewer, text?, cardsV2? }`
//! - `{}` (nothing to say)
//!
use super::cards::{Card, CardWithId, Section, Widget};
use super::event::User;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_response: Option<ActionResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_message_viewer: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub cards_v2: Vec<CardWithId>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub accessory_widgets: Vec<Widget>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionResponse {
    #[serde(rename = "type")]
    pub kind: ResponseType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog_action: Option<DialogAction>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResponseType {
    NewMessage,
    UpdateMessage,
    Dialog,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialog: Option<Dialog>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_status: Option<ActionStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dialog {
    pub body: Card,
}

/// Outcome of a dialog submission, shown by the client inside the dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionStatus {
    pub status_code: StatusCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_facing_message: Option<String>,
}

impl ActionStatus {
    /// Closes the dialog.
    pub fn ok(message: Option<String>) -> Self {
        Self {
            status_code: StatusCode::Ok,
            user_facing_message: message,
        }
    }

    /// Keeps the dialog open and shows `message`.
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::InvalidArgument,
            user_facing_message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusCode {
    Ok,
    InvalidArgument,
}

/// `cardId` used for the single card a response carries.
const CARD_ID: &str = "contactCard";

impl ChatResponse {
    /// Opens (or replaces the content of) a dialog.
    pub fn dialog(sections: Vec<Section>) -> Self {
        Self::dialog_action(DialogAction {
            dialog: Some(Dialog {
                body: Card { sections },
            }),
            action_status: None,
        })
    }

    /// Reports a dialog action status.
    pub fn action_status(status: ActionStatus) -> Self {
        Self::dialog_action(DialogAction {
            dialog: None,
            action_status: Some(status),
        })
    }

    fn dialog_action(action: DialogAction) -> Self {
        Self {
            action_response: Some(ActionResponse {
                kind: ResponseType::Dialog,
                dialog_action: Some(action),
            }),
            ..Self::default()
        }
    }

    /// Replaces the card of the message the click came from.
    pub fn update_message(sections: Vec<Section>, viewer: Option<User>) -> Self {
        Self {
            action_response: Some(ActionResponse {
                kind: ResponseType::UpdateMessage,
                dialog_action: None,
            }),
            private_message_viewer: viewer,
            cards_v2: vec![CardWithId {
                card_id: CARD_ID.to_string(),
                card: Card { sections },
            }],
            ..Self::default()
        }
    }

    /// Posts a new text message, visible only to `viewer` when given.
    pub fn new_message(text: impl Into<String>, viewer: Option<User>) -> Self {
        Self {
            action_response: Some(ActionResponse {
                kind: ResponseType::NewMessage,
                dialog_action: None,
            }),
            private_message_viewer: viewer,
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// A plain text reply with widgets attached below it.
    pub fn text_with_accessories(text: impl Into<String>, widgets: Vec<Widget>) -> Self {
        Self {
            text: Some(text.into()),
            accessory_widgets: widgets,
            ..Self::default()
        }
    }

    /// Acknowledges an event without saying anything.
    pub fn empty() -> Self {
        Self::default()
    }
}
