//! # Contact Dialog Controller
//!
//! File: cli/src/dialog/mod.rs
//!
//! ## Overview
//!
//! The contact-form webhook. Each request carries one interaction event and
//! gets back exactly one `DialogResponse`; no state is kept between requests.
//! Everything the dialog has collected so far travels with the client, either
//! as form inputs or as parameters on the button that was clicked.
//!
//! ## Architecture
//!
//! ```text
//!   MESSAGE (/addContact, plain text) ─┐
//!   CARD_CLICKED openInitialDialog ────┴─> Initial ──"Review and submit"──┐
//!                                                                        v
//!   CARD_CLICKED openConfirmation ──────────────────────────────> Confirmation
//!                                                                        │
//!                                                                   "Submit"
//!                                                                        v
//!   CARD_CLICKED submitForm ──────────────────────────────────────> Submission
//! ```
//!
//! - `step`: the closed set of steps, parsed from `invokedFunction`
//! - `draft`: the contact being collected and the form-field extraction rules
//! - `form`: the sections rendered at each step
//! - `date`: long-form birthdate rendering
//!
//! Confirmation does not validate; only Submission checks that a name exists.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let controller = DialogController::new(&config.dialog)?;
//! let body: ChatResponse = controller.respond(&event)?;
//! ```
//!
use crate::chat::cards::Section;
use crate::chat::event::{DialogEventType, EventKind, InteractionEvent, User};
use crate::chat::response::{ActionStatus, ChatResponse};
use crate::core::config::DialogSettings;
use crate::core::error::{CardbotError, Result};
use chrono::{FixedOffset, Offset, Utc};
use tracing::{debug, info};

pub mod date;
pub mod draft;
pub mod form;
pub mod step;

pub use draft::{ContactDraft, ContactType};
pub use step::DialogStep;

/// Shown when a contact is submitted without a name.
pub const MISSING_NAME_MESSAGE: &str = "Don't forget to name your new contact!";

pub const ABOUT_MESSAGE: &str = "The Contact Manager app helps you manage your contacts.";

pub const WELCOME_MESSAGE: &str =
    "Thank you for adding the Contact Manager app. Use `/addContact` to add a contact.";

/// Slash command ids as registered with the chat platform.
const ABOUT_COMMAND_ID: i64 = 1;
const ADD_CONTACT_COMMAND_ID: i64 = 2;

/// The next UI state of the dialog.
#[derive(Debug, Clone, PartialEq)]
pub enum DialogResponse {
    /// Open a dialog, or replace the content of the one already open.
    OpenDialog(Vec<Section>),
    /// Replace the card of the message the click came from.
    UpdateMessage(Vec<Section>),
    /// Post a private text message to the user.
    PostMessage(String),
    /// Report the outcome of a dialog submission: `INVALID_ARGUMENT` keeps the
    /// dialog open with an error, `OK` closes it.
    Status(ActionStatus),
}

impl DialogResponse {
    /// The JSON body for this response. `viewer` receives private messages.
    pub fn into_chat_response(self, viewer: Option<User>) -> ChatResponse {
        match self {
            DialogResponse::OpenDialog(sections) => ChatResponse::dialog(sections),
            DialogResponse::UpdateMessage(sections) => {
                ChatResponse::update_message(sections, viewer)
            }
            DialogResponse::PostMessage(text) => ChatResponse::new_message(text, viewer),
            DialogResponse::Status(status) => ChatResponse::action_status(status),
        }
    }
}

/// The contact dialog state machine.
#[derive(Debug, Clone)]
pub struct DialogController {
    offset: FixedOffset,
}

impl Default for DialogController {
    fn default() -> Self {
        Self::with_offset(Utc.fix())
    }
}

impl DialogController {
    pub fn new(settings: &DialogSettings) -> Result<Self> {
        Ok(Self::with_offset(settings.offset()?))
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }

    /// Handles one event and renders the result as the webhook body.
    pub fn respond(
        &self,
        event: &InteractionEvent,
    ) -> std::result::Result<ChatResponse, CardbotError> {
        Ok(match self.handle(event)? {
            Some(response) => response.into_chat_response(event.user.clone()),
            None => ChatResponse::empty(),
        })
    }

    /// Decides the next UI state. `None` for event kinds the dialog ignores.
    pub fn handle(
        &self,
        event: &InteractionEvent,
    ) -> std::result::Result<Option<DialogResponse>, CardbotError> {
        match event.kind {
            EventKind::Message => self.on_message(event).map(Some),
            EventKind::CardClicked => self.on_card_click(event).map(Some),
            EventKind::AddedToSpace => {
                info!("Added to a space");
                Ok(Some(DialogResponse::PostMessage(WELCOME_MESSAGE.to_string())))
            }
            EventKind::RemovedFromSpace | EventKind::Other => {
                debug!("Ignoring {:?} event", event.kind);
                Ok(None)
            }
        }
    }

    fn on_message(
        &self,
        event: &InteractionEvent,
    ) -> std::result::Result<DialogResponse, CardbotError> {
        let message = event.message.as_ref().ok_or_else(|| {
            CardbotError::MalformedEvent("MESSAGE event without `message`".into())
        })?;

        match message.slash_command.map(|command| command.command_id) {
            Some(ABOUT_COMMAND_ID) => {
                debug!("Answering /about");
                Ok(DialogResponse::PostMessage(ABOUT_MESSAGE.to_string()))
            }
            Some(ADD_CONTACT_COMMAND_ID) => {
                debug!("Opening contact dialog from /addContact");
                Ok(initial())
            }
            Some(other) => {
                debug!("Unregistered slash command {}; opening contact dialog", other);
                Ok(initial())
            }
            None => {
                debug!("Plain message; opening contact dialog");
                Ok(initial())
            }
        }
    }

    fn on_card_click(
        &self,
        event: &InteractionEvent,
    ) -> std::result::Result<DialogResponse, CardbotError> {
        if event.dialog_event_type == DialogEventType::CancelDialog {
            debug!("Dialog cancelled");
            return Ok(DialogResponse::Status(ActionStatus::ok(None)));
        }

        let step: DialogStep = event.invoked_function()?.parse()?;
        debug!("Card click enters step {:?}", step);

        match step {
            DialogStep::Initial => Ok(initial()),
            DialogStep::Confirmation => self.confirmation(event),
            DialogStep::Submission => Ok(submission(event)),
        }
    }

    fn confirmation(
        &self,
        event: &InteractionEvent,
    ) -> std::result::Result<DialogResponse, CardbotError> {
        let draft = ContactDraft::from_form_inputs(event.form_inputs()?);
        let sections = form::confirmation_sections(&draft, &self.offset);

        if event.is_dialog_event {
            Ok(DialogResponse::OpenDialog(sections))
        } else {
            Ok(DialogResponse::UpdateMessage(sections))
        }
    }
}

fn initial() -> DialogResponse {
    DialogResponse::OpenDialog(form::initial_sections())
}

fn submission(event: &InteractionEvent) -> DialogResponse {
    let draft = ContactDraft::from_parameters(event);
    let dialog = event.is_dialog_submission();

    if draft.name.is_empty() {
        debug!("Submission without a contact name (dialog: {})", dialog);
        return if dialog {
            DialogResponse::Status(ActionStatus::invalid_argument(MISSING_NAME_MESSAGE))
        } else {
            DialogResponse::PostMessage(MISSING_NAME_MESSAGE.to_string())
        };
    }

    info!(
        "Contact submitted: type={:?}, has_birthdate={}",
        draft.contact_type,
        draft.birthdate_millis.is_some()
    );
    let confirmation = format!("✅ {} has been added to your contacts.", draft.name);
    if dialog {
        DialogResponse::Status(ActionStatus::ok(Some(confirmation)))
    } else {
        DialogResponse::PostMessage(confirmation)
    }
}
