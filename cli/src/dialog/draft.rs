//! # Contact Draft
//!
//! File: cli/src/dialog/draft.rs
//!
//! ## Overview
//!
//! `ContactDraft` is the in-progress contact rebuilt on every request. It is
//! never stored: the Confirmation step reads it from the submitted form inputs
//! and writes it into the "Submit" button's parameters, and the Submission step
//! reads it back from those parameters.
//!
//! ## Field Extraction
//!
//! - text field: first entry of its string list, absent when the list is empty
//! - date field: its millisecond timestamp, absent when null
//! - a field of the other input kind counts as absent
//!
use crate::chat::event::{FormInput, InteractionEvent};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Form field and action parameter names.
pub const CONTACT_NAME: &str = "contactName";
pub const CONTACT_BIRTHDATE: &str = "contactBirthdate";
pub const CONTACT_TYPE: &str = "contactType";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactType {
    Work,
    Personal,
}

impl ContactType {
    pub const ALL: [ContactType; 2] = [ContactType::Work, ContactType::Personal];

    pub const fn as_str(self) -> &'static str {
        match self {
            ContactType::Work => "Work",
            ContactType::Personal => "Personal",
        }
    }
}

impl FromStr for ContactType {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ContactType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| format!("unknown contact type '{}'", value))
    }
}

impl fmt::Display for ContactType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    /// Required at submission; empty when the user left it blank.
    pub name: String,
    pub birthdate_millis: Option<i64>,
    pub contact_type: Option<ContactType>,
}

impl ContactDraft {
    /// Reads the draft from the widgets of the contact form.
    pub fn from_form_inputs(inputs: &BTreeMap<String, FormInput>) -> Self {
        Self {
            name: text_value(inputs, CONTACT_NAME)
                .unwrap_or_default()
                .to_string(),
            birthdate_millis: date_value(inputs, CONTACT_BIRTHDATE),
            contact_type: text_value(inputs, CONTACT_TYPE).and_then(|v| v.parse().ok()),
        }
    }

    /// Reads the draft from the parameters the "Submit" button carried.
    pub fn from_parameters(event: &InteractionEvent) -> Self {
        Self {
            name: event.parameter(CONTACT_NAME).unwrap_or_default().to_string(),
            birthdate_millis: event
                .parameter(CONTACT_BIRTHDATE)
                .and_then(|v| v.trim().parse().ok()),
            contact_type: event.parameter(CONTACT_TYPE).and_then(|v| v.parse().ok()),
        }
    }

    /// `(key, value)` pairs to attach to the "Submit" button. Absent values
    /// become empty strings.
    pub fn parameters(&self) -> [(&'static str, String); 3] {
        [
            (CONTACT_NAME, self.name.clone()),
            (
                CONTACT_BIRTHDATE,
                self.birthdate_millis
                    .map(|millis| millis.to_string())
                    .unwrap_or_default(),
            ),
            (CONTACT_TYPE, self.contact_type_label().to_string()),
        ]
    }

    pub fn contact_type_label(&self) -> &'static str {
        self.contact_type.map(ContactType::as_str).unwrap_or("")
    }
}

/// Value of a text widget.
pub fn text_value<'a>(inputs: &'a BTreeMap<String, FormInput>, field: &str) -> Option<&'a str> {
    match inputs.get(field)? {
        FormInput::StringInputs { value } => value.first().map(String::as_str),
        FormInput::DateInput { .. } => None,
    }
}

/// Value of a date widget, in milliseconds since the epoch.
pub fn date_value(inputs: &BTreeMap<String, FormInput>, field: &str) -> Option<i64> {
    match inputs.get(field)? {
        FormInput::DateInput { ms_since_epoch } => *ms_since_epoch,
        FormInput::StringInputs { .. } => None,
    }
}
