//! # Contact Form Layout
//!
//! File: cli/src/dialog/form.rs
//!
//! Builds the sections shown at each dialog step. Pure functions of their
//! inputs, so the same draft always renders the same JSON.
//!
use super::date::format_long_date;
use super::draft::{ContactDraft, ContactType, CONTACT_BIRTHDATE, CONTACT_NAME, CONTACT_TYPE};
use super::step::DialogStep;
use crate::chat::cards::{
    Action, Button, DateTimePicker, DateTimePickerType, SelectionInput, SelectionItem,
    SelectionType, Section, TextInput, TextInputType, Widget,
};
use chrono::FixedOffset;

pub const INITIAL_HEADER: &str = "Add new contact";
pub const CONFIRMATION_HEADER: &str = "Your contact";
pub const REVIEW_BUTTON_TEXT: &str = "Review and submit";
pub const SUBMIT_BUTTON_TEXT: &str = "Submit";

/// The three input widgets of the contact form.
pub fn contact_form_widgets() -> Vec<Widget> {
    vec![
        Widget::TextInput(TextInput {
            name: CONTACT_NAME.to_string(),
            label: "First and last name".to_string(),
            kind: TextInputType::SingleLine,
        }),
        Widget::DateTimePicker(DateTimePicker {
            name: CONTACT_BIRTHDATE.to_string(),
            label: "Birthdate".to_string(),
            kind: DateTimePickerType::DateOnly,
        }),
        Widget::SelectionInput(SelectionInput {
            name: CONTACT_TYPE.to_string(),
            label: "Contact type".to_string(),
            kind: SelectionType::RadioButton,
            items: ContactType::ALL
                .into_iter()
                .map(|kind| SelectionItem {
                    text: kind.to_string(),
                    value: kind.to_string(),
                    selected: false,
                })
                .collect(),
        }),
    ]
}

/// The empty form plus the button leading to Confirmation.
pub fn initial_sections() -> Vec<Section> {
    let mut widgets = contact_form_widgets();
    widgets.push(Widget::buttons(vec![Button::new(
        REVIEW_BUTTON_TEXT,
        Action::new(DialogStep::Confirmation.function_name()),
    )]));
    vec![Section::new(widgets).with_header(INITIAL_HEADER)]
}

/// Read-only summary of `draft` plus the button leading to Submission.
///
/// The button carries every field as a parameter, so Submission never needs
/// the form state again.
pub fn confirmation_sections(draft: &ContactDraft, offset: &FixedOffset) -> Vec<Section> {
    let birthday = draft
        .birthdate_millis
        .and_then(|millis| format_long_date(millis, offset))
        .unwrap_or_default();

    let submit = draft.parameters().into_iter().fold(
        Action::new(DialogStep::Submission.function_name()),
        |action, (key, value)| action.with_parameter(key, value),
    );

    vec![Section::new(vec![
        Widget::paragraph("Confirm contact information and submit:"),
        Widget::paragraph(format!("<b>Name:</b> {}", draft.name)),
        Widget::paragraph(format!("<b>Birthday:</b> {}", birthday)),
        Widget::paragraph(format!("<b>Type:</b> {}", draft.contact_type_label())),
        Widget::buttons(vec![Button::new(SUBMIT_BUTTON_TEXT, submit)]),
    ])
    .with_header(CONFIRMATION_HEADER)]
}
