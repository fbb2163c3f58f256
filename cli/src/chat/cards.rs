//! # Card and Dialog Widgets
//!
//! File: cli/src/chat/cards.rs
//!
//! ## Overview
//!
//! Serializable model of the card UI the chat client renders: sections holding
//! widgets, and buttons whose `onClick` action names the function the next
//! `CARD_CLICKED` event will carry. Every widget serializes as a one-key object
//! (`{"textInput": {...}}`), which is exactly serde's externally tagged enum
//! representation.
//!
//! ## Examples
//!
//! ```rust,ignore
//! let section = Section::new(vec![
//!     Widget::paragraph("Hello"),
//!     Widget::buttons(vec![Button::new("Next", Action::new("openConfirmation"))]),
//! ]);
//! ```
//!
use serde::Serialize;

/// A titled group of widgets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
    pub widgets: Vec<Widget>,
}

impl Section {
    pub fn new(widgets: Vec<Widget>) -> Self {
        Self {
            header: None,
            widgets,
        }
    }

    pub fn with_header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Widget {
    TextParagraph(TextParagraph),
    TextInput(TextInput),
    DateTimePicker(DateTimePicker),
    SelectionInput(SelectionInput),
    ButtonList(ButtonList),
}

impl Widget {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Widget::TextParagraph(TextParagraph { text: text.into() })
    }

    pub fn buttons(buttons: Vec<Button>) -> Self {
        Widget::ButtonList(ButtonList { buttons })
    }

    /// The form field name of an input widget; `None` for display widgets.
    pub fn input_name(&self) -> Option<&str> {
        match self {
            Widget::TextInput(input) => Some(&input.name),
            Widget::DateTimePicker(picker) => Some(&picker.name),
            Widget::SelectionInput(selection) => Some(&selection.name),
            Widget::TextParagraph(_) | Widget::ButtonList(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextParagraph {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextInput {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: TextInputType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextInputType {
    SingleLine,
    MultipleLine,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateTimePicker {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: DateTimePickerType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DateTimePickerType {
    DateOnly,
    DateAndTime,
    TimeOnly,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionInput {
    pub name: String,
    pub label: String,
    #[serde(rename = "type")]
    pub kind: SelectionType,
    pub items: Vec<SelectionItem>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectionType {
    RadioButton,
    CheckBox,
    Dropdown,
    Switch,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionItem {
    pub text: String,
    pub value: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ButtonList {
    pub buttons: Vec<Button>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub text: String,
    pub on_click: OnClick,
}

impl Button {
    pub fn new(text: impl Into<String>, action: Action) -> Self {
        Self {
            text: text.into(),
            on_click: OnClick { action },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnClick {
    pub action: Action,
}

/// What the client sends back when a button is clicked.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Action {
    pub function: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ActionParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction: Option<Interaction>,
}

impl Action {
    pub fn new(function: impl Into<String>) -> Self {
        Self {
            function: function.into(),
            parameters: Vec::new(),
            interaction: None,
        }
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.parameters.push(ActionParameter {
            key: key.into(),
            value: value.into(),
        });
        self
    }

    /// Marks the action as one that opens a dialog from a plain message.
    pub fn opening_dialog(mut self) -> Self {
        self.interaction = Some(Interaction::OpenDialog);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionParameter {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Interaction {
    OpenDialog,
}

/// A card body (also the body of a dialog).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Card {
    pub sections: Vec<Section>,
}

/// One entry of a message's `cardsV2` list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithId {
    pub card_id: String,
    pub card: Card,
}
