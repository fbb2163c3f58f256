//! # Dialog Steps
//!
//! File: cli/src/dialog/step.rs
//!
//! The contact dialog is advanced by button clicks; each button names the
//! function the next `CARD_CLICKED` event invokes. `DialogStep` is that name
//! parsed into a closed set, so the controller's dispatch is an exhaustive match.
//!
use crate::core::error::CardbotError;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogStep {
    /// Show the empty contact form.
    Initial,
    /// Show the read-only summary with a "Submit" button.
    Confirmation,
    /// Validate and acknowledge the submitted contact.
    Submission,
}

impl DialogStep {
    pub const ALL: [DialogStep; 3] = [
        DialogStep::Initial,
        DialogStep::Confirmation,
        DialogStep::Submission,
    ];

    /// The `function` a button sets to enter this step.
    pub const fn function_name(self) -> &'static str {
        match self {
            DialogStep::Initial => "openInitialDialog",
            DialogStep::Confirmation => "openConfirmation",
            DialogStep::Submission => "submitForm",
        }
    }
}

impl FromStr for DialogStep {
    type Err = CardbotError;

    fn from_str(function: &str) -> Result<Self, Self::Err> {
        DialogStep::ALL
            .into_iter()
            .find(|step| step.function_name() == function)
            .ok_or_else(|| CardbotError::UnknownAction {
                function: function.to_string(),
            })
    }
}

impl fmt::Display for DialogStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.function_name())
    }
}
