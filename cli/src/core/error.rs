//! # CardBot Error Types
//!
//! File: cli/src/core/error.rs
//!
//! ## Overview
//!
//! This module defines the error types and error handling mechanisms used throughout
//! CardBot. It provides a consistent approach to error management with detailed
//! error information and context.
//!
//! ## Architecture
//!
//! The error system consists of two main components:
//! - `CardbotError`: A custom error enum using `thiserror` for specific error types
//! - `Result<T>`: A type alias for `anyhow::Result<T>` for flexible error handling
//!
//! The error types cover the failure classes of the service:
//! - Configuration errors
//! - Malformed interaction events (missing fields, unknown card actions)
//! - Upstream failures of the AI service
//! - Prompt template errors
//!
//! A missing contact name is *not* an error: it is a normal dialog outcome
//! rendered as a user-facing status message.
//!
//! ## Examples
//!
//! ```rust,ignore
//! // Return a specific error type
//! let common = event.common.as_ref().ok_or_else(|| {
//!     CardbotError::MalformedEvent("card click without `common`".into())
//! })?;
//!
//! // Pattern matching on error types at the HTTP boundary
//! match err.downcast_ref::<CardbotError>() {
//!     Some(CardbotError::MalformedEvent(_)) => StatusCode::BAD_REQUEST,
//!     _ => StatusCode::INTERNAL_SERVER_ERROR,
//! }
//! ```
//!
use thiserror::Error;

/// Custom error type for CardBot.
#[derive(Error, Debug)]
pub enum CardbotError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Malformed event: {0}")]
    MalformedEvent(String),

    #[error("Unknown card action '{function}'")]
    UnknownAction { function: String },

    #[error("AI service request failed: {source}")]
    Upstream {
        #[from]
        source: reqwest::Error,
    },

    #[error("AI service returned HTTP {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("AI service is not configured: {0}")]
    AiUnavailable(String),

    #[error("Prompt template error: {source}")]
    Template {
        #[from]
        source: tera::Error,
    },
}

impl CardbotError {
    /// Whether the failure was caused by the caller's payload rather than by this
    /// service or its collaborators.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CardbotError::MalformedEvent(_) | CardbotError::UnknownAction { .. }
        )
    }
}

/// Type alias for Result using anyhow::Error for broad compatibility.
pub type Result<T> = anyhow::Result<T>;
