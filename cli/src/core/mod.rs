//! # CardBot Core Infrastructure
//!
//! File: cli/src/core/mod.rs
//!
//! ## Overview
//!
//! This module aggregates the core infrastructure components shared by the
//! webhook handlers and the CLI commands.
//!
//! ## Architecture
//!
//! - `config`: Layered configuration loading, merging, and validation
//! - `error`: Error types and the crate-wide `Result` alias
//! - `templating`: Prompt template rendering with Tera
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cardbot::core::config; // For loading configuration
//! use cardbot::core::error::{CardbotError, Result}; // For error handling
//! use cardbot::core::templating::PromptTemplates; // For prompt rendering
//! ```
//!
pub mod config;
pub mod error;
pub mod templating;
