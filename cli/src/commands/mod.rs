//! # CardBot Command Modules
//!
//! File: cli/src/commands/mod.rs
//!
//! ## Overview
//!
//! The top-level command groups of the `cardbot` CLI. Each group defines its
//! own clap argument struct and a `handle_*` function called from `main.rs`.
//!
//! - `serve`: runs the webhook HTTP server
//! - `ai`: calls the AI service from the terminal
//!

/// Command for the webhook HTTP server. Includes configuration and server logic.
pub mod serve;
/// Command group exposing the AI operations (`classify`, `reply`, `ask`).
pub mod ai;
