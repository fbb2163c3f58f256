//! # CardBot
//!
//! File: cli/src/lib.rs
//!
//! Webhook service for a chat platform: a multi-step contact-form dialog and
//! an assistant that answers messages through a hosted language model. The
//! `cardbot` binary wires these modules into a CLI and an HTTP server.
//!
//! - `chat`: wire model of interaction events, cards and responses
//! - `dialog`: the contact dialog state machine
//! - `ai`: the `AiService` trait and its OpenAI-compatible client
//! - `assistant`: the assistant webhook built on `ai`
//! - `web`: the axum router exposing both webhooks
//! - `core`: configuration, errors and prompt templates
//!
pub mod ai;
pub mod assistant;
pub mod chat;
pub mod core;
pub mod dialog;
pub mod web;
