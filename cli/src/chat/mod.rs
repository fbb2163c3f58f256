//! # Chat Platform Wire Model
//!
//! File: cli/src/chat/mod.rs
//!
//! ## Overview
//!
//! Typed JSON model of what the chat platform sends (`event`) and what the
//! webhooks answer (`cards`, `response`). Nothing here makes decisions; the
//! controllers in `dialog` and `assistant` do.
//!
pub mod cards;
pub mod event;
pub mod response;
