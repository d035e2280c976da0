//! Shared domain types for helpbot.
//!
//! This crate contains the core domain types used across the helpbot
//! workspace: knowledge entries and their ordered mappings, chat messages,
//! widget configuration, conversation events, and their error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod chat;
pub mod config;
pub mod error;
pub mod event;
pub mod knowledge;
