//! Matching engine and conversation controller for helpbot.
//!
//! This crate holds all behavior: text normalization and knowledge lookup
//! (`matcher`), the external resolver port (`resolver`), the event bus
//! (`event`), and the `Widget` conversation controller (`widget`). It
//! depends only on `helpbot-types` -- never on `helpbot-infra` or any
//! filesystem crate.

pub mod event;
pub mod matcher;
pub mod resolver;
pub mod widget;
