//! Infrastructure layer for helpbot.
//!
//! Filesystem adapters for the types defined in `helpbot-types`: the global
//! `config.toml` loader, the inline JSON widget configuration parser, and the
//! knowledge pack loader (TOML or JSON).

pub mod config;
pub mod knowledge;
