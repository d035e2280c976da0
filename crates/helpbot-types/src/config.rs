//! Configuration types for helpbot.
//!
//! `WidgetConfig` is the configuration bag a host application hands to a
//! widget; `GlobalConfig` is the `config.toml` read by the CLI.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::knowledge::{KeywordIndex, KnowledgeBase, KnowledgePack, QuickReply};

/// Message shown when no answer is found.
pub const DEFAULT_NOT_FOUND_MESSAGE: &str =
    "Sorry, I couldn't find information on that topic. Try one of the suggested topics.";

/// Delay before a locally matched answer is shown.
pub const DEFAULT_TYPING_DELAY_MS: u64 = 500;

/// Configuration for a single widget instance.
///
/// Field aliases accept the camelCase keys used by inline page
/// configuration (`typingDelay`, `notFoundMessage`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub knowledge: KnowledgeBase,

    #[serde(default)]
    pub keywords: KeywordIndex,

    /// Artificial delay before a local answer is shown, in milliseconds.
    #[serde(default = "default_typing_delay_ms", alias = "typingDelay")]
    pub typing_delay_ms: u64,

    /// First bot message, added when the widget is constructed.
    #[serde(default, alias = "welcomeMessage")]
    pub welcome_message: Option<String>,

    #[serde(default = "default_not_found_message", alias = "notFoundMessage")]
    pub not_found_message: String,

    #[serde(default, alias = "quickReplies")]
    pub quick_replies: Vec<QuickReply>,
}

fn default_typing_delay_ms() -> u64 {
    DEFAULT_TYPING_DELAY_MS
}

fn default_not_found_message() -> String {
    DEFAULT_NOT_FOUND_MESSAGE.to_string()
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            knowledge: KnowledgeBase::new(),
            keywords: KeywordIndex::new(),
            typing_delay_ms: default_typing_delay_ms(),
            welcome_message: None,
            not_found_message: default_not_found_message(),
            quick_replies: Vec::new(),
        }
    }
}

impl WidgetConfig {
    /// Build a config from a knowledge pack, keeping default timings.
    pub fn from_pack(pack: KnowledgePack) -> Self {
        Self {
            knowledge: pack.knowledge,
            keywords: pack.keywords,
            welcome_message: pack.welcome_message,
            quick_replies: pack.quick_replies,
            ..Self::default()
        }
    }
}

/// Top-level CLI configuration, loaded from `config.toml`.
///
/// All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Knowledge pack used when `--knowledge` is not given.
    #[serde(default)]
    pub default_knowledge: Option<PathBuf>,

    #[serde(default = "default_typing_delay_ms")]
    pub typing_delay_ms: u64,

    #[serde(default = "default_not_found_message")]
    pub not_found_message: String,

    /// Overrides the pack's welcome message when set.
    #[serde(default)]
    pub welcome_message: Option<String>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            default_knowledge: None,
            typing_delay_ms: default_typing_delay_ms(),
            not_found_message: default_not_found_message(),
            welcome_message: None,
        }
    }
}

impl GlobalConfig {
    /// Combine these settings with a knowledge pack into a widget config.
    pub fn widget_config(&self, pack: KnowledgePack) -> WidgetConfig {
        let mut config = WidgetConfig::from_pack(pack);
        config.typing_delay_ms = self.typing_delay_ms;
        config.not_found_message = self.not_found_message.clone();
        if self.welcome_message.is_some() {
            config.welcome_message = self.welcome_message.clone();
        }
        config
    }
}
