//! Conversation message types for helpbot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single message in a widget conversation.
///
/// Messages are append-only and ordered by insertion; `content` may hold
/// markup (bot answers are rendered from knowledge entries unescaped).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// UUIDv7 message ID.
    pub id: Uuid,
    pub content: String,
    /// True for messages typed by the user, false for bot messages.
    pub is_user: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(content: impl Into<String>, is_user: bool) -> Self {
        Self {
            id: Uuid::now_v7(),
            content: content.into(),
            is_user,
            created_at: Utc::now(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(content, true)
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self::new(content, false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_ids_are_unique() {
        let a = Message::user("hello");
        let b = Message::user("hello");
        assert_ne!(a.id, b.id);
        assert!(a.is_user);
        assert!(!Message::bot("hi").is_user);
    }

    #[test]
    fn test_message_serialize() {
        let msg = Message::bot("<strong>Hi</strong>");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"is_user\":false"));
        assert!(json.contains("<strong>Hi</strong>"));
    }
}
