//! Event types for the helpbot widget event bus.
//!
//! `WidgetEvent` is the unified event type broadcast by a widget as the
//! conversation progresses. Host applications subscribe to it instead of
//! registering lifecycle callbacks.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chat::Message;

/// Events emitted by a widget.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WidgetEvent {
    /// The panel was opened.
    Opened,

    /// The panel was closed.
    Closed,

    /// A message (user or bot) was appended to the conversation.
    MessageAdded { message: Message },

    /// The user sent a question.
    MessageSent { question: String },

    /// The typing indicator was shown.
    TypingStarted,

    /// The typing indicator was hidden.
    TypingStopped,

    /// A bot answer was delivered.
    MessageReceived { message_id: Uuid, answer: String },

    /// No answer was found; the not-found message was shown instead.
    NotFound { message_id: Uuid, question: String },

    /// All messages were cleared.
    MessagesCleared,

    /// The widget was destroyed.
    Destroyed,
}

impl WidgetEvent {
    /// Event name as it appears in the serialized `type` tag.
    pub fn name(&self) -> &'static str {
        match self {
            WidgetEvent::Opened => "opened",
            WidgetEvent::Closed => "closed",
            WidgetEvent::MessageAdded { .. } => "message_added",
            WidgetEvent::MessageSent { .. } => "message_sent",
            WidgetEvent::TypingStarted => "typing_started",
            WidgetEvent::TypingStopped => "typing_stopped",
            WidgetEvent::MessageReceived { .. } => "message_received",
            WidgetEvent::NotFound { .. } => "not_found",
            WidgetEvent::MessagesCleared => "messages_cleared",
            WidgetEvent::Destroyed => "destroyed",
        }
    }
}
