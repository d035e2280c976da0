//! Conversation controller for an embeddable FAQ widget.
//!
//! A `Widget` owns the ordered message list, the open/typing flags, and the
//! knowledge mappings. Each call to [`Widget::send`] is one turn: the user
//! message is appended, exactly one resolution path runs (the external
//! resolver if configured, otherwise the typing delay followed by local
//! matching), and the bot reply is appended. Progress is published on an
//! [`EventBus`].
//!
//! `send` takes `&mut self`, so turns never overlap and the mappings cannot
//! be replaced while a match is in flight.

pub mod builder;

pub use builder::WidgetBuilder;

use std::time::Duration;

use helpbot_types::chat::Message;
use helpbot_types::config::WidgetConfig;
use helpbot_types::error::WidgetError;
use helpbot_types::event::WidgetEvent;
use helpbot_types::knowledge::{KeywordIndex, KnowledgeBase, QuickReply};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::event::EventBus;
use crate::matcher::Matcher;
use crate::resolver::BoxAnswerResolver;

/// Result of a completed turn.
#[derive(Debug, Clone, PartialEq)]
pub enum TurnOutcome {
    /// An answer was found and appended.
    Answered { reply: Message },
    /// Nothing matched (or the resolver failed); the not-found message was
    /// appended.
    NotFound { reply: Message },
}

impl TurnOutcome {
    /// The bot message appended for this turn.
    pub fn reply(&self) -> &Message {
        match self {
            TurnOutcome::Answered { reply } | TurnOutcome::NotFound { reply } => reply,
        }
    }

    pub fn is_answered(&self) -> bool {
        matches!(self, TurnOutcome::Answered { .. })
    }
}

/// Typing indicator held for the duration of one resolution.
///
/// Dropping it clears the flag and publishes `TypingStopped`, so a turn
/// cancelled mid-resolution (e.g. by `tokio::time::timeout`) does not leave
/// the widget stuck in the typing state.
struct TypingIndicator<'a> {
    is_typing: &'a mut bool,
    events: &'a EventBus,
}

impl<'a> TypingIndicator<'a> {
    fn show(is_typing: &'a mut bool, events: &'a EventBus) -> Self {
        if !*is_typing {
            *is_typing = true;
            events.publish(WidgetEvent::TypingStarted);
        }
        Self { is_typing, events }
    }
}

impl Drop for TypingIndicator<'_> {
    fn drop(&mut self) {
        if *self.is_typing {
            *self.is_typing = false;
            self.events.publish(WidgetEvent::TypingStopped);
        }
    }
}

/// A single widget instance. Construct one per embedded chat panel.
#[derive(Debug)]
pub struct Widget {
    config: WidgetConfig,
    resolver: Option<BoxAnswerResolver>,
    events: EventBus,
    messages: Vec<Message>,
    is_open: bool,
    is_typing: bool,
}

impl Widget {
    /// Create a widget that answers from its own knowledge base.
    pub fn new(config: WidgetConfig) -> Self {
        WidgetBuilder::new(config).build()
    }

    pub fn builder(config: WidgetConfig) -> WidgetBuilder {
        WidgetBuilder::new(config)
    }

    fn from_parts(config: WidgetConfig, resolver: Option<BoxAnswerResolver>, events: EventBus) -> Self {
        let mut widget = Self {
            config,
            resolver,
            events,
            messages: Vec::new(),
            is_open: false,
            is_typing: false,
        };
        if let Some(welcome) = widget.config.welcome_message.clone() {
            widget.add_message(welcome, false);
        }
        widget
    }

    // --- Accessors ---

    pub fn config(&self) -> &WidgetConfig {
        &self.config
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn quick_replies(&self) -> &[QuickReply] {
        &self.config.quick_replies
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn is_typing(&self) -> bool {
        self.is_typing
    }

    /// Whether turns are answered by an external resolver.
    pub fn has_resolver(&self) -> bool {
        self.resolver.is_some()
    }

    /// Subscribe to this widget's events.
    pub fn subscribe(&self) -> broadcast::Receiver<WidgetEvent> {
        self.events.subscribe()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.events
    }

    // --- Visibility ---

    pub fn open(&mut self) {
        self.is_open = true;
        self.events.publish(WidgetEvent::Opened);
    }

    /// Close the panel. Publishes `Closed` even if it was already closed.
    pub fn close(&mut self) {
        self.is_open = false;
        self.events.publish(WidgetEvent::Closed);
    }

    pub fn toggle(&mut self) {
        if self.is_open {
            self.close();
        } else {
            self.open();
        }
    }

    // --- Messages ---

    /// Append a message to the conversation.
    pub fn add_message(&mut self, content: impl Into<String>, is_user: bool) -> &Message {
        let message = Message::new(content, is_user);
        self.events.publish(WidgetEvent::MessageAdded {
            message: message.clone(),
        });
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }

    pub fn clear_messages(&mut self) {
        self.messages.clear();
        self.events.publish(WidgetEvent::MessagesCleared);
    }

    // --- Knowledge ---

    /// Look up `question` in the current mappings without touching the
    /// conversation.
    pub fn find_answer(&self, question: &str) -> Option<String> {
        Matcher::new(&self.config.knowledge, &self.config.keywords).find_answer(question)
    }

    /// Merge entries into the knowledge base; same-keyed entries are replaced.
    pub fn update_knowledge(&mut self, knowledge: KnowledgeBase) {
        debug!(entries = knowledge.len(), "merging knowledge entries");
        self.config.knowledge.merge(knowledge);
    }

    /// Merge aliases into the keyword index; same-keyed aliases are replaced.
    pub fn update_keywords(&mut self, keywords: KeywordIndex) {
        debug!(entries = keywords.len(), "merging keyword aliases");
        self.config.keywords.merge(keywords);
    }

    // --- Turns ---

    /// Run one conversation turn for `question`.
    ///
    /// Returns `None` without side effects when the trimmed question is
    /// empty.
    pub async fn send(&mut self, question: &str) -> Option<TurnOutcome> {
        let question = question.trim();
        if question.is_empty() {
            return None;
        }
        let question = question.to_string();

        self.add_message(question.clone(), true);
        self.events.publish(WidgetEvent::MessageSent {
            question: question.clone(),
        });

        let answer = {
            let _typing = TypingIndicator::show(&mut self.is_typing, &self.events);
            Self::resolve(self.resolver.as_ref(), &self.config, &question).await
        };

        let outcome = match answer.filter(|a| !a.is_empty()) {
            Some(answer) => {
                let reply = self.add_message(answer.clone(), false).clone();
                self.events.publish(WidgetEvent::MessageReceived {
                    message_id: reply.id,
                    answer,
                });
                TurnOutcome::Answered { reply }
            }
            None => {
                let not_found = self.config.not_found_message.clone();
                let reply = self.add_message(not_found, false).clone();
                self.events.publish(WidgetEvent::NotFound {
                    message_id: reply.id,
                    question,
                });
                TurnOutcome::NotFound { reply }
            }
        };

        info!(
            answered = outcome.is_answered(),
            messages = self.messages.len(),
            "turn completed"
        );
        Some(outcome)
    }

    /// Send the question behind quick reply `index`.
    pub async fn send_quick_reply(&mut self, index: usize) -> Result<Option<TurnOutcome>, WidgetError> {
        let text = self
            .config
            .quick_replies
            .get(index)
            .map(|reply| reply.text().to_string())
            .ok_or_else(|| WidgetError::QuickReplyOutOfRange {
                index,
                len: self.config.quick_replies.len(),
            })?;
        Ok(self.send(&text).await)
    }

    /// Resolve an answer through exactly one path.
    async fn resolve(
        resolver: Option<&BoxAnswerResolver>,
        config: &WidgetConfig,
        question: &str,
    ) -> Option<String> {
        match resolver {
            Some(resolver) => match resolver.resolve(question).await {
                Ok(answer) => answer,
                Err(err) => {
                    warn!(
                        resolver = resolver.name(),
                        error = %err,
                        "answer resolver failed, treating as not found"
                    );
                    None
                }
            },
            None => {
                if config.typing_delay_ms > 0 {
                    tokio::time::sleep(Duration::from_millis(config.typing_delay_ms)).await;
                }
                Matcher::new(&config.knowledge, &config.keywords).find_answer(question)
            }
        }
    }

    /// Close the widget and release it.
    pub fn destroy(mut self) {
        self.close();
        self.events.publish(WidgetEvent::Destroyed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use helpbot_types::config::DEFAULT_NOT_FOUND_MESSAGE;
    use helpbot_types::error::ResolverError;
    use helpbot_types::knowledge::KnowledgeEntry;

    use crate::resolver::FnResolver;

    fn test_config() -> WidgetConfig {
        WidgetConfig {
            knowledge: [
                ("hello", KnowledgeEntry::from("Hi!")),
                (
                    "company",
                    KnowledgeEntry::titled("Our Company", "We build things."),
                ),
            ]
            .into_iter()
            .collect(),
            keywords: [("hey", "hello".to_string())].into_iter().collect(),
            typing_delay_ms: 0,
            ..WidgetConfig::default()
        }
    }

    fn drain(rx: &mut broadcast::Receiver<WidgetEvent>) -> Vec<&'static str> {
        let mut names = Vec::new();
        while let Ok(event) = rx.try_recv() {
            names.push(event.name());
        }
        names
    }

    #[test]
    fn test_new_widget_is_closed_and_empty() {
        let widget = Widget::new(test_config());
        assert!(!widget.is_open());
        assert!(!widget.is_typing());
        assert!(widget.messages().is_empty());
        assert!(!widget.has_resolver());
    }

    #[test]
    fn test_welcome_message_is_first_bot_message() {
        let config = WidgetConfig {
            welcome_message: Some("Welcome! Ask me anything.".to_string()),
            ..test_config()
        };
        let widget = Widget::new(config);
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(widget.messages()[0].content, "Welcome! Ask me anything.");
        assert!(!widget.messages()[0].is_user);
    }

    #[test]
    fn test_welcome_message_visible_on_shared_bus() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();
        let config = WidgetConfig {
            welcome_message: Some("Hello".to_string()),
            ..test_config()
        };
        let _widget = Widget::builder(config).event_bus(bus).build();
        assert_eq!(drain(&mut rx), vec!["message_added"]);
    }

    #[test]
    fn test_open_close_toggle() {
        let mut widget = Widget::new(test_config());
        let mut rx = widget.subscribe();

        widget.toggle();
        assert!(widget.is_open());
        widget.toggle();
        assert!(!widget.is_open());
        widget.open();
        widget.close();
        widget.close();

        assert_eq!(
            drain(&mut rx),
            vec!["opened", "closed", "opened", "closed", "closed"]
        );
    }

    #[tokio::test]
    async fn test_send_answers_from_knowledge() {
        let mut widget = Widget::new(test_config());
        let mut rx = widget.subscribe();

        let outcome = widget.send("  Hey there!  ").await.unwrap();

        assert!(outcome.is_answered());
        assert_eq!(outcome.reply().content, "Hi!");
        let messages = widget.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "Hey there!");
        assert!(messages[0].is_user);
        assert_eq!(messages[1].content, "Hi!");
        assert!(!widget.is_typing());

        assert_eq!(
            drain(&mut rx),
            vec![
                "message_added",
                "message_sent",
                "typing_started",
                "typing_stopped",
                "message_added",
                "message_received",
            ]
        );
    }

    #[tokio::test]
    async fn test_send_titled_answer() {
        let mut widget = Widget::new(test_config());
        let outcome = widget.send("Tell me about your Company").await.unwrap();
        assert_eq!(
            outcome.reply().content,
            "<strong>Our Company</strong><br>We build things."
        );
    }

    #[tokio::test]
    async fn test_send_not_found() {
        let mut widget = Widget::new(test_config());
        let mut rx = widget.subscribe();

        let outcome = widget.send("What is the meaning of life?").await.unwrap();

        assert!(!outcome.is_answered());
        assert_eq!(outcome.reply().content, DEFAULT_NOT_FOUND_MESSAGE);
        let events = drain(&mut rx);
        assert_eq!(events.last(), Some(&"not_found"));
        assert!(!events.contains(&"message_received"));
    }

    #[tokio::test]
    async fn test_not_found_event_carries_question() {
        let mut widget = Widget::new(test_config());
        let mut rx = widget.subscribe();
        widget.send("unknown topic").await.unwrap();

        let mut found = None;
        while let Ok(event) = rx.try_recv() {
            if let WidgetEvent::NotFound { question, .. } = event {
                found = Some(question);
            }
        }
        assert_eq!(found.as_deref(), Some("unknown topic"));
    }

    #[tokio::test]
    async fn test_empty_direct_answer_is_not_found() {
        let config = WidgetConfig {
            knowledge: [("hello", KnowledgeEntry::from(""))].into_iter().collect(),
            typing_delay_ms: 0,
            ..WidgetConfig::default()
        };
        let mut widget = Widget::new(config);
        let outcome = widget.send("hello").await.unwrap();
        assert!(!outcome.is_answered());
    }

    #[tokio::test]
    async fn test_empty_send_is_noop() {
        let mut widget = Widget::new(test_config());
        let mut rx = widget.subscribe();

        assert!(widget.send("").await.is_none());
        assert!(widget.send("   \n").await.is_none());
        assert!(widget.messages().is_empty());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_custom_not_found_message() {
        let config = WidgetConfig {
            not_found_message: "Désolé, je ne sais pas.".to_string(),
            ..test_config()
        };
        let mut widget = Widget::new(config);
        let outcome = widget.send("quantum physics").await.unwrap();
        assert_eq!(outcome.reply().content, "Désolé, je ne sais pas.");
    }

    #[tokio::test(start_paused = true)]
    async fn test_local_path_waits_typing_delay() {
        let config = WidgetConfig {
            typing_delay_ms: 500,
            ..test_config()
        };
        let mut widget = Widget::new(config);

        let start = tokio::time::Instant::now();
        widget.send("hello").await.unwrap();
        assert!(start.elapsed() >= Duration::from_millis(500));
    }

    #[tokio::test(start_paused = true)]
    async fn test_resolver_path_skips_typing_delay() {
        let config = WidgetConfig {
            typing_delay_ms: 10_000,
            ..test_config()
        };
        let resolver = FnResolver::new("api", |_question: String| async move {
            Ok::<_, ResolverError>(Some("From the API".to_string()))
        });
        let mut widget = Widget::builder(config).resolver(resolver).build();

        let start = tokio::time::Instant::now();
        let outcome = widget.send("hello").await.unwrap();
        assert!(start.elapsed() < Duration::from_millis(10_000));
        assert_eq!(outcome.reply().content, "From the API");
    }

    #[tokio::test]
    async fn test_resolver_replaces_local_lookup() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let resolver = FnResolver::new("counting", move |question: String| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok::<_, ResolverError>(if question == "ping" {
                    Some("pong".to_string())
                } else {
                    None
                })
            }
        });
        let mut widget = Widget::builder(test_config()).resolver(resolver).build();
        assert!(widget.has_resolver());

        assert_eq!(widget.send("ping").await.unwrap().reply().content, "pong");
        // "hello" is in the knowledge base, but the resolver owns the turn.
        let outcome = widget.send("hello").await.unwrap();
        assert!(!outcome.is_answered());
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_resolver_error_is_reported_as_not_found() {
        let resolver = FnResolver::new("flaky", |_question: String| async move {
            Err::<Option<String>, _>(ResolverError::Backend("connection reset".to_string()))
        });
        let mut widget = Widget::builder(test_config()).resolver(resolver).build();
        let mut rx = widget.subscribe();

        let outcome = widget.send("hello").await.unwrap();

        assert!(!outcome.is_answered());
        assert_eq!(outcome.reply().content, DEFAULT_NOT_FOUND_MESSAGE);
        assert!(!widget.is_typing());
        assert_eq!(drain(&mut rx).last(), Some(&"not_found"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_turn_clears_typing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let resolver = FnResolver::new("slow-then-fast", move |_question: String| {
            let first = counter.fetch_add(1, Ordering::SeqCst) == 0;
            async move {
                if first {
                    std::future::pending::<()>().await;
                }
                Ok::<_, ResolverError>(Some("pong".to_string()))
            }
        });
        let mut widget = Widget::builder(test_config()).resolver(resolver).build();
        let mut rx = widget.subscribe();

        let timed_out = tokio::time::timeout(Duration::from_millis(10), widget.send("ping")).await;

        assert!(timed_out.is_err());
        assert!(!widget.is_typing());
        assert_eq!(widget.messages().len(), 1);
        assert_eq!(
            drain(&mut rx),
            vec!["message_added", "message_sent", "typing_started", "typing_stopped"]
        );

        let outcome = widget.send("ping again").await.unwrap();
        assert_eq!(outcome.reply().content, "pong");
        assert!(!widget.is_typing());
        assert_eq!(
            drain(&mut rx),
            vec![
                "message_added",
                "message_sent",
                "typing_started",
                "typing_stopped",
                "message_added",
                "message_received",
            ]
        );
    }

    #[tokio::test]
    async fn test_resolver_empty_answer_is_not_found() {
        let resolver = FnResolver::new("blank", |_question: String| async move {
            Ok::<_, ResolverError>(Some(String::new()))
        });
        let mut widget = Widget::builder(test_config()).resolver(resolver).build();
        assert!(!widget.send("hello").await.unwrap().is_answered());
    }

    #[tokio::test]
    async fn test_update_knowledge_between_turns() {
        let mut widget = Widget::new(test_config());
        assert!(!widget.send("pricing?").await.unwrap().is_answered());

        widget.update_knowledge(
            [
                ("pricing", KnowledgeEntry::from("It's free.")),
                ("hello", KnowledgeEntry::from("Hello again!")),
            ]
            .into_iter()
            .collect(),
        );

        assert_eq!(widget.send("pricing?").await.unwrap().reply().content, "It's free.");
        assert_eq!(widget.send("hello").await.unwrap().reply().content, "Hello again!");
        let topics: Vec<&str> = widget.config().knowledge.keys().collect();
        assert_eq!(topics, vec!["hello", "company", "pricing"]);
    }

    #[tokio::test]
    async fn test_update_keywords_between_turns() {
        let mut widget = Widget::new(test_config());
        assert!(!widget.send("who are you").await.unwrap().is_answered());

        widget.update_keywords([("who are you", "company".to_string())].into_iter().collect());

        let outcome = widget.send("who are you").await.unwrap();
        assert!(outcome.reply().content.contains("Our Company"));
    }

    #[tokio::test]
    async fn test_send_quick_reply() {
        let config = WidgetConfig {
            quick_replies: vec![
                QuickReply::new("Say hi", "hello"),
                QuickReply::new("About us", ""),
            ],
            ..test_config()
        };
        let mut widget = Widget::new(config);

        let outcome = widget.send_quick_reply(0).await.unwrap().unwrap();
        assert_eq!(outcome.reply().content, "Hi!");
        assert_eq!(widget.messages()[0].content, "hello");

        // Falls back to the label when no question is set.
        widget.send_quick_reply(1).await.unwrap().unwrap();
        assert_eq!(widget.messages()[2].content, "About us");

        let err = widget.send_quick_reply(5).await.unwrap_err();
        assert!(matches!(err, WidgetError::QuickReplyOutOfRange { index: 5, len: 2 }));
    }

    #[tokio::test]
    async fn test_clear_messages() {
        let mut widget = Widget::new(test_config());
        widget.send("hello").await.unwrap();
        let mut rx = widget.subscribe();

        widget.clear_messages();

        assert!(widget.messages().is_empty());
        assert_eq!(drain(&mut rx), vec!["messages_cleared"]);
    }

    #[test]
    fn test_add_message_ids_unique_and_ordered() {
        let mut widget = Widget::new(test_config());
        let first = widget.add_message("one", true).id;
        let second = widget.add_message("two", false).id;
        assert_ne!(first, second);
        let contents: Vec<&str> = widget.messages().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["one", "two"]);
    }

    #[test]
    fn test_find_answer_does_not_touch_conversation() {
        let widget = Widget::new(test_config());
        assert_eq!(widget.find_answer("hey").as_deref(), Some("Hi!"));
        assert!(widget.messages().is_empty());
    }

    #[test]
    fn test_destroy_closes_and_publishes() {
        let mut widget = Widget::new(test_config());
        widget.open();
        let mut rx = widget.subscribe();

        widget.destroy();

        assert_eq!(drain(&mut rx), vec!["closed", "destroyed"]);
    }
}
