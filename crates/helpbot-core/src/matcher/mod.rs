//! Knowledge lookup: map a raw utterance to at most one answer.
//!
//! Matching is order-dependent substring containment in two passes:
//!
//! 1. **Direct** -- each topic key (normalized) is tested against the
//!    normalized utterance in knowledge-base order.
//! 2. **Alias** -- only if no topic matched; each alias (used as written,
//!    not normalized) is tested in keyword-index order and resolved to its
//!    topic.
//!
//! The first hit wins. There is no scoring.

pub mod lint;
pub mod normalize;
pub mod render;

use helpbot_types::knowledge::{KeywordIndex, KnowledgeBase};
use serde::Serialize;
use tracing::debug;

pub use lint::{LintIssue, lint};
pub use normalize::normalize;
pub use render::render_entry;

/// How a match was found.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// The utterance contained the topic key.
    Direct,
    /// The utterance contained an alias mapped to the topic.
    Alias { alias: String },
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Match {
    pub topic: String,
    #[serde(flatten)]
    pub kind: MatchKind,
    /// Rendered answer text.
    pub answer: String,
}

/// Borrowed view over a knowledge base and keyword index.
#[derive(Debug, Clone, Copy)]
pub struct Matcher<'a> {
    knowledge: &'a KnowledgeBase,
    keywords: &'a KeywordIndex,
}

impl<'a> Matcher<'a> {
    pub fn new(knowledge: &'a KnowledgeBase, keywords: &'a KeywordIndex) -> Self {
        Self {
            knowledge,
            keywords,
        }
    }

    /// Rendered answer for `question`, or `None` when nothing matches.
    pub fn find_answer(&self, question: &str) -> Option<String> {
        self.find_match(question).map(|m| m.answer)
    }

    /// Like [`find_answer`](Self::find_answer), also reporting which topic
    /// matched and how.
    pub fn find_match(&self, question: &str) -> Option<Match> {
        let normalized = normalize(question);

        for (topic, entry) in self.knowledge.iter() {
            if normalized.contains(normalize(topic).as_str()) {
                debug!(topic, "direct topic match");
                return Some(Match {
                    topic: topic.to_string(),
                    kind: MatchKind::Direct,
                    answer: render_entry(entry),
                });
            }
        }

        for (alias, topic) in self.keywords.iter() {
            if !normalized.contains(alias) {
                continue;
            }
            let Some(entry) = self.knowledge.get(topic) else {
                debug!(alias, topic = topic.as_str(), "alias points at missing topic");
                continue;
            };
            let answer = render_entry(entry);
            if answer.is_empty() {
                continue;
            }
            debug!(alias, topic = topic.as_str(), "alias match");
            return Some(Match {
                topic: topic.clone(),
                kind: MatchKind::Alias {
                    alias: alias.to_string(),
                },
                answer,
            });
        }

        None
    }
}

/// One-shot lookup without constructing a [`Matcher`].
pub fn find_answer(
    question: &str,
    knowledge: &KnowledgeBase,
    keywords: &KeywordIndex,
) -> Option<String> {
    Matcher::new(knowledge, keywords).find_answer(question)
}
