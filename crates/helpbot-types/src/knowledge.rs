//! Knowledge base domain types.
//!
//! A knowledge base maps free-form topic phrases to answers, and a keyword
//! index maps alias phrases to topic phrases. Both are *ordered*: the order
//! entries were defined in decides which topic wins when several match, so
//! they are backed by [`OrderedMap`] rather than a hash map.

use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// The answer payload for one topic.
///
/// Deserialized untagged: a bare string becomes `PlainText`, a table with
/// `title` and/or `content` becomes `Titled` (a missing field is empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KnowledgeEntry {
    /// Displayed verbatim.
    PlainText(String),
    /// Rendered as an emphasized title followed by the content on a new line.
    /// `content` may embed markup and is never escaped.
    Titled {
        #[serde(default)]
        title: String,
        #[serde(default)]
        content: String,
    },
}

impl KnowledgeEntry {
    pub fn titled(title: impl Into<String>, content: impl Into<String>) -> Self {
        KnowledgeEntry::Titled {
            title: title.into(),
            content: content.into(),
        }
    }
}

impl From<&str> for KnowledgeEntry {
    fn from(text: &str) -> Self {
        KnowledgeEntry::PlainText(text.to_string())
    }
}

impl From<String> for KnowledgeEntry {
    fn from(text: String) -> Self {
        KnowledgeEntry::PlainText(text)
    }
}

/// An insertion-ordered string-keyed map.
///
/// Lookups are linear; knowledge bases hold tens of entries, and keeping a
/// single `Vec` makes iteration order explicit.
///
/// Inserting an existing key replaces its value in place (the key keeps its
/// position); new keys are appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
}

/// Topic phrase -> answer.
pub type KnowledgeBase = OrderedMap<KnowledgeEntry>;

/// Alias phrase -> topic phrase (a soft reference into a [`KnowledgeBase`]).
pub type KeywordIndex = OrderedMap<String>;

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace. Returns the previous value when the key existed.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(idx).1)
    }

    /// Merge `other` into `self`: same-keyed entries are overridden in
    /// place, new keys are appended in `other`'s order.
    pub fn merge(&mut self, other: OrderedMap<V>) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

impl<V> IntoIterator for OrderedMap<V> {
    type Item = (String, V);
    type IntoIter = std::vec::IntoIter<(String, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<V: Serialize> Serialize for OrderedMap<V> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.entries.iter().map(|(k, v)| (k, v)))
    }
}

struct OrderedMapVisitor<V> {
    marker: PhantomData<V>,
}

impl<'de, V: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<V> {
    type Value = OrderedMap<V>;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a map of phrases")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = OrderedMap::new();
        // Duplicate keys keep the first position and the last value.
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }
}

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedMap<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(OrderedMapVisitor {
            marker: PhantomData,
        })
    }
}

/// A canned question offered as a one-click button.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickReply {
    /// Button label shown to the user.
    pub label: String,
    /// Text sent when the button is pressed. Defaults to the label.
    #[serde(default)]
    pub question: String,
}

impl QuickReply {
    pub fn new(label: impl Into<String>, question: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            question: question.into(),
        }
    }

    /// The text to send: `question`, or the label when no question was given.
    pub fn text(&self) -> &str {
        if self.question.trim().is_empty() {
            self.label.trim()
        } else {
            &self.question
        }
    }
}

/// A knowledge pack file: everything a widget needs to answer questions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgePack {
    #[serde(default)]
    pub knowledge: KnowledgeBase,
    #[serde(default)]
    pub keywords: KeywordIndex,
    #[serde(default)]
    pub quick_replies: Vec<QuickReply>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
}
