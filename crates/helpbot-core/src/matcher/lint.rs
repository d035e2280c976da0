//! Static checks over a knowledge base and keyword index.
//!
//! Matching is first-substring-wins, so some configurations silently never
//! produce the answer their author intended. `lint` reports those cases
//! without changing matching behavior.

use helpbot_types::knowledge::{KeywordIndex, KnowledgeBase};
use serde::Serialize;

use super::normalize::{fold, is_folded, normalize};

/// A problem found in a knowledge configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "issue", rename_all = "snake_case")]
pub enum LintIssue {
    /// The alias maps to a topic that does not exist.
    DanglingAlias { alias: String, topic: String },
    /// The alias has uppercase letters or accents, so no normalized
    /// utterance can contain it.
    UnreachableAlias { alias: String, normalized: String },
    /// An earlier topic's key is contained in this one's, so any utterance
    /// matching `topic` matches `by` first.
    ShadowedTopic { topic: String, by: String },
    /// A topic key that normalizes to the empty string matches everything.
    EmptyTopicKey { topic: String },
}

impl LintIssue {
    /// Human-readable one-line description.
    pub fn describe(&self) -> String {
        match self {
            LintIssue::DanglingAlias { alias, topic } => {
                format!("alias '{alias}' points at missing topic '{topic}'")
            }
            LintIssue::UnreachableAlias { alias, normalized } => {
                format!("alias '{alias}' can never match (write it as '{normalized}')")
            }
            LintIssue::ShadowedTopic { topic, by } => {
                format!("topic '{topic}' is shadowed by earlier topic '{by}'")
            }
            LintIssue::EmptyTopicKey { topic } => {
                format!("topic '{topic}' is empty and matches every question")
            }
        }
    }
}

/// Check `knowledge` and `keywords` for dead or shadowed entries.
///
/// Issues are reported in knowledge order, then keyword order.
pub fn lint(knowledge: &KnowledgeBase, keywords: &KeywordIndex) -> Vec<LintIssue> {
    let mut issues = Vec::new();

    let normalized: Vec<(&str, String)> = knowledge
        .keys()
        .map(|key| (key, normalize(key)))
        .collect();

    for (idx, (topic, norm)) in normalized.iter().enumerate() {
        if norm.is_empty() {
            issues.push(LintIssue::EmptyTopicKey {
                topic: topic.to_string(),
            });
            continue;
        }
        if let Some((by, _)) = normalized[..idx]
            .iter()
            .find(|(_, earlier)| !earlier.is_empty() && norm.contains(earlier.as_str()))
        {
            issues.push(LintIssue::ShadowedTopic {
                topic: topic.to_string(),
                by: by.to_string(),
            });
        }
    }

    for (alias, topic) in keywords.iter() {
        if !knowledge.contains_key(topic) {
            issues.push(LintIssue::DanglingAlias {
                alias: alias.to_string(),
                topic: topic.clone(),
            });
        }
        if !is_folded(alias) {
            issues.push(LintIssue::UnreachableAlias {
                alias: alias.to_string(),
                normalized: fold(alias),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use helpbot_types::knowledge::KnowledgeEntry;

    fn kb(keys: &[&str]) -> KnowledgeBase {
        keys.iter()
            .map(|k| (*k, KnowledgeEntry::from("answer")))
            .collect()
    }

    #[test]
    fn test_clean_configuration() {
        let knowledge = kb(&["hello", "pricing"]);
        let keywords: KeywordIndex = [("hey", "hello".to_string())].into_iter().collect();
        assert!(lint(&knowledge, &keywords).is_empty());
    }

    #[test]
    fn test_dangling_alias() {
        let knowledge = kb(&["hello"]);
        let keywords: KeywordIndex = [("bye", "farewell".to_string())].into_iter().collect();
        assert_eq!(
            lint(&knowledge, &keywords),
            vec![LintIssue::DanglingAlias {
                alias: "bye".to_string(),
                topic: "farewell".to_string(),
            }]
        );
    }

    #[test]
    fn test_unreachable_alias() {
        let knowledge = kb(&["hello"]);
        let keywords: KeywordIndex = [("Olá", "hello".to_string())].into_iter().collect();
        let issues = lint(&knowledge, &keywords);
        assert_eq!(
            issues,
            vec![LintIssue::UnreachableAlias {
                alias: "Olá".to_string(),
                normalized: "ola".to_string(),
            }]
        );
        assert!(issues[0].describe().contains("'ola'"));
    }

    #[test]
    fn test_padded_alias_is_reachable() {
        let knowledge = kb(&["hello"]);
        let keywords: KeywordIndex = [(" hi ", "hello".to_string())].into_iter().collect();
        assert!(lint(&knowledge, &keywords).is_empty());
    }

    #[test]
    fn test_shadowed_topic() {
        let knowledge = kb(&["pay", "Payroll", "pricing"]);
        let issues = lint(&knowledge, &KeywordIndex::new());
        assert_eq!(
            issues,
            vec![LintIssue::ShadowedTopic {
                topic: "Payroll".to_string(),
                by: "pay".to_string(),
            }]
        );
    }

    #[test]
    fn test_later_substring_is_not_shadowed() {
        // "payroll" first, "pay" second: "pay" still wins for "pay me".
        let knowledge = kb(&["payroll", "pay"]);
        assert!(lint(&knowledge, &KeywordIndex::new()).is_empty());
    }

    #[test]
    fn test_empty_topic_key() {
        let knowledge = kb(&[" ", "hello"]);
        let issues = lint(&knowledge, &KeywordIndex::new());
        assert_eq!(
            issues,
            vec![LintIssue::EmptyTopicKey {
                topic: " ".to_string()
            }]
        );
    }
}
