//! One-shot question answering.

use std::path::Path;

use anyhow::Result;
use console::style;

use helpbot_core::matcher::{Match, MatchKind, Matcher};
use helpbot_types::config::WidgetConfig;

use super::OutputMode;
use super::render::{indent_continuation, to_terminal};
use crate::state::AppState;

/// Look up `question` against the configured mappings.
///
/// An empty answer counts as no answer, as it does in a chat turn.
fn lookup(config: &WidgetConfig, question: &str) -> Option<Match> {
    Matcher::new(&config.knowledge, &config.keywords)
        .find_match(question)
        .filter(|m| !m.answer.is_empty())
}

/// The answer text alone, as printed in quiet mode.
fn bare_answer(found: Option<&Match>, not_found_message: &str) -> String {
    to_terminal(found.map_or(not_found_message, |m| m.answer.as_str()))
}

/// Answer a single question and print the result.
pub async fn ask(
    state: &AppState,
    knowledge: Option<&Path>,
    question: &str,
    output: OutputMode,
) -> Result<()> {
    let question = question.trim();
    if question.is_empty() {
        anyhow::bail!("Question is empty");
    }

    let config = state.widget_config(knowledge).await?;
    let found = lookup(&config, question);
    tracing::info!(answered = found.is_some(), "question answered");

    if output == OutputMode::Quiet {
        println!("{}", bare_answer(found.as_ref(), &config.not_found_message));
        return Ok(());
    }

    if output == OutputMode::Json {
        let answer = found
            .as_ref()
            .map(|m| m.answer.clone())
            .unwrap_or_else(|| config.not_found_message.clone());
        let output = serde_json::json!({
            "question": question,
            "answered": found.is_some(),
            "answer": answer,
            "match": found,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    match found {
        Some(m) => {
            println!("  {}", indent_continuation(&to_terminal(&m.answer), 2));
            let via = match &m.kind {
                MatchKind::Direct => format!("topic '{}'", m.topic),
                MatchKind::Alias { alias } => format!("topic '{}' via alias '{alias}'", m.topic),
            };
            println!();
            println!("  {}", style(via).dim());
        }
        None => {
            println!("  {}", style(&config.not_found_message).yellow());
        }
    }
    println!();

    Ok(())
}
