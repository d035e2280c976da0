//! Main chat loop orchestration.
//!
//! Loads the knowledge pack into a widget, prints the banner and welcome
//! message, then runs the input loop: slash commands are handled locally and
//! everything else is sent to the widget as a turn.

use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use helpbot_core::widget::{TurnOutcome, Widget};
use helpbot_types::event::WidgetEvent;

use super::banner::{print_quick_replies, print_welcome_banner};
use super::commands::{self, ChatCommand};
use super::input::{ChatInput, InputEvent};
use crate::cli::OutputMode;
use crate::cli::render::{indent_continuation, to_terminal};
use crate::state::AppState;

const BOT_LABEL: &str = "Bot >";

/// Run the interactive chat loop for a knowledge pack.
///
/// In quiet mode the banner and hints are skipped; the conversation itself is
/// still printed.
pub async fn run_chat_loop(
    state: &AppState,
    knowledge: Option<&Path>,
    output: OutputMode,
) -> Result<()> {
    let quiet = output == OutputMode::Quiet;
    let path = state.knowledge_path(knowledge)?;
    let mut widget = state.widget(Some(path.as_path())).await?;
    let event_log = spawn_event_log(&widget);

    let pack_name = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    if !quiet {
        print_welcome_banner(
            &pack_name,
            widget.config().knowledge.len(),
            widget.quick_replies(),
        );
    }

    widget.open();
    for message in widget.messages() {
        print_bot(&message.content, true);
    }

    let prompt = format!("  {} ", style("You >").green().bold());
    let (mut chat_input, _writer) =
        ChatInput::new(prompt).map_err(|e| anyhow::anyhow!("Failed to initialize input: {e}"))?;

    loop {
        match chat_input.read_line().await {
            InputEvent::Eof => {
                if !quiet {
                    println!("\n  {}", style("Session ended.").dim());
                }
                break;
            }
            InputEvent::Interrupted => {
                if !quiet {
                    println!("\n  {}", style("Press Ctrl+D to exit, or keep chatting.").dim());
                }
                continue;
            }
            InputEvent::Message(text) => {
                if text.is_empty() {
                    continue;
                }

                let Some(cmd) = commands::parse(&text) else {
                    let spinner = thinking_spinner()?;
                    let outcome = widget.send(&text).await;
                    spinner.finish_and_clear();
                    if let Some(outcome) = outcome {
                        print_outcome(&outcome);
                    }
                    continue;
                };

                match cmd {
                    ChatCommand::Help => commands::print_help(),
                    ChatCommand::Clear => {
                        widget.clear_messages();
                        chat_input.clear();
                    }
                    ChatCommand::Exit => {
                        if !quiet {
                            println!("\n  {}", style("Session ended.").dim());
                        }
                        break;
                    }
                    ChatCommand::History => print_history(&widget),
                    ChatCommand::Topics => {
                        println!();
                        if widget.quick_replies().is_empty() {
                            println!("  {}", style("No suggested topics.").dim());
                        } else {
                            print_quick_replies(widget.quick_replies());
                        }
                        println!();
                    }
                    ChatCommand::QuickReply(n) => {
                        let len = widget.quick_replies().len();
                        let Some(index) = n.checked_sub(1) else {
                            print_bad_quick_reply(n, len);
                            continue;
                        };
                        let spinner = thinking_spinner()?;
                        let result = widget.send_quick_reply(index).await;
                        spinner.finish_and_clear();
                        match result {
                            Ok(Some(outcome)) => {
                                let question = widget
                                    .quick_replies()
                                    .get(index)
                                    .map(|r| r.text().to_string())
                                    .unwrap_or_default();
                                println!("  {} {}", style("You >").green().bold(), question);
                                print_outcome(&outcome);
                            }
                            Ok(None) => {}
                            Err(e) => {
                                debug!(error = %e, "quick reply rejected");
                                print_bad_quick_reply(n, len);
                            }
                        }
                    }
                    ChatCommand::Unknown(cmd_name) => {
                        println!(
                            "\n  {} Unknown command: {}. Type /help for available commands.\n",
                            style("?").yellow().bold(),
                            style(cmd_name).dim()
                        );
                    }
                }
            }
        }
    }

    widget.destroy();
    let _ = event_log.await;
    Ok(())
}

/// Log every widget event until the widget is destroyed.
fn spawn_event_log(widget: &Widget) -> JoinHandle<()> {
    let mut events = widget.subscribe();
    tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(WidgetEvent::NotFound { question, .. }) => {
                    debug!(question = %question, "no answer found");
                }
                Ok(event) => debug!(event = event.name(), "widget event"),
                Err(RecvError::Lagged(skipped)) => {
                    warn!(skipped, "event log lagged behind the widget");
                }
                Err(RecvError::Closed) => break,
            }
        }
    })
}

fn thinking_spinner() -> Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("  {spinner:.cyan} {msg}")?);
    spinner.set_message("typing...");
    spinner.enable_steady_tick(Duration::from_millis(80));
    Ok(spinner)
}

fn print_outcome(outcome: &TurnOutcome) {
    print_bot(&outcome.reply().content, outcome.is_answered());
}

fn print_bot(content: &str, answered: bool) {
    let text = indent_continuation(&to_terminal(content), BOT_LABEL.len() + 3);
    let text = if answered {
        text
    } else {
        style(text).yellow().to_string()
    };
    println!("\n  {} {}\n", style(BOT_LABEL).cyan().bold(), text);
}

fn print_history(widget: &Widget) {
    println!();
    if widget.messages().is_empty() {
        println!("  {}", style("No messages yet.").dim());
    }
    for msg in widget.messages() {
        let label = if msg.is_user {
            format!("{}", style("You").green())
        } else {
            format!("{}", style("Bot").cyan())
        };
        let content = console::strip_ansi_codes(&to_terminal(&msg.content)).replace('\n', " ");
        let preview = if content.chars().count() > 100 {
            let cut: String = content.chars().take(97).collect();
            format!("{cut}...")
        } else {
            content
        };
        println!(
            "  {} {} {}",
            style(msg.created_at.format("%H:%M:%S")).dim(),
            style(label).bold(),
            preview
        );
    }
    println!();
}

fn print_bad_quick_reply(n: usize, len: usize) {
    let hint = if len == 0 {
        "This knowledge pack has no suggested topics.".to_string()
    } else {
        format!("Choose a topic between /1 and /{len}.")
    };
    println!(
        "\n  {} No suggested topic /{n}. {}\n",
        style("?").yellow().bold(),
        hint
    );
}
