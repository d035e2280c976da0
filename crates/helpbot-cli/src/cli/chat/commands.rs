//! Slash command parsing for the chat loop.
//!
//! Commands start with `/`. A bare number (`/2`) sends the matching quick
//! reply.

use console::style;

/// Available slash commands in the chat loop.
#[derive(Debug, PartialEq)]
pub enum ChatCommand {
    /// Show available commands.
    Help,
    /// Clear the conversation and the screen.
    Clear,
    /// Exit the chat session.
    Exit,
    /// Show the conversation so far.
    History,
    /// List the quick replies.
    Topics,
    /// Send quick reply N (1-based, as displayed).
    QuickReply(usize),
    /// Unknown command.
    Unknown(String),
}

/// Parse user input as a slash command.
///
/// Returns `None` if the input doesn't start with `/`.
pub fn parse(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    let rest = trimmed.strip_prefix('/')?;

    let cmd = rest.split_whitespace().next().unwrap_or("").to_lowercase();

    if let Ok(n) = cmd.parse::<usize>() {
        return Some(ChatCommand::QuickReply(n));
    }

    match cmd.as_str() {
        "help" | "h" | "?" => Some(ChatCommand::Help),
        "clear" | "cls" => Some(ChatCommand::Clear),
        "exit" | "quit" | "q" => Some(ChatCommand::Exit),
        "history" => Some(ChatCommand::History),
        "topics" => Some(ChatCommand::Topics),
        _ => Some(ChatCommand::Unknown(format!("/{cmd}"))),
    }
}

/// Print the help text listing all available commands.
pub fn print_help() {
    println!();
    println!("  {}", style("Available commands:").bold());
    println!();
    println!(
        "  {}    {}",
        style("/help").cyan(),
        "Show this help message"
    );
    println!(
        "  {}   {}",
        style("/clear").cyan(),
        "Clear the conversation and the screen"
    );
    println!(
        "  {} {}",
        style("/history").cyan(),
        "Show the conversation so far"
    );
    println!(
        "  {}  {}",
        style("/topics").cyan(),
        "List suggested topics"
    );
    println!(
        "  {}       {}",
        style("/N").cyan(),
        "Ask suggested topic N"
    );
    println!(
        "  {}    {}",
        style("/exit").cyan(),
        "End the chat session"
    );
    println!();
    println!(
        "  {}",
        style("Ctrl+D to exit").dim()
    );
    println!();
}
