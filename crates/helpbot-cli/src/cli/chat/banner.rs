//! Welcome banner display for chat sessions.

use console::style;

use helpbot_types::knowledge::QuickReply;

/// Print the welcome banner at the start of a chat session.
///
/// Lists the pack's quick replies so they can be sent with `/N`.
pub fn print_welcome_banner(pack_name: &str, topics: usize, quick_replies: &[QuickReply]) {
    println!();
    println!("  {} {}", style("💬").bold(), style("helpbot").cyan().bold());
    println!(
        "  {}",
        style(format!("{pack_name} ({topics} topics)")).dim()
    );
    println!();

    if !quick_replies.is_empty() {
        println!("  {}", style("Suggested topics:").bold());
        print_quick_replies(quick_replies);
        println!();
    }

    println!(
        "  {}",
        style("Type /help for commands, Ctrl+D to exit").dim()
    );
    println!("  {}", style("---").dim());
    println!();
}

/// Print quick replies numbered from 1.
pub fn print_quick_replies(quick_replies: &[QuickReply]) {
    for (i, reply) in quick_replies.iter().enumerate() {
        println!(
            "    {} {}",
            style(format!("/{}", i + 1)).cyan(),
            reply.label
        );
    }
}
