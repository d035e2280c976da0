//! Knowledge pack lint command.

use std::path::Path;

use anyhow::Result;
use console::style;

use helpbot_core::matcher::{LintIssue, lint};

use super::OutputMode;
use crate::state::AppState;

/// Lint the knowledge pack and print any issues.
///
/// With `strict`, returns an error when issues are found so scripts can fail
/// on them.
pub async fn check(
    state: &AppState,
    knowledge: Option<&Path>,
    strict: bool,
    output: OutputMode,
) -> Result<()> {
    let path = state.knowledge_path(knowledge)?;
    let config = state.widget_config(Some(path.as_path())).await?;
    let issues = lint(&config.knowledge, &config.keywords);

    match output {
        OutputMode::Json => {
            let report = serde_json::json!({
                "path": path.display().to_string(),
                "topics": config.knowledge.len(),
                "aliases": config.keywords.len(),
                "quick_replies": config.quick_replies.len(),
                "issues": issues,
                "healthy": issues.is_empty(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputMode::Quiet => {
            for line in issue_lines(&issues) {
                println!("{line}");
            }
        }
        OutputMode::Styled => {
            print_report(&path, config.knowledge.len(), config.keywords.len(), &issues);
        }
    }

    if strict && !issues.is_empty() {
        anyhow::bail!("{} issue(s) found in {}", issues.len(), path.display());
    }
    Ok(())
}

/// One line per issue and nothing for a clean pack, as printed in quiet mode.
fn issue_lines(issues: &[LintIssue]) -> Vec<String> {
    issues.iter().map(LintIssue::describe).collect()
}

fn print_report(path: &Path, topics: usize, aliases: usize, issues: &[LintIssue]) {
    println!();
    println!(
        "  {} Checking '{}'",
        style("🔍").bold(),
        style(path.display()).cyan()
    );
    println!(
        "  {}",
        style(format!("{topics} topics, {aliases} aliases")).dim()
    );
    println!();

    if issues.is_empty() {
        println!("  {} No issues found", style("✓").green());
    } else {
        for issue in issues {
            println!("  {} {}", style("✗").red(), issue.describe());
        }
    }
    println!();
}
