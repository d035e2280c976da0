//! CLI command definitions and dispatch for the `helpbot` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod ask;
pub mod chat;
pub mod check;
pub mod render;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Answer questions from an FAQ knowledge pack.
#[derive(Parser)]
#[command(name = "helpbot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Only log errors, and print bare results without banners or hints.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (default: ~/.helpbot/config.toml).
    #[arg(long, global = true, env = "HELPBOT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Export tracing spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true, hide = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// How commands print their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Banners, hints and colors.
    Styled,
    /// Bare results only.
    Quiet,
    /// One JSON document on stdout.
    Json,
}

impl Cli {
    /// `--json` wins over `--quiet`.
    pub fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else if self.quiet {
            OutputMode::Quiet
        } else {
            OutputMode::Styled
        }
    }

    /// Reject flag combinations that would corrupt stdout.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.otel && self.json {
            anyhow::bail!("--otel dumps spans to stdout and cannot be combined with --json");
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Answer a single question and exit.
    Ask {
        /// The question to answer.
        #[arg(required = true)]
        question: Vec<String>,

        /// Knowledge pack file (.toml or .json).
        #[arg(long, short)]
        knowledge: Option<PathBuf>,
    },

    /// Start an interactive chat session.
    Chat {
        /// Knowledge pack file (.toml or .json).
        #[arg(long, short)]
        knowledge: Option<PathBuf>,
    },

    /// Report dangling, unreachable and shadowed entries in a knowledge pack.
    Check {
        /// Knowledge pack file (.toml or .json).
        #[arg(long, short)]
        knowledge: Option<PathBuf>,

        /// Exit with an error when any issue is found.
        #[arg(long)]
        strict: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_ask_joins_words() {
        let cli = Cli::parse_from(["helpbot", "ask", "what", "is", "payroll", "-k", "faq.toml"]);
        match cli.command {
            Commands::Ask {
                question,
                knowledge,
            } => {
                assert_eq!(question.join(" "), "what is payroll");
                assert_eq!(knowledge, Some(PathBuf::from("faq.toml")));
            }
            _ => panic!("expected ask"),
        }
    }

    #[test]
    fn otel_conflicts_with_json() {
        // Span dumps would be interleaved with the JSON document on stdout.
        let cli = Cli::parse_from(["helpbot", "--otel", "check", "--json"]);
        assert!(cli.validate().unwrap_err().to_string().contains("--json"));

        assert!(Cli::parse_from(["helpbot", "--otel", "check"]).validate().is_ok());
        assert!(Cli::parse_from(["helpbot", "check", "--json"]).validate().is_ok());
    }

    #[test]
    fn output_mode_from_flags() {
        let mode = |args: &[&str]| Cli::parse_from(args).output_mode();
        assert_eq!(mode(&["helpbot", "check"]), OutputMode::Styled);
        assert_eq!(mode(&["helpbot", "check", "--quiet"]), OutputMode::Quiet);
        assert_eq!(mode(&["helpbot", "--quiet", "check", "--json"]), OutputMode::Json);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["helpbot", "check", "--json", "-vv", "--strict"]);
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert!(matches!(cli.command, Commands::Check { strict: true, .. }));
    }
}
