//! helpbot CLI entry point.
//!
//! Binary name: `helpbot`
//!
//! Parses CLI arguments, loads the global config, then dispatches to the
//! command handler for the selected knowledge pack.

mod cli;
mod state;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.validate()?;

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,helpbot_core=debug,helpbot_infra=debug",
        _ => "trace",
    };

    helpbot_observe::tracing_setup::init_tracing_with_filter(EnvFilter::new(filter), cli.otel)
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "helpbot", &mut std::io::stdout());
        return Ok(());
    }

    let state = AppState::init(cli.config.as_deref()).await;
    let output = cli.output_mode();

    let result = match cli.command {
        Commands::Ask {
            question,
            knowledge,
        } => cli::ask::ask(&state, knowledge.as_deref(), &question.join(" "), output).await,

        Commands::Chat { knowledge } => {
            cli::chat::loop_runner::run_chat_loop(&state, knowledge.as_deref(), output).await
        }

        Commands::Check { knowledge, strict } => {
            cli::check::check(&state, knowledge.as_deref(), strict, output).await
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    };

    helpbot_observe::tracing_setup::shutdown_tracing();
    result
}
