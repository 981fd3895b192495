//! Askbook CLI entry point.
//!
//! Binary name: `askbook`
//!
//! Parses CLI arguments, loads client configuration, then dispatches to
//! the interactive chat loop, one-shot ask, or health check.

mod cli;

use clap::Parser;
use clap_complete::generate;
use tracing_subscriber::EnvFilter;

use askbook_infra::config::{data_dir, load_client_config};
use askbook_infra::http::HttpChatBackend;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up tracing based on verbosity
    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,askbook_core=debug,askbook_infra=debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .with_target(false)
        .init();

    // Shell completions don't need config
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "askbook", &mut std::io::stdout());
        return Ok(());
    }

    let data_dir = data_dir();
    let mut config = load_client_config(&data_dir).await;
    if let Some(url) = &cli.api_url {
        config.api_base_url = url.clone();
    }
    let backend = HttpChatBackend::new(&config.api_base_url);

    match cli.command {
        Commands::Chat { top_k } => {
            cli::chat::run_chat_loop(backend, top_k.or(config.default_top_k)).await?;
        }

        Commands::Ask { question, top_k } => {
            cli::ask::ask_once(
                backend,
                &question,
                top_k.or(config.default_top_k),
                cli.json,
                cli.quiet,
            )
            .await?;
        }

        Commands::Health { ready } => {
            cli::health::run_health(&backend, ready, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}
