// Wallet Lookup - transaction history browser for a wallet ledger API
//
// The user types a wallet identifier; the client fetches
// GET {api_url}/transactions/{id} and shows the returned list.
//
// Architecture:
// - Wallet: HTTP client (reqwest), request trigger with cancellation, state
// - TUI (ratatui): form, transaction list, diagnostics panel
// - Demo ledger (axum): in-process server for trying it out offline
// - Logging (tracing): request outcomes go to the diagnostics panel or stderr

mod cli;
mod config;
mod demo;
mod logging;
mod theme;
mod tui;
mod wallet;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::Config;
use logging::{LogBuffer, LogOutput};
use std::net::SocketAddr;
use std::process::ExitCode;
use wallet::{FetchError, TransactionsClient};

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // Config management never touches logging or the network
    if let Some(Commands::Config { show, reset, path }) = cli.command {
        cli::handle_config(show, reset, path);
        return Ok(ExitCode::SUCCESS);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let mut config = Config::from_env();
    if let Some(id) = cli.id {
        config.initial_identifier = id;
    }
    if cli.demo {
        config.demo.enabled = true;
    }

    // TUI mode captures logs into the buffer (prevents garbling the display);
    // headless commands log to stderr so stdout stays clean for output
    let log_buffer = LogBuffer::new();
    let output = match cli.command {
        None => LogOutput::Tui,
        Some(_) => LogOutput::Stderr,
    };
    // Dropped when main returns, flushing any queued file logs
    let _file_guard = logging::init(&config.logging, output, &log_buffer);

    match cli.command {
        Some(Commands::Serve { bind }) => {
            let addr = bind.unwrap_or(config.demo.bind_addr);
            demo::serve(addr, shutdown_signal()).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Fetch { id }) => {
            start_demo_if_enabled(&mut config).await?;
            let client = TransactionsClient::new(config.api_url.clone(), &config.fetch)?;
            match fetch_transactions_json(&client, &id).await {
                Ok(rendered) => {
                    println!("{}", rendered);
                    Ok(ExitCode::SUCCESS)
                }
                // Already reported by log_outcome
                Err(_) => Ok(ExitCode::FAILURE),
            }
        }
        Some(Commands::Config { .. }) => Ok(ExitCode::SUCCESS),
        None => {
            start_demo_if_enabled(&mut config).await?;
            tracing::info!(
                api_url = %config.api_url,
                identifier = %config.initial_identifier,
                "Starting wallet lookup"
            );
            tui::run_tui(config, log_buffer).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// Spawn the demo ledger in the background and aim the client at it
async fn start_demo_if_enabled(config: &mut Config) -> Result<()> {
    if !config.demo.enabled {
        return Ok(());
    }

    let bound: SocketAddr = demo::spawn(config.demo.bind_addr).await?;
    config.demo.bind_addr = bound;
    config.use_demo_server();
    tracing::info!("Running in DEMO MODE against {}", config.api_url);
    Ok(())
}

/// Headless fetch: one request, logged once, transactions as pretty JSON
async fn fetch_transactions_json(
    client: &TransactionsClient,
    identifier: &str,
) -> Result<String, FetchError> {
    let result = client.fetch(identifier).await;
    wallet::log_outcome(identifier, &result);

    let list = serde_json::Value::Array(
        result?
            .transactions
            .into_iter()
            .map(|transaction| transaction.0)
            .collect(),
    );
    Ok(format!("{:#}", list))
}

/// Resolve on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutting down demo ledger");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FetchConfig;

    fn client_for(addr: SocketAddr) -> TransactionsClient {
        TransactionsClient::new(format!("http://{}", addr), &FetchConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn fetch_prints_transaction_list_as_pretty_json() {
        let addr = demo::spawn_local().await.unwrap();

        let rendered = fetch_transactions_json(&client_for(addr), "3").await.unwrap();

        assert!(rendered.starts_with("[\n"));
        let parsed: Vec<wallet::Transaction> = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed, demo::ledger_for("3").unwrap());
    }

    #[tokio::test]
    async fn fetch_fails_for_unknown_wallet() {
        let addr = demo::spawn_local().await.unwrap();

        let err = fetch_transactions_json(&client_for(addr), "nope")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn fetch_fails_when_ledger_is_unreachable() {
        let addr = demo::unused_local_addr().await.unwrap();

        let err = fetch_transactions_json(&client_for(addr), "1")
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Transport { .. }));
        assert!(err.url().ends_with("/transactions/1"));
    }
}
