// CLI module - command-line argument parsing and handlers
//
// With no subcommand the TUI runs. Subcommands:
// - fetch <ID>: one request, JSON to stdout, logs to stderr
// - serve: run the demo ledger in the foreground
// - config --show|--path|--reset: configuration management

use crate::config::{Config, VERSION};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::net::SocketAddr;

/// Wallet Lookup - fetch and browse a wallet's transaction history
#[derive(Parser, Debug)]
#[command(name = "wallet-lookup")]
#[command(version = VERSION)]
#[command(about = "Fetch and browse a wallet's transaction history", long_about = None)]
pub struct Cli {
    /// Start the in-process demo ledger and point the client at it
    #[arg(long)]
    pub demo: bool,

    /// Initial wallet identifier (overrides config and WALLET_ID)
    #[arg(long)]
    pub id: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch one wallet's transactions and print them as JSON
    Fetch {
        /// Wallet identifier, interpolated into the URL verbatim
        id: String,
    },

    /// Run the demo ledger server in the foreground
    Serve {
        /// Address to bind (defaults to the configured demo address)
        #[arg(long)]
        bind: Option<SocketAddr>,
    },

    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// Handle `config` flags
pub fn handle_config(show: bool, reset: bool, path: bool) {
    if path {
        handle_config_path();
    } else if show {
        handle_config_show();
    } else if reset {
        handle_config_reset();
    } else {
        // No flag provided, show help
        println!("Usage: wallet-lookup config [--show|--reset|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --path    Show config file path");
    }
}

fn handle_config_path() {
    match Config::config_path() {
        Some(path) => println!("{}", path.display()),
        None => {
            eprintln!("Error: Could not determine config path");
            std::process::exit(1);
        }
    }
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    print!("{}", config.to_toml());

    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() {
    let Some(path) = Config::config_path() else {
        eprintln!("Error: Could not determine config path");
        std::process::exit(1);
    };

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        let _ = std::io::stderr().flush();

        let mut input = String::new();
        if std::io::stdin().read_line(&mut input).is_err()
            || !input.trim().eq_ignore_ascii_case("y")
        {
            println!("Aborted.");
            return;
        }
    }

    match Config::reset_config_file() {
        Ok(path) => println!("Config reset to defaults: {}", path.display()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
