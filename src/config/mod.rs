//! Configuration for the wallet lookup client
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/wallet-lookup/config.toml)
//! 3. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod fetch;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports (maintain public API)
// ─────────────────────────────────────────────────────────────────────────────

pub use fetch::{DemoConfig, FetchConfig, FileDemo, FileFetch};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Base URL of the transactions endpoint when nothing else is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Identifier the form starts with
pub const DEFAULT_IDENTIFIER: &str = "1";

/// Theme used when none is configured
pub const DEFAULT_THEME: &str = "Ledger Dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the ledger API; requests go to `{api_url}/transactions/{id}`
    pub api_url: String,

    /// Identifier held by the form on startup
    pub initial_identifier: String,

    /// Theme name: "Ledger Dark", "Ledger Light", "Terminal"
    pub theme: String,

    /// Request timing (debounce, timeout)
    pub fetch: FetchConfig,

    /// In-process demo ledger server
    pub demo: DemoConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            initial_identifier: DEFAULT_IDENTIFIER.to_string(),
            theme: DEFAULT_THEME.to_string(),
            fetch: FetchConfig::default(),
            demo: DemoConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub initial_identifier: Option<String>,
    pub theme: Option<String>,

    /// Optional [fetch] section
    pub fetch: Option<FileFetch>,

    /// Optional [demo] section
    pub demo: Option<FileDemo>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/wallet-lookup/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("wallet-lookup").join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    /// Called during startup to help users discover configuration options
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // Config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Overwrite the config file with defaults
    pub fn reset_config_file() -> anyhow::Result<PathBuf> {
        use anyhow::Context;

        let path = Self::config_path().context("Could not determine config path")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(&path, Self::default().to_toml())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(path)
    }

    /// Load file config if it exists
    ///
    /// # Panics
    /// Never panics, but exits the process if the config file exists and cannot be
    /// parsed. A broken config should fail fast instead of silently falling back
    /// to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  To reset, run `wallet-lookup config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: file -> env vars -> defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed config file with an environment lookup
    ///
    /// Split out from `from_env` so precedence can be checked without touching
    /// the process environment.
    pub(crate) fn from_sources<F>(file: FileConfig, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // API URL: env > file > default
        let api_url = env("WALLET_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        // Initial identifier: env > file > default ("1")
        let initial_identifier = env("WALLET_ID")
            .or(file.initial_identifier)
            .unwrap_or_else(|| DEFAULT_IDENTIFIER.to_string());

        let theme = env("WALLET_THEME")
            .or(file.theme)
            .unwrap_or_else(|| DEFAULT_THEME.to_string());

        let fetch = FetchConfig::from_file(file.fetch);
        let logging = LoggingConfig::from_file(file.logging);

        // Demo toggle: env overrides the file's `enabled`
        let demo_override = env("WALLET_DEMO").map(|v| v == "1" || v.to_lowercase() == "true");
        let demo = DemoConfig::from_file(file.demo, demo_override);

        Self {
            api_url,
            initial_identifier,
            theme,
            fetch,
            demo,
            logging,
        }
    }

    /// Point the client at the in-process demo server
    pub fn use_demo_server(&mut self) {
        self.demo.enabled = true;
        self.api_url = format!("http://{}", self.demo.bind_addr);
    }
}
