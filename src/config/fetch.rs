//! Request timing and demo server configuration

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Fetch Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// How transaction requests are issued
#[derive(Debug, Clone, PartialEq)]
pub struct FetchConfig {
    /// Quiet period after the last keystroke before an edit fires a request
    pub debounce_ms: u64,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 300,
            timeout_secs: 10,
        }
    }
}

/// Fetch settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileFetch {
    pub debounce_ms: Option<u64>,
    pub timeout_secs: Option<u64>,
}

impl FetchConfig {
    /// Create from file config with defaults
    pub fn from_file(file: Option<FileFetch>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        Self {
            debounce_ms: file.debounce_ms.unwrap_or(defaults.debounce_ms),
            timeout_secs: file.timeout_secs.unwrap_or(defaults.timeout_secs),
        }
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo Server Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// In-process mock ledger
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// Start the mock server and point `api_url` at it
    pub enabled: bool,
    /// Where the mock server listens
    pub bind_addr: SocketAddr,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 5000)),
        }
    }
}

/// Demo settings as loaded from config file
#[derive(Debug, Deserialize, Default)]
pub struct FileDemo {
    pub enabled: Option<bool>,
    pub bind_addr: Option<String>,
}

impl DemoConfig {
    /// Create from file config with defaults; `enabled_override` comes from WALLET_DEMO
    pub fn from_file(file: Option<FileDemo>, enabled_override: Option<bool>) -> Self {
        let file = file.unwrap_or_default();
        let defaults = Self::default();

        let bind_addr = match file.bind_addr {
            Some(raw) => raw.parse().unwrap_or_else(|_| {
                eprintln!(
                    "Warning: invalid [demo] bind_addr {:?}, using {}",
                    raw, defaults.bind_addr
                );
                defaults.bind_addr
            }),
            None => defaults.bind_addr,
        };

        Self {
            enabled: enabled_override
                .or(file.enabled)
                .unwrap_or(defaults.enabled),
            bind_addr,
        }
    }
}
