//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::Config;

impl Config {
    /// Render the config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# wallet-lookup configuration
# Environment variables override these values:
#   WALLET_API_URL, WALLET_ID, WALLET_THEME, WALLET_DEMO, RUST_LOG

# Base URL of the ledger API. Requests go to {{api_url}}/transactions/{{id}}
api_url = {api_url}

# Identifier the form starts with
initial_identifier = {initial_identifier}

# Theme: "Ledger Dark", "Ledger Light", "Terminal"
theme = {theme}

[fetch]
# Quiet period after the last keystroke before a request is sent
debounce_ms = {debounce_ms}
# Per-request timeout
timeout_secs = {timeout_secs}

[demo]
# Run a mock ledger in-process and point api_url at it
enabled = {demo_enabled}
bind_addr = {demo_bind}

[logging]
# trace, debug, info, warn, error (RUST_LOG takes precedence)
level = {level}
# Write JSON log files in addition to the TUI log panel
file_enabled = {file_enabled}
file_dir = {file_dir}
# hourly, daily, never
file_rotation = {file_rotation}
file_prefix = {file_prefix}
"#,
            api_url = toml_string(&self.api_url),
            initial_identifier = toml_string(&self.initial_identifier),
            theme = toml_string(&self.theme),
            debounce_ms = self.fetch.debounce_ms,
            timeout_secs = self.fetch.timeout_secs,
            demo_enabled = self.demo.enabled,
            demo_bind = toml_string(&self.demo.bind_addr.to_string()),
            level = toml_string(&self.logging.level),
            file_enabled = self.logging.file_enabled,
            file_dir = toml_string(&self.logging.file_dir.display().to_string()),
            file_rotation = toml_string(self.logging.file_rotation.as_str()),
            file_prefix = toml_string(&self.logging.file_prefix),
        )
    }
}

/// Quote a string as a TOML value (control characters use TOML escapes)
fn toml_string(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}
