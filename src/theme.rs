// Theme system for the TUI
//
// A theme is a flat set of resolved colors. Built-in themes are selected by
// name from config (`theme = "Ledger Dark"`); unknown names fall back to the
// default with a warning in the log panel.

use ratatui::style::Color;
use ratatui::widgets::BorderType;

/// Complete resolved theme ready for use in the TUI
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // ─── Base Colors ─────────────────────────────────────────
    pub background: Color,
    pub foreground: Color,
    pub muted: Color,
    pub border: Color,
    pub highlight: Color,

    // ─── Shell ───────────────────────────────────────────────
    pub title: Color,
    pub status_bar: Color,
    pub border_type: BorderType,

    // ─── Log Levels ──────────────────────────────────────────
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

/// Names accepted by `Theme::by_name`
pub const THEME_NAMES: [&str; 3] = ["Ledger Dark", "Ledger Light", "Terminal"];

impl Theme {
    /// Look up a built-in theme (case-insensitive)
    pub fn by_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "ledger dark" => Some(Self::ledger_dark()),
            "ledger light" => Some(Self::ledger_light()),
            "terminal" => Some(Self::terminal()),
            _ => None,
        }
    }

    /// Resolve a configured name, falling back to the default theme
    pub fn resolve(name: &str) -> Self {
        Self::by_name(name).unwrap_or_else(|| {
            tracing::warn!(
                "Unknown theme {:?}, using {} (available: {})",
                name,
                crate::config::DEFAULT_THEME,
                THEME_NAMES.join(", ")
            );
            Self::default()
        })
    }

    fn ledger_dark() -> Self {
        Self {
            name: "Ledger Dark".to_string(),
            background: Color::Rgb(0x16, 0x1b, 0x22),
            foreground: Color::Rgb(0xd0, 0xd7, 0xde),
            muted: Color::Rgb(0x6e, 0x76, 0x81),
            border: Color::Rgb(0x3d, 0x44, 0x4d),
            highlight: Color::Rgb(0x58, 0xa6, 0xff),
            title: Color::Rgb(0x3f, 0xb9, 0x50),
            status_bar: Color::Rgb(0x8b, 0x94, 0x9e),
            border_type: BorderType::Rounded,
            log_error: Color::Rgb(0xf8, 0x51, 0x49),
            log_warn: Color::Rgb(0xd2, 0x99, 0x22),
            log_info: Color::Rgb(0x79, 0xc0, 0xff),
            log_debug: Color::Rgb(0x6e, 0x76, 0x81),
        }
    }

    fn ledger_light() -> Self {
        Self {
            name: "Ledger Light".to_string(),
            background: Color::Rgb(0xff, 0xff, 0xff),
            foreground: Color::Rgb(0x1f, 0x23, 0x28),
            muted: Color::Rgb(0x8c, 0x95, 0x9f),
            border: Color::Rgb(0xd0, 0xd7, 0xde),
            highlight: Color::Rgb(0x09, 0x69, 0xda),
            title: Color::Rgb(0x1a, 0x7f, 0x37),
            status_bar: Color::Rgb(0x57, 0x60, 0x6a),
            border_type: BorderType::Rounded,
            log_error: Color::Rgb(0xcf, 0x22, 0x2e),
            log_warn: Color::Rgb(0x9a, 0x67, 0x00),
            log_info: Color::Rgb(0x09, 0x69, 0xda),
            log_debug: Color::Rgb(0x8c, 0x95, 0x9f),
        }
    }

    /// Uses the terminal's own palette
    fn terminal() -> Self {
        Self {
            name: "Terminal".to_string(),
            background: Color::Reset,
            foreground: Color::Reset,
            muted: Color::DarkGray,
            border: Color::Gray,
            highlight: Color::Cyan,
            title: Color::Green,
            status_bar: Color::Gray,
            border_type: BorderType::Plain,
            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Cyan,
            log_debug: Color::DarkGray,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::ledger_dark()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_name_resolves() {
        for name in THEME_NAMES {
            assert_eq!(Theme::by_name(name).unwrap().name, name);
        }
        assert!(Theme::by_name("LEDGER LIGHT").is_some());
    }

    #[test]
    fn unknown_name_falls_back_to_default() {
        assert!(Theme::by_name("dracula").is_none());
        assert_eq!(Theme::resolve("dracula").name, crate::config::DEFAULT_THEME);
    }
}
