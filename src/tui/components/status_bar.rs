// Status bar component
//
// Uptime, request counters, transaction count and the focused panel's key hints.
// Narrow terminals get the compact form without labels.

use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Below this width the labels are dropped
const COMPACT_WIDTH: u16 = 100;

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let stats = app.trigger_stats();
    let count = app.wallet.transactions().len();

    let status_text = if area.width < COMPACT_WIDTH {
        format!(
            " {} │ 📡 {} │ ↺ {} │ 🧾 {} │ {}",
            app.uptime(),
            stats.issued,
            stats.superseded,
            count,
            app.focus_hint(),
        )
    } else {
        format!(
            " {} │ 📡 {} requests │ ↺ {} superseded │ 🧾 {} transactions │ {}",
            app.uptime(),
            stats.issued,
            stats.superseded,
            count,
            app.focus_hint(),
        )
    };

    let status = Paragraph::new(status_text)
        .style(Style::default().fg(app.theme.status_bar))
        .block(Block::default().borders(Borders::TOP));

    f.render_widget(status, area);
}
